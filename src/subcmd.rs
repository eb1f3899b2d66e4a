// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

pub mod regen;
pub mod build_lua;
pub mod statistics;
pub mod fetch;

pub use regen::subcmd_regen;
pub use build_lua::subcmd_build_lua;
pub use statistics::subcmd_statistics;
pub use fetch::subcmd_fetch;
