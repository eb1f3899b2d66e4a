// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

pub mod common;
pub mod entry;
pub mod table;
pub mod regen;
pub mod lua;
