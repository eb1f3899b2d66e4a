// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error as TeError;

use crate::asset_file::common::{AssetLayout, AssetLoadError};
use crate::asset_file::entry::{ordered_keys, parse_entries, EntryFilter};
use crate::asset_file::lua::{render_lua_table, render_term_keys};
use crate::asset_file::table::TranslationTable;
use crate::poeditor::export_dir::{ExportDir, ExportDirError};

#[derive(TeError, Debug)]
pub enum CmdError {
    #[error("Fail to load translation assets because: {0}")]
    LoadAssets(#[from] AssetLoadError),
    #[error("Fail to load POEditor exports because: {0}")]
    LoadExports(#[from] ExportDirError),
    #[error("Fail to encode Lua string: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Fail to write file {0:?} because: {1}")]
    WriteFile(PathBuf, #[source] std::io::Error),
}

fn write_output(path: &Path, content: &str) -> Result<(), CmdError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| CmdError::WriteFile(path.to_path_buf(), e))?;
    }
    fs::write(path, content).map_err(|e| CmdError::WriteFile(path.to_path_buf(), e))
}

/// Term keys in source order: POEditor terms, or the keys of the base asset file.
fn load_term_keys(layout: &AssetLayout, from_exports: Option<&Path>) -> Result<Vec<String>, CmdError> {
    match from_exports {
        Some(exports) => Ok(ExportDir::new(exports).load_terms()?.into_iter().map(|t| t.term).collect()),
        None => {
            let base_entries = parse_entries(&layout.read_base_file()?);
            Ok(ordered_keys(&base_entries).into_iter().map(str::to_string).collect())
        },
    }
}

pub fn subcmd_build_lua(
    layout: &AssetLayout,
    from_exports: Option<&Path>,
    output: &Path,
    term_keys_output: Option<&Path>,
) -> Result<(), CmdError> {
    let table = match from_exports {
        Some(exports) => ExportDir::new(exports).load_translation_table()?,
        // Entries waiting for a translation still ship, carrying the base text.
        None => TranslationTable::build(layout, EntryFilter::All)?,
    };
    write_output(output, &render_lua_table(&table)?)?;
    println!("Generated {} translations.", table.len());

    if let Some(term_keys_output) = term_keys_output {
        let keys = load_term_keys(layout, from_exports)?;
        write_output(term_keys_output, &render_term_keys(&keys))?;
        println!("Wrote {} term keys.", keys.len());
    }

    Ok(())
}
