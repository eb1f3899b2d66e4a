// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use std::fs;
use std::path::PathBuf;
use thiserror::Error as TeError;
use tracing::{debug, warn};

use crate::asset_file::common::{AssetLayout, AssetLoadError};
use crate::asset_file::entry::{EntryFilter, LanguageEntries};
use crate::asset_file::regen::{RegenError, RenderedAsset, Regenerator};
use crate::asset_file::table::TranslationTable;

#[derive(TeError, Debug)]
pub enum CmdError {
    #[error("Fail to load translation assets because: {0}")]
    LoadAssets(#[from] AssetLoadError),
    #[error("Fail to regenerate language {0:?} because: {1}")]
    Regen(String, #[source] RegenError),
    #[error("Fail to remove previous file {0:?} because: {1}")]
    RemoveFile(PathBuf, #[source] std::io::Error),
    #[error("Fail to write file {0:?} because: {1}")]
    WriteFile(PathBuf, #[source] std::io::Error),
}

/// Pick the languages to regenerate: the requested ones, or every non-base
/// language found on disk. A requested language without a file gets a new one.
fn select_target_languages(layout: &AssetLayout, table: &TranslationTable, requested: &[String]) -> Vec<String> {
    if requested.is_empty() {
        return table.target_languages(&layout.base_language);
    }
    let mut languages = vec![];
    for language in requested {
        if layout.is_base_language(language) {
            warn!("Skipping base language {language:?}, it is never regenerated");
            continue;
        }
        if !languages.contains(language) {
            languages.push(language.clone());
        }
    }
    languages
}

pub fn subcmd_regen(layout: &AssetLayout, languages: &[String], dry_run: bool) -> Result<(), CmdError> {
    let base_content = layout.read_base_file()?;
    let table = TranslationTable::build(layout, EntryFilter::TranslatedOnly)?;
    let base_entries = table.get(&layout.base_language)
        .ok_or_else(|| AssetLoadError::BaseFileNotFound(layout.base_file_path()))?;
    let regenerator = Regenerator::new(&base_content, base_entries);

    // Render everything first so a broken base file leaves the targets untouched.
    let no_entries = LanguageEntries::new();
    let mut rendered_assets: Vec<(PathBuf, RenderedAsset)> = vec![];
    for language in select_target_languages(layout, &table, languages) {
        let target_entries = table.get(&language).unwrap_or(&no_entries);
        let rendered = regenerator.render(target_entries)
            .map_err(|e| CmdError::Regen(language.clone(), e))?;
        debug!("Rendered {language:?}: {} translated, {} need translation", rendered.translated, rendered.needs_translation);
        rendered_assets.push((layout.file_path(&language), rendered));
    }

    for (target_path, rendered) in &rendered_assets {
        if dry_run {
            println!("Would regenerate {target_path:?} ({} translated, {} need translation)", rendered.translated, rendered.needs_translation);
            continue;
        }
        println!("Regenerating {target_path:?}");
        if target_path.exists() {
            fs::remove_file(target_path).map_err(|e| CmdError::RemoveFile(target_path.clone(), e))?;
        }
        fs::write(target_path, &rendered.content).map_err(|e| CmdError::WriteFile(target_path.clone(), e))?;
    }

    Ok(())
}
