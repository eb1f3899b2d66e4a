// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error as TeError;
use tracing::debug;

use super::rest_api::{Language, Term, TranslationRecord};
use crate::asset_file::entry::LanguageEntries;
use crate::asset_file::table::TranslationTable;

const TERMS_FILE: &str = "terms.json";
const LANGUAGES_FILE: &str = "languages.json";
const EXPORTS_DIR: &str = "exports";

#[derive(TeError, Debug)]
pub enum ExportDirError {
    #[error("Fail to read file {0:?} because: {1}")]
    Read(PathBuf, #[source] std::io::Error),
    #[error("Fail to write {0:?} because: {1}")]
    Write(PathBuf, #[source] std::io::Error),
    #[error("Fail to parse {0:?} because: {1}")]
    Parse(PathBuf, #[source] serde_json::Error),
    #[error("Fail to serialize {0:?} because: {1}")]
    Serialize(PathBuf, #[source] serde_json::Error),
}

/// Local copy of a POEditor project:
/// `terms.json`, `languages.json` and `exports/<code>.json`.
#[derive(Debug, Clone)]
pub struct ExportDir {
    root: PathBuf,
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ExportDirError> {
    let content = serde_json::to_string_pretty(value).map_err(|e| ExportDirError::Serialize(path.to_path_buf(), e))?;
    fs::write(path, content).map_err(|e| ExportDirError::Write(path.to_path_buf(), e))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ExportDirError> {
    debug!("Reading {path:?}");
    let content = fs::read_to_string(path).map_err(|e| ExportDirError::Read(path.to_path_buf(), e))?;
    serde_json::from_str(&content).map_err(|e| ExportDirError::Parse(path.to_path_buf(), e))
}

/// Translated definitions of an export. Untranslated and plural terms are skipped.
///
/// POEditor doubles backslashes in exported definitions, they are collapsed back.
pub fn records_to_entries(records: &[TranslationRecord]) -> LanguageEntries {
    records
        .iter()
        .filter_map(|record| {
            record.definition_text().map(|text| (record.term.clone(), text.replace("\\\\", "\\")))
        })
        .collect()
}

impl ExportDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ExportDir { root: root.into() }
    }

    fn export_path(&self, language_code: &str) -> PathBuf {
        self.root.join(EXPORTS_DIR).join(format!("{language_code}.json"))
    }

    fn ensure_root(&self) -> Result<(), ExportDirError> {
        fs::create_dir_all(&self.root).map_err(|e| ExportDirError::Write(self.root.clone(), e))
    }

    pub fn save_terms(&self, terms: &[Term]) -> Result<(), ExportDirError> {
        self.ensure_root()?;
        write_json(&self.root.join(TERMS_FILE), terms)
    }

    pub fn save_languages(&self, languages: &[Language]) -> Result<(), ExportDirError> {
        self.ensure_root()?;
        write_json(&self.root.join(LANGUAGES_FILE), languages)
    }

    /// Drop every previous export so languages removed upstream do not linger.
    pub fn reset_exports(&self) -> Result<(), ExportDirError> {
        let exports_dir = self.root.join(EXPORTS_DIR);
        if exports_dir.exists() {
            fs::remove_dir_all(&exports_dir).map_err(|e| ExportDirError::Write(exports_dir.clone(), e))?;
        }
        fs::create_dir_all(&exports_dir).map_err(|e| ExportDirError::Write(exports_dir, e))
    }

    pub fn save_export(&self, language_code: &str, records: &[TranslationRecord]) -> Result<(), ExportDirError> {
        write_json(&self.export_path(language_code), records)
    }

    pub fn load_terms(&self) -> Result<Vec<Term>, ExportDirError> {
        read_json(&self.root.join(TERMS_FILE))
    }

    pub fn load_languages(&self) -> Result<Vec<Language>, ExportDirError> {
        read_json(&self.root.join(LANGUAGES_FILE))
    }

    pub fn load_export(&self, language_code: &str) -> Result<Vec<TranslationRecord>, ExportDirError> {
        read_json(&self.export_path(language_code))
    }

    /// Build a table from every language listed in `languages.json`.
    pub fn load_translation_table(&self) -> Result<TranslationTable, ExportDirError> {
        let mut table = TranslationTable::default();
        for language in self.load_languages()? {
            let records = self.load_export(&language.code)?;
            table.insert_entries(&language.code, records_to_entries(&records));
        }
        Ok(table)
    }
}
