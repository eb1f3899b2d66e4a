// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error as TeError;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Comment appended after a value that is a copy of the base language text.
pub const NEEDS_TRANSLATION_MARKER: &str = "# Needs translation";
/// Closes a `[[value]]` block, possibly several lines after it was opened.
pub const VALUE_CLOSE: &str = "]]";

#[derive(TeError, Debug)]
pub enum AssetLoadError {
    #[error("Assets directory {0:?} does not exist")]
    AssetsDirNotFound(PathBuf),
    #[error("Base language file {0:?} does not exist")]
    BaseFileNotFound(PathBuf),
    #[error("Fail to scan assets directory {0:?} because: {1}")]
    ScanDir(PathBuf, #[source] walkdir::Error),
    #[error("Fail to read asset file {0:?} because: {1}")]
    ReadFile(PathBuf, #[source] std::io::Error),
}

/// Where the asset files live and how they are named.
///
/// Every language owns exactly one file named `<language>.<extension>`
/// directly inside `assets_dir`.
#[derive(Debug, Clone)]
pub struct AssetLayout {
    pub assets_dir: PathBuf,
    pub base_language: String,
    pub extension: String,
}

impl AssetLayout {
    pub fn new(assets_dir: impl Into<PathBuf>, base_language: &str, extension: &str) -> Self {
        AssetLayout {
            assets_dir: assets_dir.into(),
            base_language: base_language.to_string(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn file_path(&self, language: &str) -> PathBuf {
        self.assets_dir.join(format!("{language}.{}", self.extension))
    }

    pub fn base_file_path(&self) -> PathBuf {
        self.file_path(&self.base_language)
    }

    pub fn is_base_language(&self, language: &str) -> bool {
        self.base_language == language
    }

    /// List `(language, path)` pairs of every asset file, sorted by file name.
    ///
    /// Sub-directories and files with another extension are skipped.
    pub fn scan_languages(&self) -> Result<Vec<(String, PathBuf)>, AssetLoadError> {
        if !self.assets_dir.is_dir() {
            return Err(AssetLoadError::AssetsDirNotFound(self.assets_dir.clone()));
        }
        let mut languages = vec![];
        for entry in WalkDir::new(&self.assets_dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| AssetLoadError::ScanDir(self.assets_dir.clone(), e))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(self.extension.as_str()) {
                debug!("Skipping non-asset file {path:?}");
                continue;
            }
            match path.file_stem().and_then(|s| s.to_str()) {
                Some(language) => languages.push((language.to_string(), path.to_path_buf())),
                None => warn!("Skipping asset file {path:?} without a valid UTF-8 language code"),
            }
        }
        Ok(languages)
    }

    pub fn read_base_file(&self) -> Result<String, AssetLoadError> {
        let base_file = self.base_file_path();
        if !base_file.is_file() {
            return Err(AssetLoadError::BaseFileNotFound(base_file));
        }
        read_asset_file(&base_file)
    }
}

pub fn read_asset_file(path: &Path) -> Result<String, AssetLoadError> {
    debug!("Reading asset file {path:?}");
    std::fs::read_to_string(path).map_err(|e| AssetLoadError::ReadFile(path.to_path_buf(), e))
}

/// How the keys of the base language file are covered by one target language.
#[derive(Debug, Default, Serialize, PartialEq)]
pub struct EntryStats {
    /// The key has a real translation.
    pub translated: u64,
    /// The key only holds a copy of the base text, flagged with the marker.
    pub needs_translation: u64,
    /// The key does not appear in the target file at all.
    pub missing: u64,
}

impl EntryStats {
    pub fn total(&self) -> u64 {
        self.translated + self.needs_translation + self.missing
    }

    pub fn completeness_percentage(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            (self.translated as f64 / total as f64) * 100.0
        }
    }
}
