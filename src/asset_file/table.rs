// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;
use tracing::debug;

use super::common::{read_asset_file, AssetLayout, AssetLoadError};
use super::entry::{collect_entries, parse_entries, EntryFilter, LanguageEntries};

/// Entries of every language found in the assets directory, keyed by language code.
#[derive(Debug, Default, Clone)]
pub struct TranslationTable {
    languages: BTreeMap<String, LanguageEntries>,
}

impl TranslationTable {
    pub fn build(layout: &AssetLayout, filter: EntryFilter) -> Result<Self, AssetLoadError> {
        let mut table = TranslationTable::default();
        for (language, path) in layout.scan_languages()? {
            let content = read_asset_file(&path)?;
            table.insert_language(&language, &content, filter);
        }
        Ok(table)
    }

    pub fn insert_language(&mut self, language: &str, content: &str, filter: EntryFilter) {
        self.insert_entries(language, collect_entries(&parse_entries(content), filter));
    }

    pub fn insert_entries(&mut self, language: &str, entries: LanguageEntries) {
        debug!("Loaded {} entries for language {language:?}", entries.len());
        self.languages.insert(language.to_string(), entries);
    }

    pub fn get(&self, language: &str) -> Option<&LanguageEntries> {
        self.languages.get(language)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &LanguageEntries)> {
        self.languages.iter()
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// Every language except the base one, in language code order.
    pub fn target_languages(&self, base_language: &str) -> Vec<String> {
        self.languages.keys().filter(|l| l.as_str() != base_language).cloned().collect()
    }
}
