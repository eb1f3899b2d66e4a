// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::warn;

use super::common::NEEDS_TRANSLATION_MARKER;

/// A key starts its line and stops at the first whitespace or `=`.
pub const KEY_PATTERN: &str = r"^\s*(?P<key>[^\s=]+)\s*=";

/// `key = [[value]]` at the start of a line, value being the shortest span up
/// to the first `]]`.
static ENTRY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?m){KEY_PATTERN}\s*\[\[(?P<value>[\S\s]*?)\]\]")).unwrap()
});

/// Key to value mapping of a single language.
pub type LanguageEntries = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetEntry {
    pub key: String,
    /// Raw text between `[[` and `]]`, embedded newlines included.
    pub value: String,
    pub needs_translation: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryFilter {
    /// Drop entries flagged with the "Needs translation" marker.
    TranslatedOnly,
    All,
}

/// Extract every `key = [[value]]` occurrence of an asset file, in file order.
pub fn parse_entries(content: &str) -> Vec<AssetEntry> {
    ENTRY_REGEX
        .captures_iter(content)
        .map(|caps| {
            let end = caps.get(0).map_or(content.len(), |m| m.end());
            let needs_translation = content[end..].trim_start().starts_with(NEEDS_TRANSLATION_MARKER);
            AssetEntry {
                key: caps["key"].to_string(),
                value: caps["value"].to_string(),
                needs_translation,
            }
        })
        .collect()
}

/// Fold parsed entries into a mapping. A repeated key keeps its last value.
pub fn collect_entries(entries: &[AssetEntry], filter: EntryFilter) -> LanguageEntries {
    let mut collected = LanguageEntries::new();
    for entry in entries {
        if filter == EntryFilter::TranslatedOnly && entry.needs_translation {
            continue;
        }
        if collected.insert(entry.key.clone(), entry.value.clone()).is_some() {
            warn!("Key {:?} appears more than once, the later value wins", entry.key);
        }
    }
    collected
}

/// Keys in first-appearance order, each listed once.
pub fn ordered_keys(entries: &[AssetEntry]) -> Vec<&str> {
    let mut keys: Vec<&str> = vec![];
    for entry in entries {
        if !keys.contains(&entry.key.as_str()) {
            keys.push(&entry.key);
        }
    }
    keys
}
