// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error as TeError;

use super::common::{NEEDS_TRANSLATION_MARKER, VALUE_CLOSE};
use super::entry::{LanguageEntries, KEY_PATTERN};

static KEY_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(KEY_PATTERN).unwrap());

#[derive(TeError, Debug, PartialEq, Eq)]
pub enum RegenError {
    #[error("Key {0:?} is missing from the base language file")]
    MissingBaseKey(String),
    #[error("Value of key {key:?} opened at line {line} is never closed with \"]]\"")]
    UnterminatedValue { key: String, line: usize },
}

enum ScanState<'a> {
    Scanning,
    /// Inside a multi-line base value whose entry was already emitted.
    SkippingToClose { key: &'a str, line: usize },
}

/// A regenerated asset file and how its entries were filled.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RenderedAsset {
    pub content: String,
    pub translated: usize,
    pub needs_translation: usize,
}

/// Rewrites target languages so they follow the base file line by line.
pub struct Regenerator<'a> {
    base_lines: Vec<&'a str>,
    base_entries: &'a LanguageEntries,
}

impl<'a> Regenerator<'a> {
    pub fn new(base_content: &'a str, base_entries: &'a LanguageEntries) -> Self {
        Regenerator {
            base_lines: base_content.lines().collect(),
            base_entries,
        }
    }

    /// Render the target language file.
    ///
    /// Lines without a `key =` prefix are copied as-is. Each keyed line becomes
    /// `key = [[value]]` holding the target translation, or the base value
    /// followed by the "Needs translation" marker when there is none.
    /// Continuation lines of a multi-line base value are dropped since the
    /// emitted entry already carries the whole value.
    pub fn render(&self, target_entries: &LanguageEntries) -> Result<RenderedAsset, RegenError> {
        let mut rendered = RenderedAsset::default();
        let mut state = ScanState::Scanning;

        for (index, line) in self.base_lines.iter().copied().enumerate() {
            if let ScanState::SkippingToClose { .. } = state {
                if line.contains(VALUE_CLOSE) {
                    state = ScanState::Scanning;
                }
                continue;
            }

            let Some(caps) = KEY_LINE_REGEX.captures(line) else {
                rendered.content.push_str(line);
                rendered.content.push('\n');
                continue;
            };
            let key = caps.name("key").map_or("", |m| m.as_str());
            if !line.contains(VALUE_CLOSE) {
                state = ScanState::SkippingToClose { key, line: index + 1 };
            }

            match target_entries.get(key) {
                Some(value) => {
                    rendered.content.push_str(&format!("{key} = [[{value}]]\n"));
                    rendered.translated += 1;
                },
                None => {
                    let fallback = self.base_entries.get(key)
                        .ok_or_else(|| RegenError::MissingBaseKey(key.to_string()))?;
                    rendered.content.push_str(&format!("{key} = [[{fallback}]] {NEEDS_TRANSLATION_MARKER}\n"));
                    rendered.needs_translation += 1;
                },
            }
        }

        if let ScanState::SkippingToClose { key, line } = state {
            return Err(RegenError::UnterminatedValue { key: key.to_string(), line });
        }
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset_file::entry::tests::{TEST_EN_CONTENT, TEST_FR_CONTENT};
    use crate::asset_file::entry::{collect_entries, parse_entries, EntryFilter};

    fn entries_of(content: &str) -> LanguageEntries {
        collect_entries(&parse_entries(content), EntryFilter::TranslatedOnly)
    }

    #[test]
    fn tst_render_partial_translation() {
        let base = entries_of(TEST_EN_CONTENT);
        let target = entries_of(TEST_FR_CONTENT);
        let regenerator = Regenerator::new(TEST_EN_CONTENT, &base);
        let rendered = regenerator.render(&target).unwrap();
        assert_eq!(rendered.content, r#"-- Main menu
greeting = [[Bonjour]]
farewell = [[Goodbye]] # Needs translation

-- Help screen
note = [[Ligne un
Ligne deux]]
title = [[Game Title]] # Needs translation
"#);
        assert_eq!(rendered.translated, 2);
        assert_eq!(rendered.needs_translation, 2);
    }

    #[test]
    fn tst_render_examples() {
        let base_content = "greeting = [[Hello]]\n";
        let base = entries_of(base_content);
        let regenerator = Regenerator::new(base_content, &base);

        let fr = regenerator.render(&entries_of("greeting = [[Bonjour]]\n")).unwrap();
        assert_eq!(fr.content, "greeting = [[Bonjour]]\n");
        let de = regenerator.render(&LanguageEntries::new()).unwrap();
        assert_eq!(de.content, "greeting = [[Hello]] # Needs translation\n");
    }

    #[test]
    fn tst_multiline_fallback_is_one_entry() {
        let base_content = "note = [[Line one\nLine two]]\nafter = [[x]]\n";
        let base = entries_of(base_content);
        let regenerator = Regenerator::new(base_content, &base);
        let rendered = regenerator.render(&LanguageEntries::new()).unwrap();
        assert_eq!(rendered.content, "note = [[Line one\nLine two]] # Needs translation\nafter = [[x]] # Needs translation\n");
        assert_eq!(parse_entries(&rendered.content).len(), 2);
        assert_eq!(rendered.needs_translation, 2);
    }

    #[test]
    fn tst_rerender_is_idempotent() {
        let base = entries_of(TEST_EN_CONTENT);
        let regenerator = Regenerator::new(TEST_EN_CONTENT, &base);
        let first = regenerator.render(&entries_of(TEST_FR_CONTENT)).unwrap();
        let second = regenerator.render(&entries_of(&first.content)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn tst_key_order_follows_base() {
        let base = entries_of(TEST_EN_CONTENT);
        let regenerator = Regenerator::new(TEST_EN_CONTENT, &base);
        let target = entries_of("title = [[Titre]]\nextra = [[unused]]\ngreeting = [[Salut]]\n");
        let rendered = regenerator.render(&target).unwrap();
        let keys: Vec<String> = parse_entries(&rendered.content).into_iter().map(|e| e.key).collect();
        assert_eq!(keys, vec!["greeting", "farewell", "note", "title"]);
    }

    #[test]
    fn tst_missing_base_key() {
        let base_content = "broken = value without brackets]]\n";
        let base = entries_of(base_content);
        let regenerator = Regenerator::new(base_content, &base);
        assert_eq!(
            regenerator.render(&LanguageEntries::new()),
            Err(RegenError::MissingBaseKey("broken".to_string())),
        );
    }

    #[test]
    fn tst_unterminated_value() {
        let base_content = "ok = [[fine]]\nopen = [[never\nclosed\n-- trailing comment\n";
        let base = entries_of(base_content);
        let regenerator = Regenerator::new(base_content, &base);
        let target = entries_of("open = [[jamais]]\n");
        assert_eq!(
            regenerator.render(&target),
            Err(RegenError::UnterminatedValue { key: "open".to_string(), line: 2 }),
        );
    }

    #[test]
    fn tst_compact_value_with_equal_sign() {
        let base_content = "url=[[https://x.io/?a=1]]\n";
        let base = entries_of(base_content);
        let regenerator = Regenerator::new(base_content, &base);

        let de = regenerator.render(&LanguageEntries::new()).unwrap();
        assert_eq!(de.content, "url = [[https://x.io/?a=1]] # Needs translation\n");
        let fr = regenerator.render(&entries_of("url = [[https://x.fr/?a=1]]\n")).unwrap();
        assert_eq!(fr.content, "url = [[https://x.fr/?a=1]]\n");
    }

    #[test]
    fn tst_comment_with_equal_sign_passes_through() {
        let base_content = "-- foo = bar\n# see key = value\ngreeting = [[Hello]]\n";
        let base = entries_of(base_content);
        let regenerator = Regenerator::new(base_content, &base);
        let rendered = regenerator.render(&LanguageEntries::new()).unwrap();
        assert_eq!(rendered.content, "-- foo = bar\n# see key = value\ngreeting = [[Hello]] # Needs translation\n");
        assert_eq!(rendered.needs_translation, 1);
    }

    #[test]
    fn tst_crlf_base_lines() {
        let base_content = "-- header\r\ngreeting = [[Hello]]\r\n";
        let base = entries_of(base_content);
        let regenerator = Regenerator::new(base_content, &base);
        let rendered = regenerator.render(&LanguageEntries::new()).unwrap();
        assert_eq!(rendered.content, "-- header\ngreeting = [[Hello]] # Needs translation\n");
    }
}
