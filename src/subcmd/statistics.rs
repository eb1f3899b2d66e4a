// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error as TeError;

use crate::asset_file::common::{read_asset_file, AssetLayout, AssetLoadError, EntryStats};
use crate::asset_file::entry::{collect_entries, ordered_keys, parse_entries, AssetEntry, EntryFilter};

#[derive(TeError, Debug)]
pub enum CmdError {
    #[error("Fail to load translation assets because: {0}")]
    LoadAssets(#[from] AssetLoadError),
    #[error("Fail to serialize stats: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(clap::ValueEnum, Clone, Default, Copy, Debug)]
pub enum StatsFormat {
    #[default]
    PlainTable,
    Json,
}

#[derive(clap::ValueEnum, Clone, Default, Copy, Debug)]
pub enum StatsSortBy {
    LanguageCode,
    #[default]
    Completeness,
}

#[derive(Debug, Serialize)]
struct LanguageStats {
    language: String,
    file_path: PathBuf,
    stats: EntryStats,
}

#[derive(Debug, Default, Serialize)]
struct AssetsStats {
    assets_dir: PathBuf,
    base_language: String,
    base_keys: usize,
    languages: Vec<LanguageStats>,
}

fn compute_entry_stats(base_keys: &[&str], target_entries: &[AssetEntry]) -> EntryStats {
    let translated = collect_entries(target_entries, EntryFilter::TranslatedOnly);
    let present = collect_entries(target_entries, EntryFilter::All);
    let mut stats = EntryStats::default();
    for key in base_keys {
        if translated.contains_key(*key) {
            stats.translated += 1;
        } else if present.contains_key(*key) {
            stats.needs_translation += 1;
        } else {
            stats.missing += 1;
        }
    }
    stats
}

impl AssetsStats {
    fn sort(&mut self, sort_by: StatsSortBy) {
        match sort_by {
            StatsSortBy::LanguageCode => self.languages.sort_by(|a, b| a.language.cmp(&b.language)),
            StatsSortBy::Completeness => self.languages.sort_by(|a, b| {
                b.stats.completeness_percentage()
                    .partial_cmp(&a.stats.completeness_percentage())
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.language.cmp(&b.language))
            }),
        }
    }

    fn print_stats_plain_table(&self) {
        println!("| No. | Lang   | Completeness | Translated | Needs translation | Missing |");
        println!("| --- | ------ | ------------ | ---------- | ----------------- | ------- |");
        println!("|   0 | {0:>6} | {1:>11.2}% | {2:10} | {3:17} | {4:7} |",
            self.base_language, 100.0, self.base_keys, 0, 0);
        for (idx, language) in self.languages.iter().enumerate() {
            let stats = &language.stats;
            println!("| {0:3} | {1:>6} | {2:>11.2}% | {3:10} | {4:17} | {5:7} |",
                idx + 1, language.language, stats.completeness_percentage(), stats.translated, stats.needs_translation, stats.missing);
        }
    }

    fn print_stats_json(&self) -> Result<(), serde_json::Error> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(())
    }
}

fn collect_assets_stats(layout: &AssetLayout, sort_by: StatsSortBy) -> Result<AssetsStats, CmdError> {
    let base_entries = parse_entries(&layout.read_base_file()?);
    let base_keys = ordered_keys(&base_entries);

    let mut assets_stats = AssetsStats {
        assets_dir: layout.assets_dir.clone(),
        base_language: layout.base_language.clone(),
        base_keys: base_keys.len(),
        ..Default::default()
    };
    for (language, file_path) in layout.scan_languages()? {
        if layout.is_base_language(&language) {
            continue;
        }
        let target_entries = parse_entries(&read_asset_file(&file_path)?);
        let stats = compute_entry_stats(&base_keys, &target_entries);
        assets_stats.languages.push(LanguageStats { language, file_path, stats });
    }
    assets_stats.sort(sort_by);
    Ok(assets_stats)
}

pub fn subcmd_statistics(layout: &AssetLayout, format: StatsFormat, sort_by: StatsSortBy) -> Result<(), CmdError> {
    let assets_stats = collect_assets_stats(layout, sort_by)?;
    match format {
        StatsFormat::PlainTable => assets_stats.print_stats_plain_table(),
        StatsFormat::Json => assets_stats.print_stats_json()?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset_file::entry::tests::{TEST_EN_CONTENT, TEST_FR_CONTENT};

    #[test]
    fn tst_compute_entry_stats() {
        let base_entries = parse_entries(TEST_EN_CONTENT);
        let base_keys = ordered_keys(&base_entries);
        let stats = compute_entry_stats(&base_keys, &parse_entries(TEST_FR_CONTENT));
        assert_eq!(stats, EntryStats { translated: 2, needs_translation: 1, missing: 1 });
        assert_eq!(stats.completeness_percentage(), 50.0);
    }

    #[test]
    fn tst_sort_by_completeness() {
        let lang_stats = |language: &str, translated: u64| LanguageStats {
            language: language.to_string(),
            file_path: PathBuf::from(format!("{language}.txt")),
            stats: EntryStats { translated, needs_translation: 4 - translated, missing: 0 },
        };
        let mut assets_stats = AssetsStats {
            languages: vec![lang_stats("de", 1), lang_stats("fr", 4), lang_stats("es", 1), lang_stats("it", 2)],
            ..Default::default()
        };
        assets_stats.sort(StatsSortBy::Completeness);
        let order: Vec<&str> = assets_stats.languages.iter().map(|l| l.language.as_str()).collect();
        assert_eq!(order, vec!["fr", "it", "de", "es"]);

        assets_stats.sort(StatsSortBy::LanguageCode);
        let order: Vec<&str> = assets_stats.languages.iter().map(|l| l.language.as_str()).collect();
        assert_eq!(order, vec!["de", "es", "fr", "it"]);
    }

    #[test]
    fn tst_collect_assets_stats() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("en.txt"), TEST_EN_CONTENT).unwrap();
        std::fs::write(dir.path().join("fr.txt"), TEST_FR_CONTENT).unwrap();
        std::fs::write(dir.path().join("de.txt"), "greeting = [[Hallo]]\nfarewell = [[Tschüss]]\ntitle = [[Spieltitel]]\n").unwrap();
        let layout = AssetLayout::new(dir.path(), "en", "txt");

        let assets_stats = collect_assets_stats(&layout, StatsSortBy::Completeness).unwrap();
        assert_eq!(assets_stats.base_language, "en");
        assert_eq!(assets_stats.base_keys, 4);
        let order: Vec<&str> = assets_stats.languages.iter().map(|l| l.language.as_str()).collect();
        assert_eq!(order, vec!["de", "fr"]);
        assert_eq!(assets_stats.languages[0].stats, EntryStats { translated: 3, needs_translation: 0, missing: 1 });
        assert_eq!(assets_stats.languages[1].stats, EntryStats { translated: 2, needs_translation: 1, missing: 1 });

        let json = serde_json::to_value(&assets_stats).unwrap();
        assert_eq!(json["base_keys"], 4);
        assert_eq!(json["languages"][0]["language"], "de");
        assert_eq!(json["languages"][1]["language"], "fr");
        assert_eq!(json["languages"][1]["stats"]["translated"], 2);
        assert_eq!(json["languages"][1]["stats"]["needs_translation"], 1);
        assert_eq!(json["languages"][1]["stats"]["missing"], 1);
        assert!(json["languages"][1]["file_path"].as_str().unwrap().ends_with("fr.txt"));

        let assets_stats = collect_assets_stats(&layout, StatsSortBy::LanguageCode).unwrap();
        let order: Vec<&str> = assets_stats.languages.iter().map(|l| l.language.as_str()).collect();
        assert_eq!(order, vec!["de", "fr"]);
    }

    #[test]
    fn tst_statistics_missing_base_file() {
        let dir = tempfile::tempdir().unwrap();
        let layout = AssetLayout::new(dir.path(), "en", "txt");
        let result = subcmd_statistics(&layout, StatsFormat::Json, StatsSortBy::Completeness);
        assert!(matches!(result, Err(CmdError::LoadAssets(AssetLoadError::BaseFileNotFound(_)))));
    }
}
