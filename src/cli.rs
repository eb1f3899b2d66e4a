// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use clap::{Args, Parser, Subcommand};
use thiserror::Error as TeError;

use crate::asset_file::common::AssetLayout;
use crate::poeditor::rest_api::PoEditorRestApi;

#[derive(Debug, Parser)]
#[command(
    version = env!("ASSETS_UTILS_VERSION"),
    about = "A commandline tool to regenerate, compile and inspect key = [[value]] translation asset files.",
    long_about = "A commandline tool to regenerate, compile and inspect key = [[value]] translation asset files.\n\n\
        Without a subcommand, every non-base language file is regenerated from the base language file.",
)]
pub struct Cli {
    #[command(flatten)]
    pub assets: AssetsArgs,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Args)]
pub struct AssetsArgs {
    /// Directory holding one <language>.<extension> asset file per language
    #[arg(long, global = true, default_value = "translations-assets")]
    pub assets_dir: PathBuf,
    /// Language whose file defines key order and fallback texts
    #[arg(long, global = true, default_value = "en")]
    pub base_language: String,
    /// File extension of asset files
    #[arg(long, global = true, default_value = "txt")]
    pub extension: String,
}

impl AssetsArgs {
    fn layout(&self) -> AssetLayout {
        AssetLayout::new(&self.assets_dir, &self.base_language, &self.extension)
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(name = "regen")]
    #[command(
        about = "Regenerates every translated asset file from the base language file",
        long_about = "Regenerates every translated asset file so it follows the base language file line by line.\n\n\
            Keys without a translation get the base text followed by a \"# Needs translation\" comment. \
            Previous files are replaced without backup.",
    )]
    Regen {
        /// Only regenerate these languages. Missing files are created.
        #[arg(short, long, value_delimiter = ',')]
        languages: Vec<String>,
        /// Print what would be written without touching any file.
        #[clap(long, action = clap::ArgAction::SetTrue, default_value_t = false)]
        dry_run: bool,
    },

    #[command(name = "build-lua")]
    #[command(
        about = "Compiles all asset files into one Lua translation table",
        long_about = "Compiles all asset files into one Lua module returning a translation table.\n\n\
            Entries still waiting for a translation are included with their base text.",
    )]
    BuildLua {
        /// Read translations from a directory written by `fetch` instead of the asset files.
        #[arg(long)]
        from_exports: Option<PathBuf>,
        #[arg(short, long, default_value = "src/translations/translations-gen.lua")]
        output: PathBuf,
        /// Also write an EmmyLua alias listing every base language key to this file.
        #[arg(short, long)]
        term_keys_output: Option<PathBuf>,
    },

    #[command(name = "fetch")]
    #[command(
        about = "Downloads terms, languages and per-language exports from POEditor",
        long_about = "Downloads terms, languages and per-language JSON exports of a POEditor project.\n\n\
            Writes terms.json, languages.json and exports/<code>.json under the output directory. \
            Previous exports are removed first.",
    )]
    Fetch {
        /// POEditor project id
        #[arg(long, env = "POEDITOR_PROJECT_ID", default_value = "517589")]
        project_id: String,
        /// Read-only POEditor API token
        #[arg(long, env = "POEDITOR_RO_KEY", hide_env_values = true)]
        api_token: String,
        #[arg(short, long, default_value = "i18n")]
        output_dir: PathBuf,
        #[arg(long, default_value = crate::poeditor::rest_api::DEFAULT_API_BASE)]
        api_base: String,
    },

    #[command(name = "statistics")]
    #[command(about = "Prints how many base language keys each language has translated")]
    Statistics {
        #[clap(short, long, default_value_t, value_enum)]
        format: crate::subcmd::statistics::StatsFormat,
        #[clap(short, long, default_value_t, value_enum)]
        sort_by: crate::subcmd::statistics::StatsSortBy,
    },
}

#[derive(TeError, Debug)]
#[error("{0}")]
pub enum CliError {
    Regen(#[from] crate::subcmd::regen::CmdError),
    BuildLua(#[from] crate::subcmd::build_lua::CmdError),
    Statistics(#[from] crate::subcmd::statistics::CmdError),
    Fetch(#[from] crate::subcmd::fetch::CmdError),
}

pub fn execute() -> Result<(), CliError> {
    let args = Cli::parse();
    let layout = args.assets.layout();

    use crate::subcmd;
    match args.command {
        None => {
            subcmd::subcmd_regen(&layout, &[], false)?;
        },
        Some(Commands::Regen { languages, dry_run }) => {
            subcmd::subcmd_regen(&layout, &languages, dry_run)?;
        },
        Some(Commands::BuildLua { from_exports, output, term_keys_output }) => {
            subcmd::subcmd_build_lua(&layout, from_exports.as_deref(), &output, term_keys_output.as_deref())?;
        },
        Some(Commands::Fetch { project_id, api_token, output_dir, api_base }) => {
            let api = PoEditorRestApi::new(&api_base, &project_id, &api_token);
            subcmd::subcmd_fetch(&api, &output_dir)?;
        },
        Some(Commands::Statistics { format, sort_by }) => {
            subcmd::subcmd_statistics(&layout, format, sort_by)?;
        },
    }

    Ok(())
}
