// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use std::path::Path;
use thiserror::Error as TeError;

use crate::poeditor::export_dir::{ExportDir, ExportDirError};
use crate::poeditor::rest_api::{PoEditorRestApi, PoEditorRestApiError};

#[derive(TeError, Debug)]
pub enum CmdError {
    #[error("Fail to fetch from POEditor because: {0}")]
    RestApi(#[from] PoEditorRestApiError),
    #[error("Fail to store POEditor data because: {0}")]
    ExportDir(#[from] ExportDirError),
}

pub fn subcmd_fetch(api: &PoEditorRestApi, output_dir: &Path) -> Result<(), CmdError> {
    let export_dir = ExportDir::new(output_dir);

    let terms = api.list_terms()?;
    export_dir.save_terms(&terms)?;
    println!("Fetched {} terms.", terms.len());

    let languages = api.list_languages()?;
    export_dir.save_languages(&languages)?;

    export_dir.reset_exports()?;
    for language in &languages {
        println!(" - Fetching {} ({})", language.code, language.name);
        let records = api.export_language(&language.code)?;
        export_dir.save_export(&language.code, &records)?;
    }
    println!("Fetched {} languages into {output_dir:?}.", languages.len());

    Ok(())
}
