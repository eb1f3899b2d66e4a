// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

// POEditor API doc: https://poeditor.com/docs/api

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error as TeError;
use tracing::debug;

pub const DEFAULT_API_BASE: &str = "https://api.poeditor.com/v2";

pub struct PoEditorRestApi {
    api_base: String,
    project_id: String,
    token: String,
}

#[derive(TeError, Debug)]
pub enum PoEditorRestApiError {
    #[error("Error making request: {0}")]
    Ureq(#[from] ureq::Error),
    #[error("Error parsing response: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("POEditor API returned error {code}: {message}")]
    Api { code: String, message: String },
    #[error("POEditor API response has no result")]
    MissingResult,
}

#[derive(Deserialize, Debug)]
struct ApiStatus {
    status: String,
    code: String,
    message: String,
}

/// Every POEditor endpoint wraps its payload as `{"response": ..., "result": ...}`.
#[derive(Deserialize, Debug)]
struct ApiResponse<T> {
    response: ApiStatus,
    result: Option<T>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Language {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub translations: u64,
    #[serde(default)]
    pub percentage: f64,
    #[serde(default)]
    pub updated: Option<String>,
}

/// A project term. Fields other than `term` are kept as-is so they are
/// written back unchanged.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Term {
    pub term: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One entry of a per-language JSON export.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct TranslationRecord {
    pub term: String,
    /// A string, `null` when untranslated, or an object for plural terms.
    pub definition: Option<serde_json::Value>,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub term_plural: String,
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub comment: String,
}

impl TranslationRecord {
    pub fn definition_text(&self) -> Option<&str> {
        self.definition.as_ref().and_then(|d| d.as_str())
    }
}

#[derive(Deserialize, Debug)]
struct TermsResult {
    terms: Vec<Term>,
}

#[derive(Deserialize, Debug)]
struct LanguagesResult {
    languages: Vec<Language>,
}

#[derive(Deserialize, Debug)]
struct ExportResult {
    url: String,
}

/// Unwrap the `result` of a POEditor response, turning a failed status into an error.
pub fn parse_api_response<T: DeserializeOwned>(text: &str) -> Result<T, PoEditorRestApiError> {
    let resp = serde_json::from_str::<ApiResponse<T>>(text)?;
    if resp.response.status != "success" {
        return Err(PoEditorRestApiError::Api {
            code: resp.response.code,
            message: resp.response.message,
        });
    }
    resp.result.ok_or(PoEditorRestApiError::MissingResult)
}

impl PoEditorRestApi {
    pub fn new(api_base: &str, project_id: &str, token: &str) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            project_id: project_id.to_string(),
            token: token.to_string(),
        }
    }

    fn post<T: DeserializeOwned>(&self, endpoint: &str, extra_fields: &[(&str, &str)]) -> Result<T, PoEditorRestApiError> {
        let url = format!("{}{endpoint}", self.api_base);
        debug!("POST {url}");
        let mut form = vec![("id", self.project_id.as_str()), ("api_token", self.token.as_str())];
        form.extend_from_slice(extra_fields);
        let mut resp = ureq::post(&url).send_form(form)?;
        let resp_text = resp.body_mut().read_to_string()?;
        parse_api_response(&resp_text)
    }

    pub fn list_terms(&self) -> Result<Vec<Term>, PoEditorRestApiError> {
        Ok(self.post::<TermsResult>("/terms/list", &[])?.terms)
    }

    pub fn list_languages(&self) -> Result<Vec<Language>, PoEditorRestApiError> {
        Ok(self.post::<LanguagesResult>("/languages/list", &[])?.languages)
    }

    /// Request a JSON export of one language, then download it.
    pub fn export_language(&self, language_code: &str) -> Result<Vec<TranslationRecord>, PoEditorRestApiError> {
        let export = self.post::<ExportResult>("/projects/export", &[("language", language_code), ("type", "json")])?;
        debug!("GET {}", export.url);
        let mut resp = ureq::get(&export.url).call()?;
        let resp_text = resp.body_mut().read_to_string()?;
        Ok(serde_json::from_str(&resp_text)?)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    pub const TEST_EXPORT_RESPONSE: &str = r#"[
    {
        "term": "greeting",
        "definition": "Bonjour",
        "context": "",
        "term_plural": "",
        "reference": "",
        "comment": ""
    },
    {
        "term": "farewell",
        "definition": null,
        "context": "",
        "term_plural": "",
        "reference": "",
        "comment": ""
    },
    {
        "term": "apples",
        "definition": {"one": "une pomme", "other": "des pommes"},
        "context": "",
        "term_plural": "apples_plural",
        "reference": "",
        "comment": ""
    }
]"#;

    #[test]
    fn tst_parse_languages_response() {
        let resp_text = r#"{
    "response": {"status": "success", "code": "200", "message": "OK"},
    "result": {
        "languages": [
            {"name": "French", "code": "fr", "translations": 120, "percentage": 98.36, "updated": "2024-05-01T10:00:00+0000"},
            {"name": "German", "code": "de", "translations": 0, "percentage": 0, "updated": ""}
        ]
    }
}"#;
        let result: LanguagesResult = parse_api_response(resp_text).unwrap();
        assert_eq!(result.languages.len(), 2);
        assert_eq!(result.languages[0].code, "fr");
        assert_eq!(result.languages[0].translations, 120);
        assert_eq!(result.languages[1].percentage, 0.0);
    }

    #[test]
    fn tst_parse_terms_response() {
        let resp_text = r#"{
    "response": {"status": "success", "code": "200", "message": "OK"},
    "result": {
        "terms": [
            {"term": "greeting", "context": "", "plural": "", "tags": ["menu"]},
            {"term": "farewell", "context": "", "plural": "", "tags": []}
        ]
    }
}"#;
        let result: TermsResult = parse_api_response(resp_text).unwrap();
        let terms: Vec<&str> = result.terms.iter().map(|t| t.term.as_str()).collect();
        assert_eq!(terms, vec!["greeting", "farewell"]);
        assert_eq!(result.terms[0].extra["tags"], serde_json::json!(["menu"]));
    }

    #[test]
    fn tst_parse_export_response() {
        let resp_text = r#"{
    "response": {"status": "success", "code": "200", "message": "OK"},
    "result": {"url": "https://api.poeditor.com/v2/download/file/abc"}
}"#;
        let result: ExportResult = parse_api_response(resp_text).unwrap();
        assert_eq!(result.url, "https://api.poeditor.com/v2/download/file/abc");

        let records: Vec<TranslationRecord> = serde_json::from_str(TEST_EXPORT_RESPONSE).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].definition_text(), Some("Bonjour"));
        assert_eq!(records[1].definition_text(), None);
        assert_eq!(records[2].definition_text(), None);
        assert_eq!(records[2].term_plural, "apples_plural");
    }

    #[test]
    fn tst_parse_failed_response() {
        let resp_text = r#"{"response": {"status": "fail", "code": "4012", "message": "Invalid API Token"}}"#;
        let result = parse_api_response::<TermsResult>(resp_text);
        assert!(matches!(
            result,
            Err(PoEditorRestApiError::Api { ref code, .. }) if code == "4012"
        ));

        let resp_text = r#"{"response": {"status": "success", "code": "200", "message": "OK"}}"#;
        assert!(matches!(parse_api_response::<TermsResult>(resp_text), Err(PoEditorRestApiError::MissingResult)));
    }
}
