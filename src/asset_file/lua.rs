// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use super::table::TranslationTable;

const INDENT: &str = "    ";
const TABLE_NAME: &str = "translations";
const TERM_KEYS_ALIAS: &str = "TranslationKeys";

const LUA_KEYWORDS: &[&str] = &[
    "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "goto", "if", "in",
    "local", "nil", "not", "or", "repeat", "return", "then", "true", "until", "while",
];

/// Escape text so it can sit between double quotes in Lua source.
///
/// JSON string escaping covers quotes, backslashes and line breaks the same
/// way Lua reads them.
pub fn encode_lua_string(text: &str) -> Result<String, serde_json::Error> {
    let quoted = serde_json::to_string(text)?;
    Ok(quoted
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(&quoted)
        .to_string())
}

fn is_lua_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !LUA_KEYWORDS.contains(&name)
}

/// `name` for plain identifiers, `["name"]` otherwise.
fn lua_field(name: &str) -> Result<String, serde_json::Error> {
    if is_lua_identifier(name) {
        Ok(name.to_string())
    } else {
        Ok(format!("[\"{}\"]", encode_lua_string(name)?))
    }
}

fn lua_index(table: &str, name: &str) -> Result<String, serde_json::Error> {
    if is_lua_identifier(name) {
        Ok(format!("{table}.{name}"))
    } else {
        Ok(format!("{table}{}", lua_field(name)?))
    }
}

/// Render the whole table as a Lua module returning `translations`.
///
/// Values are trimmed before being encoded.
pub fn render_lua_table(table: &TranslationTable) -> Result<String, serde_json::Error> {
    let mut language_chunks = vec![];
    for (language, entries) in table.iter() {
        let mut entry_chunks = vec![];
        for (key, value) in entries {
            entry_chunks.push(format!("{} = \"{}\"", lua_field(key)?, encode_lua_string(value.trim())?));
        }
        let body = if entry_chunks.is_empty() {
            String::new()
        } else {
            format!("{INDENT}{}", entry_chunks.join(format!(",\n{INDENT}").as_str()))
        };
        language_chunks.push(format!("{} = {{\n{body}\n}}", lua_index(TABLE_NAME, language)?));
    }

    Ok(format!(
        "local {TABLE_NAME} = {{}}\n\n{}\n\nreturn {TABLE_NAME}\n",
        language_chunks.join("\n\n"),
    ))
}

/// Render an EmmyLua alias listing every key, in the given order.
pub fn render_term_keys<S: AsRef<str>>(keys: &[S]) -> String {
    let mut lines = vec![format!("--- @alias {TERM_KEYS_ALIAS}")];
    lines.extend(keys.iter().map(|key| format!("---| '\"{}\"'", key.as_ref())));
    lines.join("\n")
}
