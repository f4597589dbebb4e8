//! Best-effort recovery of structure from free-form model replies.
//!
//! None of these functions panic. Patterns are compiled once.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use crate::domain::entities::{ExtractedRecord, ExtractionResult};

static JSON_ARRAY: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\[.*?\]").ok());
static FENCED_BLOCK: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?s)```(.*?)```").ok());

/// Sentinel models emit for fields the document does not state.
pub const NOT_MENTIONED: &str = "Not Mentioned";

#[derive(Debug)]
pub enum ReplyParseError {
    MissingCodeBlock,
    InvalidJson(String),
    UnexpectedShape(String),
}

impl std::fmt::Display for ReplyParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplyParseError::MissingCodeBlock => write!(f, "No fenced code block in model reply"),
            ReplyParseError::InvalidJson(msg) => write!(f, "Invalid JSON in model reply: {}", msg),
            ReplyParseError::UnexpectedShape(msg) => {
                write!(f, "Unexpected JSON shape in model reply: {}", msg)
            }
        }
    }
}

impl std::error::Error for ReplyParseError {}

/// First `[...]` span on a single line, parsed as a JSON array. Only string
/// elements are kept.
pub fn extract_json_array(reply: &str) -> Option<Vec<String>> {
    let re = JSON_ARRAY.as_ref()?;
    let span = re.find(reply)?;
    let value: Value = serde_json::from_str(span.as_str()).ok()?;
    let items = value.as_array()?;
    Some(
        items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
    )
}

/// Body of the first triple-backtick block.
pub fn extract_fenced_block(reply: &str) -> Option<&str> {
    let re = FENCED_BLOCK.as_ref()?;
    re.captures(reply)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Drops one leading `json` language tag.
pub fn strip_language_tag(block: &str) -> &str {
    let trimmed = block.trim_start();
    trimmed
        .strip_prefix("json")
        .or_else(|| trimmed.strip_prefix("JSON"))
        .unwrap_or(trimmed)
}

/// Replaces the `Not Mentioned` sentinel with an empty JSON string.
///
/// Both the quoted form (`"Not Mentioned"`) and a bare occurrence become `""`,
/// so a reply like `{"page_number": Not Mentioned}` turns into valid JSON.
/// Sentinels embedded inside longer strings are replaced too, leaving an
/// empty-quoted fragment; this matches how such replies were always cleaned.
pub fn sanitize_sentinels(text: &str) -> String {
    let quoted = format!("\"{}\"", NOT_MENTIONED);
    text.replace(&quoted, "\"\"")
        .replace(NOT_MENTIONED, "\"\"")
}

/// Parses a free-text extraction reply into records.
pub fn parse_extraction_reply(reply: &str) -> Result<ExtractionResult, ReplyParseError> {
    let block = extract_fenced_block(reply).ok_or(ReplyParseError::MissingCodeBlock)?;
    let cleaned = sanitize_sentinels(strip_language_tag(block));
    let value: Value = serde_json::from_str(cleaned.trim())
        .map_err(|e| ReplyParseError::InvalidJson(e.to_string()))?;
    extraction_from_value(value)
}

/// Accepts a record list, a `docs_info` envelope or a single record.
pub fn extraction_from_value(value: Value) -> Result<ExtractionResult, ReplyParseError> {
    match value {
        Value::Array(_) => {
            let records: Vec<ExtractedRecord> = serde_json::from_value(value)
                .map_err(|e| ReplyParseError::UnexpectedShape(e.to_string()))?;
            Ok(ExtractionResult::new(records))
        }
        Value::Object(ref map) if map.contains_key("docs_info") => serde_json::from_value(value)
            .map_err(|e| ReplyParseError::UnexpectedShape(e.to_string())),
        Value::Object(_) => {
            let record: ExtractedRecord = serde_json::from_value(value)
                .map_err(|e| ReplyParseError::UnexpectedShape(e.to_string()))?;
            Ok(ExtractionResult::new(vec![record]))
        }
        other => Err(ReplyParseError::UnexpectedShape(format!(
            "expected object or array, got {}",
            other
        ))),
    }
}
