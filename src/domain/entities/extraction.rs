//! SLA records pulled out of a document.
//!
//! Model replies are loose about types, so the deserializers here accept the
//! shapes models actually emit (null text, a bare string instead of a list,
//! page numbers as strings) and normalize them.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExtractedRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub sla_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub parties_involved: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub system_concerned: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub associated_metrics: Vec<String>,
    #[serde(default, deserialize_with = "lenient_page_number")]
    pub page_number: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExtractionResult {
    #[serde(default)]
    pub docs_info: Vec<ExtractedRecord>,
}

impl ExtractionResult {
    pub fn new(docs_info: Vec<ExtractedRecord>) -> Self {
        Self { docs_info }
    }

    pub fn is_empty(&self) -> bool {
        self.docs_info.is_empty()
    }
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(value).unwrap_or_default())
}

fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let metrics = match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(scalar_to_string)
            .filter(|s| !s.trim().is_empty())
            .collect(),
        Value::String(s) if s.trim().is_empty() => Vec::new(),
        Value::Null => Vec::new(),
        other => scalar_to_string(other).into_iter().collect(),
    };
    Ok(metrics)
}

fn lenient_page_number<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let page = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(|n| i32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    };
    Ok(page)
}
