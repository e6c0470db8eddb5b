use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    display::{bracketed, js_string, js_truthy},
    error::ProtocolError,
};

pub const CONVERT_PATH: &str = "/convert-measurements";
pub const HISTORY_PATH: &str = "/history";
pub const INPUT_QUERY_PARAM: &str = "input";

/// Interpreted body of a `/convert-measurements` response.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionReply {
    Processed(Vec<Value>),
    Rejected(String),
    Unexpected,
}

impl ConversionReply {
    /// `processed` wins whenever the key is present, even as `[]`; a present
    /// but non-list `processed` is a protocol failure rather than a fallback
    /// to `error`.
    pub fn from_json(body: &Value) -> Result<Self, ProtocolError> {
        if body.is_null() {
            return Err(ProtocolError::NullBody);
        }
        if let Some(processed) = body.get("processed") {
            return match processed {
                Value::Array(values) => Ok(Self::Processed(values.clone())),
                _ => Err(ProtocolError::ProcessedNotList),
            };
        }
        match body.get("error") {
            Some(error) if js_truthy(error) => Ok(Self::Rejected(js_string(error))),
            _ => Ok(Self::Unexpected),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub sequence: String,
    pub processed: Vec<Value>,
}

impl HistoryEntry {
    pub fn display_line(&self) -> String {
        format!(
            "Input: {} → Output: {}",
            self.sequence,
            bracketed(&self.processed)
        )
    }

    fn from_json(index: usize, item: &Value) -> Result<Self, ProtocolError> {
        if item.is_null() {
            return Err(ProtocolError::NullHistoryEntry { index });
        }
        let sequence = item
            .get("sequence")
            .map(js_string)
            .unwrap_or_else(|| "undefined".to_string());
        let processed = match item.get("processed") {
            Some(Value::Array(values)) => values.clone(),
            _ => return Err(ProtocolError::EntryProcessedNotList { index }),
        };
        Ok(Self {
            sequence,
            processed,
        })
    }
}

/// Interprets a `/history` body. An empty result means "no history".
///
/// `history` is only walked when truthy with a positive length, so an
/// object or an empty string reads as empty, while a non-empty string is a
/// failure.
pub fn history_from_json(body: &Value) -> Result<Vec<HistoryEntry>, ProtocolError> {
    if body.is_null() {
        return Err(ProtocolError::NullBody);
    }
    match body.get("history") {
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(index, item)| HistoryEntry::from_json(index, item))
            .collect(),
        Some(Value::String(text)) if !text.is_empty() => Err(ProtocolError::HistoryNotList),
        _ => Ok(Vec::new()),
    }
}
