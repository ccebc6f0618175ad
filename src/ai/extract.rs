//! Response text extraction and score parsing
//!
//! Chat Completions replies are read from `choices[0].message.content`.
//! Responses API replies are far less uniform across providers: `output_text`
//! may be a string, a list, or an object, and some providers leave it empty
//! and only fill `output[].content[].text`. Everything is normalised through
//! [`OutputText`] and an empty result at any level counts as absent.

use serde_json::Value;

use crate::core::models::Schema;

/// The shapes a Responses API text field is seen in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputText {
    Text(String),
    List(Vec<OutputText>),
    Object(Vec<(String, OutputText)>),
}

impl OutputText {
    /// Converts JSON into the union. Numbers, booleans and null have no text and map to `None`.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Array(items) => Some(Self::List(items.iter().filter_map(Self::from_value).collect())),
            Value::Object(map) => Some(Self::Object(
                map.iter()
                    .filter_map(|(k, v)| Self::from_value(v).map(|t| (k.clone(), t)))
                    .collect(),
            )),
            Value::Null | Value::Bool(_) | Value::Number(_) => None,
        }
    }

    /// Flattens to trimmed text, joining non-empty parts with newlines.
    #[must_use]
    pub fn normalize(&self) -> Option<String> {
        match self {
            Self::Text(s) => non_empty(s),
            Self::List(items) => join_parts(items.iter()),
            Self::Object(fields) => join_parts(fields.iter().map(|(_, v)| v)).or_else(|| {
                fields.iter().find_map(|(k, v)| match v {
                    Self::Text(s) if k == "value" => non_empty(s),
                    _ => None,
                })
            }),
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn join_parts<'a>(items: impl Iterator<Item = &'a OutputText>) -> Option<String> {
    let parts: Vec<String> = items.filter_map(OutputText::normalize).collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n"))
    }
}

fn normalize_value(value: &Value) -> Option<String> {
    OutputText::from_value(value).and_then(|t| t.normalize())
}

/// Pulls the model's reply text out of a decoded body, or `None` when the
/// expected shape is missing.
#[must_use]
pub fn extract_text(schema: Schema, body: &Value) -> Option<String> {
    match schema {
        Schema::ChatCompletions => body
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string()),
        Schema::Responses => extract_responses_text(body),
    }
}

fn extract_responses_text(body: &Value) -> Option<String> {
    if let Some(text) = body.get("output_text").and_then(normalize_value) {
        return Some(text);
    }

    body.get("output")
        .and_then(Value::as_array)?
        .iter()
        .filter_map(|item| item.get("content").and_then(Value::as_array))
        .flatten()
        .find_map(|part| part.get("text").and_then(normalize_value))
}

/// Strips every non-digit and reads what remains as a 0..=100 score.
///
/// Multi-number replies concatenate (`"8 out of 100"` reads as `8100` and is
/// rejected); callers depend on this exact behaviour.
#[must_use]
pub fn parse_score(text: &str) -> Option<u8> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    // Anything too long for u64 is out of range anyway.
    digits
        .parse::<u64>()
        .ok()
        .filter(|n| *n <= 100)
        .and_then(|n| u8::try_from(n).ok())
}
