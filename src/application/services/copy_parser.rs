//! Parsing of free-form text-generation replies.
//!
//! Model output drifts: fenced code blocks, prose around the payload, missing
//! keys. Everything here returns `None` instead of failing so callers can fall
//! back to static copy.

use serde::Deserialize;
use serde_json::Value;

pub const MAX_SUBJECT_ALTERNATIVES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEmailContent {
    pub subject: String,
    pub content: String,
    pub preview_text: String,
}

#[derive(Deserialize)]
struct RawEmailContent {
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default, rename = "previewText", alias = "preview_text")]
    preview_text: Option<String>,
}

/// Removes a surrounding Markdown code fence (with or without a language tag).
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    let inner = inner.trim_end();
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

/// Expects a JSON object with `subject`, `content` and optionally `previewText`.
/// A missing preview falls back to the subject; missing or blank subject/content is a failure.
pub fn parse_email_content(raw: &str) -> Option<ParsedEmailContent> {
    let value = parse_json(raw, '{', '}')?;
    let parsed: RawEmailContent = serde_json::from_value(value).ok()?;

    let subject = non_blank(parsed.subject)?;
    let content = non_blank(parsed.content)?;
    let preview_text = non_blank(parsed.preview_text).unwrap_or_else(|| subject.clone());

    Some(ParsedEmailContent {
        subject,
        content,
        preview_text,
    })
}

/// Expects a JSON array of strings, or an object holding one under `alternatives`/`subjects`.
/// Blank and duplicate entries are dropped and the list is capped.
pub fn parse_subject_alternatives(raw: &str) -> Option<Vec<String>> {
    let value = parse_json(raw, '[', ']').or_else(|| parse_json(raw, '{', '}'))?;
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map
            .remove("alternatives")
            .or_else(|| map.remove("subjects"))
        {
            Some(Value::Array(items)) => items,
            _ => return None,
        },
        _ => return None,
    };

    let mut alternatives: Vec<String> = Vec::new();
    for item in items {
        let Value::String(text) = item else {
            continue;
        };
        let text = text.trim().to_string();
        if !text.is_empty() && !alternatives.contains(&text) {
            alternatives.push(text);
        }
        if alternatives.len() == MAX_SUBJECT_ALTERNATIVES {
            break;
        }
    }

    (!alternatives.is_empty()).then_some(alternatives)
}

fn parse_json(raw: &str, open: char, close: char) -> Option<Value> {
    let body = strip_code_fences(raw);
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        return matches_shape(&value, open).then_some(value);
    }

    // prose around the payload: try the outermost delimited span
    let start = body.find(open)?;
    let end = body.rfind(close)?;
    if end <= start {
        return None;
    }
    let value = serde_json::from_str::<Value>(&body[start..=end]).ok()?;
    matches_shape(&value, open).then_some(value)
}

fn matches_shape(value: &Value, open: char) -> bool {
    match open {
        '{' => value.is_object(),
        '[' => value.is_array(),
        _ => false,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
