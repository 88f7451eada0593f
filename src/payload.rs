//! Bot reply payloads, classified once at the JSON boundary.

use serde_json::Value;
use thiserror::Error;

/// Field carrying the reply text
const RESPONSE_FIELD: &str = "response";
/// Field carrying an optional track link
const MEDIA_FIELD: &str = "spotify_url";

/// A reply from the recommendation backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotPayload {
    /// Text only; a track link may still be embedded in the text
    PlainText(String),
    /// Text plus an explicit (possibly invalid) media reference
    Structured {
        text: String,
        media_ref: Option<String>,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("reply object has neither a `response` nor a `spotify_url` field")]
    MissingResponse,
    #[error("reply is a JSON {0}, expected a string or an object")]
    UnsupportedShape(&'static str),
}

impl BotPayload {
    /// Decide the payload variant from a decoded JSON reply.
    pub fn from_json(value: Value) -> Result<Self, PayloadError> {
        match value {
            Value::String(text) => Ok(Self::PlainText(text)),
            Value::Object(mut map) => {
                let has_response = map.contains_key(RESPONSE_FIELD);
                let text = match map.remove(RESPONSE_FIELD) {
                    Some(Value::String(s)) => s,
                    _ => String::new(),
                };
                match map.remove(MEDIA_FIELD) {
                    Some(media) => Ok(Self::Structured {
                        text,
                        media_ref: media.as_str().map(str::to_string),
                    }),
                    None if has_response => Ok(Self::PlainText(text)),
                    None => Err(PayloadError::MissingResponse),
                }
            }
            Value::Null => Err(PayloadError::UnsupportedShape("null")),
            Value::Bool(_) => Err(PayloadError::UnsupportedShape("boolean")),
            Value::Number(_) => Err(PayloadError::UnsupportedShape("number")),
            Value::Array(_) => Err(PayloadError::UnsupportedShape("array")),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::PlainText(text) => text,
            Self::Structured { text, .. } => text,
        }
    }

    /// The explicit media reference, if the payload carries one
    pub fn media_ref(&self) -> Option<&str> {
        match self {
            Self::PlainText(_) => None,
            Self::Structured { media_ref, .. } => media_ref.as_deref(),
        }
    }
}

impl From<String> for BotPayload {
    fn from(text: String) -> Self {
        Self::PlainText(text)
    }
}

impl From<&str> for BotPayload {
    fn from(text: &str) -> Self {
        Self::PlainText(text.to_string())
    }
}
