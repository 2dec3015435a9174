//! Response content after best-effort parsing.

use serde_json::Value;

/// The parsed body of a response: structured data when it is JSON, the raw
/// text otherwise.
///
/// [`parse`] tries the structured interpretation first and falls back to
/// plain text. Empty bodies and non-JSON error pages are expected inputs,
/// not failures: parsing is total.
///
/// [`parse`]: Content::parse
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// The body parsed as a JSON value.
    Structured(Value),
    /// The body taken as plain text (lossy UTF-8).
    Text(String),
}

impl Content {
    /// Parse a response body.
    ///
    /// The JSON attempt reads the buffer without consuming it, so the raw
    /// bytes remain available for the text fallback.
    #[must_use]
    pub fn parse(body: &[u8]) -> Self {
        match serde_json::from_slice(body) {
            Ok(value) => Self::Structured(value),
            Err(_) => Self::Text(String::from_utf8_lossy(body).into_owned()),
        }
    }

    /// Whether the body parsed as structured data.
    #[must_use]
    pub const fn is_structured(&self) -> bool {
        matches!(self, Self::Structured(_))
    }

    /// The structured value, when the body parsed as one.
    #[must_use]
    pub const fn as_structured(&self) -> Option<&Value> {
        match self {
            Self::Structured(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// The plain text, when the body fell back to text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Structured(_) => None,
            Self::Text(text) => Some(text),
        }
    }

    /// The body-derived message used on the failure path: compact JSON for
    /// structured content, the text itself otherwise.
    #[must_use]
    pub fn into_message(self) -> String {
        match self {
            Self::Structured(value) => value.to_string(),
            Self::Text(text) => text,
        }
    }
}

impl std::fmt::Display for Content {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Structured(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}
