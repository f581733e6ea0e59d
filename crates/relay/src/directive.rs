//! Model directive parsing.
//!
//! A user turn may open with `[Model: <identifier>]` followed by a
//! blank line to select a non-default model for that call. The parser
//! strips the directive and returns the identifier verbatim; whether
//! the identifier is actually known is the router's concern, not ours.
//! Parsing never fails; anything that doesn't match the pattern
//! exactly passes through untouched.

use compact_str::CompactString;

/// Opening marker of a model directive.
const OPEN: &str = "[Model: ";
/// Mandatory separator between the directive and the real content.
const SEPARATOR: &str = "\n\n";

/// Result of scanning a user turn for a leading model directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    /// The captured identifier, verbatim and case-sensitive.
    pub model: Option<CompactString>,
    /// The turn content with the directive stripped.
    pub content: String,
}

impl Parsed {
    fn passthrough(content: &str) -> Self {
        Self {
            model: None,
            content: content.to_owned(),
        }
    }
}

/// Scan a user turn's text for a leading model directive.
///
/// The directive must sit at the very start of the content and be
/// followed immediately by a blank line; the identifier is the
/// substring between `Model: ` and the closing bracket.
pub fn parse(content: &str) -> Parsed {
    let Some(rest) = content.strip_prefix(OPEN) else {
        return Parsed::passthrough(content);
    };
    let Some(close) = rest.find(']') else {
        return Parsed::passthrough(content);
    };

    let identifier = &rest[..close];
    if identifier.is_empty() {
        return Parsed::passthrough(content);
    }
    let Some(body) = rest[close + 1..].strip_prefix(SEPARATOR) else {
        return Parsed::passthrough(content);
    };

    Parsed {
        model: Some(identifier.into()),
        content: body.to_owned(),
    }
}

/// Scan a wire-level turn whose content may not be plain text.
///
/// Non-string payloads (content-block arrays, objects) resolve to the
/// default model and empty content rather than passing through.
pub fn parse_value(content: &serde_json::Value) -> Parsed {
    match content.as_str() {
        Some(text) => parse(text),
        None => Parsed {
            model: None,
            content: String::new(),
        },
    }
}
