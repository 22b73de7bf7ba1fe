//! Error type shared by the encoder, the grammar compiler and the strict
//! sub-field decoders.
//!
//! Decoding never fails: lines that cannot be decoded are skipped and reported
//! through [`DecodeDetails`](crate::DecodeDetails) instead.

use std::num::ParseIntError;
use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The value handed to the encoder is not an object.
    #[error("session must be an object, got {found}")]
    NotAnObject { found: &'static str },

    /// A payload-list token is not an integer.
    #[error("invalid payload number '{token}'")]
    InvalidPayload {
        token: String,
        #[source]
        source: ParseIntError,
    },

    /// A rule pattern failed to compile.
    #[error("rule {kind}/{rule}: invalid pattern")]
    Pattern {
        kind: char,
        rule: &'static str,
        #[source]
        source: regex::Error,
    },

    /// A rule's declaration is internally inconsistent.
    #[error("rule {kind}/{rule}: {reason}")]
    RuleShape { kind: char, rule: &'static str, reason: String },
}

/// Name of a JSON value's kind, for error messages.
pub(crate) fn kind_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
