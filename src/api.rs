use crate::engine::{self, DecodeDetails, Grammar, NumericPolicy};
use crate::error::Result;
use serde_json::Value;

/// Options that affect decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Handling of numeric captures without a numeric prefix.
    pub numeric: NumericPolicy,
}

/// Result from [`decode_verbose_with`].
#[derive(Debug, Clone)]
pub struct DecodeResult {
    /// The decoded session tree.
    pub session: Value,
    /// What happened to each input line.
    pub details: DecodeDetails,
}

/// Decode `text` with the built-in SDP grammar and default [`Options`].
///
/// Never fails: lines that cannot be decoded are dropped. The result is always
/// an object with a `media` array (possibly empty).
///
/// # Example
/// ```
/// let tree = sdpform::decode("v=0\r\no=- 123 1 IN IP4 127.0.0.1\r\ns=-\r\n");
/// assert_eq!(tree["version"], 0);
/// assert_eq!(tree["origin"]["sessionId"], 123);
/// assert_eq!(tree["media"], serde_json::json!([]));
/// ```
pub fn decode(text: &str) -> Value {
    decode_with(text, Grammar::sdp(), &Options::default())
}

/// Decode `text` with the provided `grammar`/`options`.
pub fn decode_with(text: &str, grammar: &Grammar, options: &Options) -> Value {
    engine::Decoder::new(grammar, options).run(text).session
}

/// Decode `text` and also return per-line diagnostics.
///
/// Use this to find out which lines were dropped and why; the default
/// [`decode_with`] path discards this information.
pub fn decode_verbose_with(text: &str, grammar: &Grammar, options: &Options) -> DecodeResult {
    let run = engine::Decoder::new(grammar, options).run(text);
    DecodeResult { session: run.session, details: run.details }
}

/// Encode a session tree with the built-in SDP grammar.
///
/// Fails only when `session` is not an object. Every line ends with `\r\n`.
pub fn encode(session: &Value) -> Result<String> {
    encode_with(session, Grammar::sdp())
}

/// Encode a session tree with the provided `grammar`.
pub fn encode_with(session: &Value, grammar: &Grammar) -> Result<String> {
    engine::encode_session(session, grammar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SkipReason;
    use serde_json::json;

    #[test]
    fn decode_returns_session_tree() {
        let tree = decode("v=0\r\ns=talk\r\nt=0 0\r\n");
        assert_eq!(tree, json!({ "version": 0, "name": "talk", "timing": { "start": 0, "stop": 0 }, "media": [] }));
    }

    #[test]
    fn decode_verbose_reports_dropped_lines() {
        let res = decode_verbose_with("v=0\r\nX garbage\r\ns=-\r\n", Grammar::sdp(), &Options::default());

        assert_eq!(res.session, decode("v=0\r\ns=-\r\n"));
        assert_eq!(res.details.lines, 4);
        assert_eq!(res.details.matched.len(), 2);

        let dropped: Vec<_> = res.details.dropped().collect();
        assert_eq!(dropped.len(), 1);
        assert_eq!(dropped[0].line, 2);
        assert_eq!(dropped[0].reason, SkipReason::Malformed);
    }

    #[test]
    fn encode_rejects_non_objects() {
        assert!(encode(&json!("v=0")).is_err());
        assert!(encode(&Value::Null).is_err());
    }

    #[test]
    fn strict_options_drop_non_numeric_fields() {
        let strict = Options { numeric: NumericPolicy::Strict };
        let tree = decode_with("v=\r\n", Grammar::sdp(), &strict);
        assert_eq!(tree, json!({ "media": [] }));

        let tree = decode_with("v=\r\n", Grammar::sdp(), &Options::default());
        assert_eq!(tree, json!({ "version": 0, "media": [] }));
    }
}
