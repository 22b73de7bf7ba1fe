//! Token coercion.
//!
//! Every capture is converted to a typed value according to its rule's
//! [`TypeTag`]. Numeric parsing takes the longest numeric prefix of the token,
//! the way C's `atoi`/`atof` do: `"20ms"` becomes `20` and `"abc"` has no
//! numeric prefix at all.
//!
//! What happens to a token without a numeric prefix is decided by
//! [`NumericPolicy`]:
//!
//! - `Lenient` (default) coerces it to `0` / `0.0`. This never fails but can
//!   hide malformed numeric fields.
//! - `Strict` refuses the token, which makes the decoder treat the rule as not
//!   matching the line.

use crate::TypeTag;
use serde_json::{Number, Value};

/// How numeric captures without a numeric prefix are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumericPolicy {
    /// Unparsable integers become `0`, unparsable floats `0.0`.
    #[default]
    Lenient,
    /// Unparsable numeric tokens reject the rule.
    Strict,
}

/// Convert `token` per `tag` under the lenient policy. Never fails.
///
/// ```
/// use sdpform::{TypeTag, Value, coerce};
///
/// assert_eq!(coerce("8000", TypeTag::Int), Value::from(8000));
/// assert_eq!(coerce("oops", TypeTag::Int), Value::from(0));
/// assert_eq!(coerce("x", TypeTag::Unknown('q')), Value::Null);
/// ```
pub fn coerce(token: &str, tag: TypeTag) -> Value {
    coerce_with(token, tag, NumericPolicy::Lenient).unwrap_or(Value::Null)
}

/// Convert `token` per `tag`. Returns `None` only under [`NumericPolicy::Strict`].
pub(crate) fn coerce_with(token: &str, tag: TypeTag, policy: NumericPolicy) -> Option<Value> {
    match tag {
        TypeTag::Str => Some(Value::String(token.to_string())),
        TypeTag::Int => match (int_prefix(token), policy) {
            (Some(n), _) => Some(Value::from(n)),
            (None, NumericPolicy::Lenient) => Some(Value::from(0)),
            (None, NumericPolicy::Strict) => None,
        },
        TypeTag::Float => match (float_prefix(token), policy) {
            (Some(f), _) => Some(float_value(f)),
            (None, NumericPolicy::Lenient) => Some(float_value(0.0)),
            (None, NumericPolicy::Strict) => None,
        },
        TypeTag::Unknown(_) => Some(Value::Null),
    }
}

/// Leading integer of `s` after optional whitespace and sign. Saturates on overflow.
pub(crate) fn int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut seen = false;
    let mut acc: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        seen = true;
        let d = i64::from(b - b'0');
        acc = if negative { acc.saturating_mul(10).saturating_sub(d) } else { acc.saturating_mul(10).saturating_add(d) };
    }

    seen.then_some(acc)
}

/// Leading decimal floating-point number of `s` after optional whitespace.
pub(crate) fn float_prefix(s: &str) -> Option<f64> {
    let re = regex!(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?");
    let m = re.find(s.trim_start())?;
    m.as_str().parse::<f64>().ok()
}

/// JSON number for `f`; non-finite values degrade to `0.0`.
fn float_value(f: f64) -> Value {
    Number::from_f64(f).or_else(|| Number::from_f64(0.0)).map_or(Value::Null, Value::Number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_pass_through() {
        assert_eq!(coerce("PCMU", TypeTag::Str), Value::from("PCMU"));
        assert_eq!(coerce("", TypeTag::Str), Value::from(""));
    }

    #[test]
    fn integers_use_leading_prefix() {
        assert_eq!(coerce("49170", TypeTag::Int), Value::from(49170));
        assert_eq!(coerce("  -12abc", TypeTag::Int), Value::from(-12));
        assert_eq!(coerce("20.5", TypeTag::Int), Value::from(20));
        assert_eq!(coerce("4611731400430051336", TypeTag::Int), Value::from(4611731400430051336_i64));
        assert_eq!(coerce("99999999999999999999", TypeTag::Int), Value::from(i64::MAX));
    }

    #[test]
    fn lenient_numbers_degrade_to_zero() {
        assert_eq!(coerce("", TypeTag::Int), Value::from(0));
        assert_eq!(coerce("abc", TypeTag::Int), Value::from(0));
        assert_eq!(coerce("-", TypeTag::Int), Value::from(0));
        assert_eq!(coerce("x", TypeTag::Float), Value::from(0.0));
        assert_eq!(coerce("1e999", TypeTag::Float), Value::from(0.0));
    }

    #[test]
    fn floats_use_leading_prefix() {
        assert_eq!(coerce("29.97", TypeTag::Float), Value::from(29.97));
        assert_eq!(coerce(".5fps", TypeTag::Float), Value::from(0.5));
        assert_eq!(coerce("25", TypeTag::Float), Value::from(25.0));
        assert_eq!(coerce("1e3", TypeTag::Float), Value::from(1000.0));
    }

    #[test]
    fn unknown_tags_yield_null() {
        assert_eq!(coerce("1", TypeTag::from('u')), Value::Null);
    }

    #[test]
    fn strict_policy_rejects_non_numeric_tokens() {
        assert_eq!(coerce_with("abc", TypeTag::Int, NumericPolicy::Strict), None);
        assert_eq!(coerce_with("", TypeTag::Float, NumericPolicy::Strict), None);
        assert_eq!(coerce_with("7", TypeTag::Int, NumericPolicy::Strict), Some(Value::from(7)));
        assert_eq!(coerce_with("abc", TypeTag::Str, NumericPolicy::Strict), Some(Value::from("abc")));
    }
}
