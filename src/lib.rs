//! Grammar-table-driven SDP transcoder.
//!
//! `sdpform` turns session-description text (`v=0`, `m=audio 49170 RTP/AVP 0`,
//! ...) into a structured [`Value`] tree and renders such a tree back into
//! canonical text. Both directions are driven by one declarative rule table
//! (see [`Grammar`]); the engine itself knows nothing about individual SDP
//! attributes.
//!
//! ```
//! let tree = sdpform::decode("v=0\r\ns=-\r\nm=audio 9 RTP/AVP 0\r\na=rtpmap:0 PCMU/8000\r\n");
//! assert_eq!(tree["media"][0]["rtp"][0]["codec"], "PCMU");
//!
//! let text = sdpform::encode(&tree).unwrap();
//! assert!(text.contains("a=rtpmap:0 PCMU/8000\r\n"));
//! ```

#[macro_use]
mod macros;
mod api;
mod engine;
mod error;
mod rules;
pub mod subfield;

pub use api::{DecodeResult, Options, decode, decode_verbose_with, decode_with, encode, encode_with};
pub use engine::{
    CompiledRule, DecodeDetails, Grammar, MatchedLine, NumericPolicy, RuleSet, SkipReason, SkippedLine, coerce,
};
pub use error::{Error, Result};
pub use serde_json::{Map, Value};

// --- Rule table types --------------------------------------------------------

/// Coercion tag attached to each capture of a rule.
///
/// Tags are written as single characters in rule tables (`s`, `d`, `f`).
/// Any other character is kept as [`TypeTag::Unknown`] and coerces to `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Str,
    Int,
    Float,
    Unknown(char),
}

impl From<char> for TypeTag {
    fn from(c: char) -> Self {
        match c {
            's' => TypeTag::Str,
            'd' => TypeTag::Int,
            'f' => TypeTag::Float,
            other => TypeTag::Unknown(other),
        }
    }
}

/// Computes a line template from the record a rule renders.
pub type TemplateSelector = fn(&Value) -> String;

/// How a rule renders its line back to text.
///
/// Templates use `%s`/`%d` to consume the next argument, `%v` to consume an
/// argument without emitting it, and `%%` for a literal percent sign.
#[derive(Clone, Copy)]
pub enum Template {
    Fixed(&'static str),
    Select(TemplateSelector),
}

impl std::fmt::Debug for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Template::Fixed(s) => f.debug_tuple("Fixed").field(s).finish(),
            Template::Select(_) => f.write_str("Select(<function>)"),
        }
    }
}

/// One way a line of a given type may be decoded and encoded.
///
/// A rule belongs to exactly one line-type character (see [`RuleSet`]). Rules
/// are normally written with the [`rule!`] macro, which fills in the defaults
/// (`(.*)` pattern, `%s` template, `s` type tags).
#[derive(Debug, Clone)]
pub struct Rule {
    /// Field name for a singular record. With `names` empty this holds the
    /// single bare value; otherwise it names a nested object.
    pub name: Option<&'static str>,
    /// Array field name for repeatable records.
    pub push: Option<&'static str>,
    /// Pattern that must match the whole line content (text after `x=`).
    pub pattern: &'static str,
    /// Field name per capture group.
    pub names: &'static [&'static str],
    /// One type tag per capture (or one for a bare value). Empty means every
    /// capture is a string.
    pub types: &'static str,
    pub template: Template,
}

/// Where a matched rule writes its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Placement {
    /// Append a fresh object to the array field.
    Push(&'static str),
    /// Write into the object field, creating it on first use.
    Nested(&'static str),
    /// Write straight onto the destination record.
    Flat,
}

impl Rule {
    /// Short human-readable identifier used in diagnostics.
    pub fn label(&self) -> &'static str {
        self.name.or(self.push).unwrap_or_else(|| self.names.first().copied().unwrap_or("-"))
    }

    pub(crate) fn placement(&self) -> Placement {
        match (self.push, self.name) {
            (Some(push), _) => Placement::Push(push),
            (None, Some(name)) if !self.names.is_empty() => Placement::Nested(name),
            _ => Placement::Flat,
        }
    }

    /// Type tag for capture `idx`; captures without an explicit tag are strings.
    pub(crate) fn tag(&self, idx: usize) -> TypeTag {
        self.types.chars().nth(idx).map(TypeTag::from).unwrap_or(TypeTag::Str)
    }

    /// Number of captures the pattern is expected to declare.
    pub(crate) fn expected_captures(&self) -> usize {
        self.names.len().max(1)
    }
}
