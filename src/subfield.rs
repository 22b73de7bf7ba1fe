//! Decoders for individual field values.
//!
//! The rule table keeps some attribute values as raw strings (`fmtp` config,
//! `m=` payloads, `imageattr` sets, `simulcast` lists). These helpers split
//! such strings further; callers invoke them explicitly on the fields they
//! care about.

use crate::coerce;
use crate::error::{Error, Result};
use crate::TypeTag;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Decode a `;`-separated `key[=value]` list such as an `fmtp` config.
///
/// Values are typed as integer, then float, then string. A key without a
/// value maps to `""`. Later duplicates overwrite earlier ones.
///
/// ```
/// use serde_json::json;
///
/// let params = sdpform::subfield::decode_params("a=1;b=x;c");
/// assert_eq!(serde_json::Value::Object(params), json!({ "a": 1, "b": "x", "c": "" }));
/// ```
pub fn decode_params(text: &str) -> Map<String, Value> {
    let mut params = Map::new();
    for param in text.split(';').map(str::trim).filter(|p| !p.is_empty()) {
        insert_param(&mut params, param);
    }
    params
}

/// Decode a space-separated list of payload numbers.
///
/// Unlike the other decoders this one is strict: any token that is not an
/// integer fails the whole decode.
pub fn decode_payloads(text: &str) -> Result<Vec<i64>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }
    text.split(' ')
        .map(|token| {
            token.parse::<i64>().map_err(|source| Error::InvalidPayload { token: token.to_string(), source })
        })
        .collect()
}

/// Result of [`decode_image_attributes`].
///
/// A bare `*` means "any"; it is kept distinct from an (empty) list.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageAttributes {
    Wildcard,
    List(Vec<Map<String, Value>>),
}

impl ImageAttributes {
    /// JSON form: the string `"*"` or an array of objects.
    pub fn to_value(&self) -> Value {
        match self {
            ImageAttributes::Wildcard => Value::from("*"),
            ImageAttributes::List(sets) => Value::Array(sets.iter().cloned().map(Value::Object).collect()),
        }
    }
}

/// Decode an `imageattr` set list such as `[x=800,y=640,sar=1.1] [x=480,y=320]`.
///
/// A `*` token anywhere short-circuits to [`ImageAttributes::Wildcard`].
/// Tokens shorter than `[x=0]` are skipped.
pub fn decode_image_attributes(text: &str) -> ImageAttributes {
    let mut sets = Vec::new();

    for item in text.split(' ').map(str::trim) {
        if item == "*" {
            return ImageAttributes::Wildcard;
        }
        if item.len() < 5 {
            continue;
        }

        let mut set = Map::new();
        let inner = item.get(1..item.len() - 1).unwrap_or("");
        for param in inner.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            insert_param(&mut set, param);
        }
        sets.push(set);
    }

    ImageAttributes::List(sets)
}

/// One stream in a simulcast list; `~` marks it paused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulcastStream {
    #[serde(rename = "scid")]
    pub id: String,
    pub paused: bool,
}

/// Decode a simulcast stream list such as `1,~2;3`.
///
/// `;` separates streams, `,` separates alternative formats of one stream.
///
/// ```
/// use sdpform::subfield::{SimulcastStream, decode_simulcast_streams};
///
/// let streams = decode_simulcast_streams("1,~2;3");
/// assert_eq!(streams[0][1], SimulcastStream { id: "2".into(), paused: true });
/// assert_eq!(streams[1].len(), 1);
/// ```
pub fn decode_simulcast_streams(text: &str) -> Vec<Vec<SimulcastStream>> {
    text.split(';')
        .filter(|group| !group.is_empty())
        .map(|group| {
            group
                .split(',')
                .filter(|format| !format.is_empty())
                .map(|format| match format.strip_prefix('~') {
                    Some(id) => SimulcastStream { id: id.to_string(), paused: true },
                    None => SimulcastStream { id: format.to_string(), paused: false },
                })
                .collect()
        })
        .collect()
}

fn insert_param(params: &mut Map<String, Value>, param: &str) {
    let Some(caps) = regex!(r"^\s*([^= ]+)(?:\s*=\s*([^ ]+))?$").captures(param) else {
        return;
    };
    let key = caps.get(1).map_or("", |m| m.as_str());
    let value = caps.get(2).map_or("", |m| m.as_str());

    let tag = if is_int(value) {
        TypeTag::Int
    } else if is_float(value) {
        TypeTag::Float
    } else {
        TypeTag::Str
    };
    params.insert(key.to_string(), coerce(value, tag));
}

fn is_int(s: &str) -> bool {
    s.parse::<i64>().is_ok()
}

fn is_float(s: &str) -> bool {
    regex!(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$").is_match(s)
}
