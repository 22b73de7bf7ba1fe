//! Document encoding.
//!
//! Lines are emitted in a canonical order independent of the order fields were
//! decoded in:
//!
//! ```text
//! session scope:  v o s i u e p c b t r z a     (per type, rules in table order)
//! per media:      m (first 'm' rule), then i c b a
//! ```
//!
//! For each rule in scope: a singular rule emits one line when its field is
//! present and non-null; a repeatable rule emits one line per element of its
//! array field. Rules with neither (the media rule) are only rendered as the
//! leading line of each media record.
//!
//! Before emitting, a working copy of the session gets defaults for absent
//! `version` (`0`), `name` (`-`) and `media` (`[]`), and each media record an
//! absent `payloads` (`""`). The caller's value is never modified.

use super::compiled_rules::Grammar;
use super::render::render_line;
use crate::error::{Error, Result, kind_name};
use serde_json::{Map, Value};

const SESSION_ORDER: [char; 13] = ['v', 'o', 's', 'i', 'u', 'e', 'p', 'c', 'b', 't', 'r', 'z', 'a'];
const MEDIA_ORDER: [char; 4] = ['i', 'c', 'b', 'a'];

pub(crate) fn encode_session(session: &Value, grammar: &Grammar) -> Result<String> {
    let Value::Object(fields) = session else {
        return Err(Error::NotAnObject { found: kind_name(session) });
    };

    let session = with_defaults(fields);
    let mut out = String::new();

    emit_scope(&mut out, grammar, &SESSION_ORDER, &session);

    let media = session.get("media").and_then(Value::as_array).map(Vec::as_slice).unwrap_or_default();
    let media_rule = grammar.rules('m').and_then(|rules| rules.first());

    for (idx, record) in media.iter().enumerate() {
        if !record.is_object() {
            tracing::warn!(index = idx, found = kind_name(record), "skipping media entry that is not an object");
            continue;
        }
        if let Some(rule) = media_rule {
            render_line(&mut out, 'm', &rule.rule, record);
        }
        emit_scope(&mut out, grammar, &MEDIA_ORDER, record);
    }

    tracing::debug!(media = media.len(), bytes = out.len(), "encoded session description");
    Ok(out)
}

fn with_defaults(fields: &Map<String, Value>) -> Value {
    let mut session = fields.clone();

    session.entry("version").or_insert_with(|| Value::from(0));
    session.entry("name").or_insert_with(|| Value::from("-"));
    let media = session.entry("media").or_insert_with(|| Value::Array(Vec::new()));

    match media {
        Value::Array(records) => {
            for record in records.iter_mut().filter_map(Value::as_object_mut) {
                record.entry("payloads").or_insert_with(|| Value::from(""));
            }
        }
        other => {
            tracing::warn!(found = kind_name(other), "ignoring 'media' field that is not an array");
        }
    }

    Value::Object(session)
}

fn emit_scope(out: &mut String, grammar: &Grammar, order: &[char], scope: &Value) {
    for &kind in order {
        let Some(rules) = grammar.rules(kind) else { continue };

        for compiled in rules {
            let rule = &compiled.rule;
            if let Some(name) = rule.name {
                if scope.get(name).is_some_and(|v| !v.is_null()) {
                    render_line(out, kind, rule, scope);
                    continue;
                }
            }
            if let Some(Value::Array(items)) = rule.push.and_then(|push| scope.get(push)) {
                for item in items {
                    render_line(out, kind, rule, item);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RuleSet;
    use serde_json::json;

    fn grammar() -> Grammar {
        Grammar::new(vec![
            RuleSet::new('v', vec![rule! { name: "version", reg: r"(\d*)", types: "d", }]),
            RuleSet::new('s', vec![rule! { name: "name", }]),
            RuleSet::new('c', vec![rule! {
                name: "connection",
                reg: r"IN IP(\d) (\S*)",
                names: ["version", "ip"],
                types: "ds",
                format: "IN IP%d %s",
            }]),
            RuleSet::new('m', vec![rule! {
                reg: r"(\w*) (\d*) ([\w/]*)(?: (.*))?",
                names: ["type", "port", "protocol", "payloads"],
                types: "sdss",
                format: "%s %d %s %s",
            }]),
            RuleSet::new('a', vec![
                rule! { push: "rtp", reg: r"rtpmap:(\d*) (\S*)", names: ["payload", "codec"], types: "ds", format: "rtpmap:%d %s", },
                rule! { name: "direction", reg: "(sendrecv|recvonly|sendonly|inactive)", },
            ]),
        ])
        .unwrap()
    }

    #[test]
    fn rejects_non_objects() {
        let err = encode_session(&json!([1, 2]), &grammar()).unwrap_err();
        assert!(matches!(err, Error::NotAnObject { found: "an array" }));
    }

    #[test]
    fn fills_defaults_for_empty_session() {
        assert_eq!(encode_session(&json!({}), &grammar()).unwrap(), "v=0\r\ns=-\r\n");
    }

    #[test]
    fn emits_in_canonical_order() {
        let session = json!({
            "direction": "sendrecv",
            "connection": { "version": 4, "ip": "10.0.0.1" },
            "name": "call",
            "media": [{
                "direction": "recvonly",
                "rtp": [{ "payload": 0, "codec": "PCMU" }, { "payload": 8, "codec": "PCMA" }],
                "connection": { "version": 4, "ip": "10.0.0.2" },
                "type": "audio", "port": 5004, "protocol": "RTP/AVP", "payloads": "0 8",
            }, {
                "type": "video", "port": 0, "protocol": "RTP/AVP",
            }],
        });

        let text = encode_session(&session, &grammar()).unwrap();
        assert_eq!(
            text,
            "v=0\r\ns=call\r\nc=IN IP4 10.0.0.1\r\na=sendrecv\r\n\
             m=audio 5004 RTP/AVP 0 8\r\nc=IN IP4 10.0.0.2\r\na=rtpmap:0 PCMU\r\na=rtpmap:8 PCMA\r\na=recvonly\r\n\
             m=video 0 RTP/AVP \r\n"
        );
    }

    #[test]
    fn null_fields_are_omitted_and_caller_value_untouched() {
        let session = json!({ "version": 0, "name": null, "media": [{ "type": "audio", "port": 9, "protocol": "RTP/AVP" }] });
        let before = session.clone();

        let text = encode_session(&session, &grammar()).unwrap();

        assert_eq!(text, "v=0\r\nm=audio 9 RTP/AVP \r\n");
        assert_eq!(session, before);
    }

    #[test]
    fn non_object_media_entries_are_skipped() {
        let text = encode_session(&json!({ "media": [42, { "type": "audio", "port": 9, "protocol": "RTP/AVP", "payloads": "0" }] }), &grammar()).unwrap();
        assert_eq!(text, "v=0\r\ns=-\r\nm=audio 9 RTP/AVP 0\r\n");
    }
}
