//! Template selectors for lines whose shape depends on which optional fields
//! are populated.
//!
//! Each selector returns a template with one placeholder per capture name of
//! its rule, in order. Absent optional fields use `%v` so that the following
//! placeholders still line up with their arguments.

use serde_json::Value;

/// Field is present and not `null`.
fn has(o: &Value, key: &str) -> bool {
    o.get(key).is_some_and(|v| !v.is_null())
}

/// Field is present with a non-empty, non-zero, non-false value.
fn truthy(o: &Value, key: &str) -> bool {
    match o.get(key) {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(_) => true,
    }
}

pub(super) fn rtpmap(o: &Value) -> String {
    let template = if truthy(o, "encoding") {
        "rtpmap:%d %s/%s/%s"
    } else if truthy(o, "rate") {
        "rtpmap:%d %s/%s"
    } else {
        "rtpmap:%d %s"
    };
    template.to_string()
}

pub(super) fn rtcp(o: &Value) -> String {
    String::from(if has(o, "address") { "rtcp:%d %s IP%d %s" } else { "rtcp:%d" })
}

pub(super) fn rtcp_fb(o: &Value) -> String {
    String::from(if has(o, "subtype") { "rtcp-fb:%s %s %s" } else { "rtcp-fb:%s %s" })
}

pub(super) fn extmap(o: &Value) -> String {
    let mut template = String::from("extmap:%d");
    template.push_str(if truthy(o, "direction") { "/%s" } else { "%v" });
    template.push_str(if truthy(o, "encrypt-uri") { " %s" } else { "%v" });
    template.push_str(" %s");
    if truthy(o, "config") {
        template.push_str(" %s");
    }
    template
}

pub(super) fn crypto(o: &Value) -> String {
    String::from(if has(o, "sessionConfig") { "crypto:%d %s %s %s" } else { "crypto:%d %s %s" })
}

pub(super) fn candidate(o: &Value) -> String {
    let mut template = String::from("candidate:%s %d %s %d %s %d typ %s");
    template.push_str(if has(o, "raddr") { " raddr %s rport %d" } else { "%v%v" });
    template.push_str(if has(o, "tcptype") { " tcptype %s" } else { "%v" });
    template.push_str(if has(o, "generation") { " generation %d" } else { "%v" });
    template.push_str(if has(o, "ufrag") { " ufrag %s" } else { "%v" });
    template.push_str(if has(o, "network-id") { " network-id %d" } else { "%v" });
    template.push_str(if has(o, "network-cost") { " network-cost %d" } else { "%v" });
    template
}

pub(super) fn ssrc(o: &Value) -> String {
    let mut template = String::from("ssrc:%d");
    if has(o, "attribute") {
        template.push_str(" %s");
        if has(o, "value") {
            template.push_str(":%s");
        }
    }
    template
}

pub(super) fn sctpmap(o: &Value) -> String {
    String::from(if has(o, "maxMessageSize") { "sctpmap:%s %s %s" } else { "sctpmap:%s %s" })
}

pub(super) fn rid(o: &Value) -> String {
    String::from(if truthy(o, "params") { "rid:%s %s %s" } else { "rid:%s %s" })
}

pub(super) fn imageattr(o: &Value) -> String {
    String::from(if truthy(o, "dir2") { "imageattr:%s %s %s %s %s" } else { "imageattr:%s %s %s" })
}

pub(super) fn simulcast(o: &Value) -> String {
    String::from(if truthy(o, "dir2") { "simulcast:%s %s %s %s" } else { "simulcast:%s %s" })
}

pub(super) fn ts_refclk(o: &Value) -> String {
    String::from(if has(o, "clksrcExt") { "ts-refclk:%s=%s" } else { "ts-refclk:%s" })
}

pub(super) fn mediaclk(o: &Value) -> String {
    let mut template = String::from("mediaclk:");
    template.push_str(if has(o, "id") { "id=%s %s" } else { "%v%s" });
    template.push_str(if has(o, "mediaClockValue") { "=%s" } else { "%v" });
    template.push_str(if has(o, "rateNumerator") { " rate=%s" } else { "%v" });
    if has(o, "rateDenominator") {
        template.push_str("/%s");
    }
    template
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truthiness_follows_field_contents() {
        let o = json!({ "a": "", "b": 0, "c": "x", "d": null, "e": 2 });
        assert!(!truthy(&o, "a"));
        assert!(!truthy(&o, "b"));
        assert!(truthy(&o, "c"));
        assert!(!truthy(&o, "d"));
        assert!(truthy(&o, "e"));
        assert!(!truthy(&o, "missing"));
        assert!(has(&o, "a"));
        assert!(!has(&o, "d"));
    }

    #[test]
    fn candidate_keeps_argument_alignment() {
        assert_eq!(
            candidate(&json!({ "network-id": 1 })),
            "candidate:%s %d %s %d %s %d typ %s%v%v%v%v%v network-id %d%v"
        );
    }

    #[test]
    fn rtpmap_picks_shape_by_populated_fields() {
        assert_eq!(rtpmap(&json!({ "rate": 8000 })), "rtpmap:%d %s/%s");
        assert_eq!(rtpmap(&json!({ "rate": 48000, "encoding": 2 })), "rtpmap:%d %s/%s/%s");
        assert_eq!(rtpmap(&json!({})), "rtpmap:%d %s");
    }
}
