//! Line rendering.
//!
//! Turns one record back into one `x=...\r\n` line:
//!
//! 1. Resolve the template: the rule's fixed string, or its selector applied
//!    to the scoped value (the pushed element itself, else the nested object
//!    at `name`, else the whole record).
//! 2. Gather arguments: per capture name, the nested object's field, else the
//!    record's own field, else an empty string. Rules without names take the
//!    single value at `name`.
//! 3. Substitute placeholders left to right.
//!
//! Rendering never fails; missing values render as empty text.

use crate::{Rule, Template};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt::Write;

static EMPTY: Value = Value::String(String::new());

/// Append the line for `record` (as matched by `rule`) to `out`.
pub(crate) fn render_line(out: &mut String, kind: char, rule: &Rule, record: &Value) {
    let template = resolve_template(rule, record);
    let args = gather_args(rule, record);

    out.push(kind);
    out.push('=');
    format_into(out, &template, &args);
    out.push_str("\r\n");
}

fn resolve_template(rule: &Rule, record: &Value) -> Cow<'static, str> {
    match rule.template {
        Template::Fixed(template) => Cow::Borrowed(template),
        Template::Select(select) => {
            let scope = match (rule.push, rule.name) {
                (Some(_), _) => record,
                (None, Some(name)) => record.get(name).unwrap_or(&Value::Null),
                (None, None) => record,
            };
            Cow::Owned(select(scope))
        }
    }
}

fn gather_args<'v>(rule: &Rule, record: &'v Value) -> Vec<&'v Value> {
    let nested = rule.name.and_then(|name| record.get(name));

    if rule.names.is_empty() {
        return nested.into_iter().collect();
    }

    rule.names
        .iter()
        .map(|field| nested.and_then(|n| n.get(field)).or_else(|| record.get(field)).unwrap_or(&EMPTY))
        .collect()
}

/// Substitute `args` into `template`.
///
/// `%s` and `%d` emit the next argument, `%v` skips it, `%%` emits `%`. Once
/// the arguments run out the rest of the template is copied verbatim.
pub(crate) fn format_into(out: &mut String, template: &str, args: &[&Value]) {
    let mut next = 0;
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' || next >= args.len() {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('%') => {
                out.push('%');
                chars.next();
            }
            Some('s' | 'd') => {
                write_arg(out, args[next]);
                next += 1;
                chars.next();
            }
            Some('v') => {
                next += 1;
                chars.next();
            }
            _ => out.push('%'),
        }
    }
}

fn write_arg(out: &mut String, arg: &Value) {
    match arg {
        Value::String(s) => out.push_str(s),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                let _ = write!(out, "{i}");
            } else if let Some(u) = n.as_u64() {
                let _ = write!(out, "{u}");
            } else if let Some(f) = n.as_f64() {
                if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                    let _ = write!(out, "{}", f as i64);
                } else {
                    let _ = write!(out, "{f}");
                }
            }
        }
        Value::Bool(b) => {
            let _ = write!(out, "{b}");
        }
        Value::Null => {}
        other => {
            let _ = write!(out, "{other}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn format(template: &str, args: &[Value]) -> String {
        let refs: Vec<&Value> = args.iter().collect();
        let mut out = String::new();
        format_into(&mut out, template, &refs);
        out
    }

    #[test]
    fn substitutes_strings_and_numbers() {
        assert_eq!(format("%s %s %d %s IP%d %s", &[
            json!("-"), json!(123), json!(1), json!("IN"), json!(4), json!("127.0.0.1")
        ]), "- 123 1 IN IP4 127.0.0.1");
    }

    #[test]
    fn void_placeholder_consumes_an_argument() {
        assert_eq!(format("extmap:%d%v%v %s", &[json!(2), json!(""), json!(""), json!("urn:x")]), "extmap:2 urn:x");
    }

    #[test]
    fn percent_escape_and_exhausted_arguments() {
        assert_eq!(format("%d%% of %s", &[json!(50), json!("cpu")]), "50% of cpu");
        assert_eq!(format("%s and %s", &[json!("one")]), "one and %s");
        assert_eq!(format("no args %s", &[]), "no args %s");
        assert_eq!(format("trailing %", &[json!("x")]), "trailing %");
        assert_eq!(format("%q%s", &[json!("x")]), "%qx");
    }

    #[test]
    fn non_string_arguments() {
        assert_eq!(format("%s", &[json!(29.97)]), "29.97");
        assert_eq!(format("%d", &[json!(25.0)]), "25");
        assert_eq!(format("%s|%s|%s", &[json!(true), Value::Null, json!([1, 2])]), "true||[1,2]");
    }

    #[test]
    fn renders_nested_record_with_selector() {
        fn rtcp(o: &Value) -> String {
            if o.get("address").is_some() { "rtcp:%d %s IP%d %s".into() } else { "rtcp:%d".into() }
        }
        let rule = rule! {
            name: "rtcp",
            reg: r"rtcp:(\d*)(?: (\S*) IP(\d) (\S*))?",
            names: ["port", "netType", "ipVer", "address"],
            types: "dsds",
            format_fn: rtcp,
        };

        let mut out = String::new();
        render_line(&mut out, 'a', &rule, &json!({ "rtcp": { "port": 9 } }));
        render_line(&mut out, 'a', &rule, &json!({ "rtcp": { "port": 9, "netType": "IN", "ipVer": 4, "address": "0.0.0.0" } }));
        assert_eq!(out, "a=rtcp:9\r\na=rtcp:9 IN IP4 0.0.0.0\r\n");
    }

    #[test]
    fn missing_named_fields_render_empty() {
        let rule = rule! { push: "crypto", reg: r"crypto:(\d*) (\S*)", names: ["id", "suite"], types: "ds", format: "crypto:%d %s", };

        let mut out = String::new();
        render_line(&mut out, 'a', &rule, &json!({ "id": 1 }));
        assert_eq!(out, "a=crypto:1 \r\n");
    }

    #[test]
    fn bare_values_use_the_rule_name() {
        let rule = rule! { name: "ptime", reg: r"ptime:(\d*)", types: "d", format: "ptime:%d", };

        let mut out = String::new();
        render_line(&mut out, 'a', &rule, &json!({ "ptime": 20 }));
        assert_eq!(out, "a=ptime:20\r\n");
    }
}
