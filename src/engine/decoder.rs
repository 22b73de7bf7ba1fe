//! Line and document decoding.
//!
//! The decoder walks the input one line at a time:
//!
//! ```text
//! line ── strip '\r' ── "x=content"? ──no──▶ skip (Malformed)
//!                            │
//!                            ├─ x == 'm' ──▶ new media record { rtp: [], fmtp: [] }
//!                            │               becomes the target
//!                            v
//!                   rules for x? ──no──▶ skip (UnknownType)
//!                            │
//!                            v
//!          first rule whose pattern matches the whole content
//!                            │ none ──▶ skip (NoMatchingRule)
//!                            v
//!          coerce captures, place into target (assemble.rs)
//! ```
//!
//! Skips never abort the run. Every decision is recorded in `DecodeDetails`
//! and logged through `tracing` (`trace` for matches, `debug` for skips).

use super::assemble::place;
use super::coercion::coerce_with;
use super::compiled_rules::{CompiledRule, Grammar};
use super::metrics::{DecodeDetails, DecodeRun, MatchedLine, SkipReason, SkippedLine};
use crate::Options;
use serde_json::{Map, Value};
use std::time::Instant;

/// A rule match for one line: the winning rule and its coerced fields.
#[derive(Debug)]
pub(crate) struct LineMatch<'g> {
    pub rule: &'g CompiledRule,
    /// Aligned with the rule's `names`; `None` for empty captures. Rules without
    /// names carry exactly one always-present value.
    pub fields: Vec<Option<Value>>,
}

/// Interprets a [`Grammar`] against session-description text.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Decoder<'a> {
    grammar: &'a Grammar,
    options: &'a Options,
}

impl<'a> Decoder<'a> {
    pub fn new(grammar: &'a Grammar, options: &'a Options) -> Self {
        Decoder { grammar, options }
    }

    /// Select the rule for one line and extract its typed fields.
    ///
    /// Returns `None` when no rule for `kind` matches `content` (or `kind`
    /// has no rules at all).
    pub fn decode_line(&self, kind: char, content: &str) -> Option<LineMatch<'a>> {
        self.grammar.rules(kind)?.iter().find_map(|rule| self.try_rule(rule, content))
    }

    fn try_rule(&self, compiled: &'a CompiledRule, content: &str) -> Option<LineMatch<'a>> {
        let tokens = compiled.extract(content)?;
        let rule = &compiled.rule;
        let policy = self.options.numeric;

        let fields = if rule.names.is_empty() {
            let token = tokens.first().copied().unwrap_or("");
            vec![Some(coerce_with(token, rule.tag(0), policy)?)]
        } else {
            let mut fields = Vec::with_capacity(rule.names.len());
            for idx in 0..rule.names.len() {
                let field = match tokens.get(idx).copied() {
                    Some(token) if !token.is_empty() => Some(coerce_with(token, rule.tag(idx), policy)?),
                    _ => None,
                };
                fields.push(field);
            }
            fields
        };

        Some(LineMatch { rule: compiled, fields })
    }

    /// Decode a whole document, collecting diagnostics.
    pub fn run(&self, text: &str) -> DecodeRun {
        let start = Instant::now();
        let mut details = DecodeDetails::default();
        let mut session = Map::new();
        let mut media: Vec<Map<String, Value>> = Vec::new();

        for (idx, raw) in text.split('\n').enumerate() {
            let number = idx + 1;
            details.lines = number;
            let line = raw.strip_suffix('\r').unwrap_or(raw);

            let Some((kind, content)) = split_line(line) else {
                skip(&mut details, number, line, SkipReason::Malformed);
                continue;
            };

            if kind == 'm' {
                let mut record = Map::new();
                record.insert("rtp".to_string(), Value::Array(Vec::new()));
                record.insert("fmtp".to_string(), Value::Array(Vec::new()));
                media.push(record);
            }

            if self.grammar.rules(kind).is_none() {
                skip(&mut details, number, line, SkipReason::UnknownType(kind));
                continue;
            }

            let Some(found) = self.decode_line(kind, content) else {
                skip(&mut details, number, line, SkipReason::NoMatchingRule(kind));
                continue;
            };

            let rule = &found.rule.rule;
            tracing::trace!(line = number, kind = %kind, rule = rule.label(), "matched");
            details.matched.push(MatchedLine { line: number, kind, rule: rule.label() });

            let target = media.last_mut().unwrap_or(&mut session);
            place(rule, found.fields, target);
        }

        session.insert("media".to_string(), Value::Array(media.into_iter().map(Value::Object).collect()));
        details.elapsed = start.elapsed();

        tracing::debug!(
            lines = details.lines,
            matched = details.matched.len(),
            skipped = details.skipped.len(),
            "decoded session description"
        );

        DecodeRun { session: Value::Object(session), details }
    }
}

/// Split `x=content` into its type character and content.
fn split_line(line: &str) -> Option<(char, &str)> {
    let caps = regex!(r"^([a-z])=(.*)$").captures(line)?;
    let kind = caps.get(1)?.as_str().chars().next()?;
    Some((kind, caps.get(2).map_or("", |m| m.as_str())))
}

fn skip(details: &mut DecodeDetails, line: usize, text: &str, reason: SkipReason) {
    if !text.is_empty() {
        tracing::debug!(line, text, %reason, "skipped line");
    }
    details.skipped.push(SkippedLine { line, text: text.to_string(), reason });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NumericPolicy, RuleSet};
    use serde_json::json;

    fn grammar() -> Grammar {
        Grammar::new(vec![
            RuleSet::new('v', vec![rule! { name: "version", reg: r"(\d*)", types: "d", }]),
            RuleSet::new('m', vec![rule! {
                reg: r"(\w*) (\d*) ([\w/]*)(?: (.*))?",
                names: ["type", "port", "protocol", "payloads"],
                types: "sdss",
            }]),
            RuleSet::new('a', vec![
                rule! { name: "ptime", reg: r"ptime:(\S*)", types: "d", },
                rule! { name: "direction", reg: "(sendrecv|recvonly|sendonly|inactive)", },
                rule! { push: "invalid", names: ["value"], },
            ]),
        ])
        .unwrap()
    }

    #[test]
    fn first_matching_rule_wins() {
        let grammar = grammar();
        let options = Options::default();
        let decoder = Decoder::new(&grammar, &options);

        let found = decoder.decode_line('a', "sendonly").unwrap();
        assert_eq!(found.rule.rule.label(), "direction");
        assert_eq!(found.fields, vec![Some(json!("sendonly"))]);

        let found = decoder.decode_line('a', "sendonly-ish").unwrap();
        assert_eq!(found.rule.rule.label(), "invalid");
    }

    #[test]
    fn unknown_kinds_and_unmatched_content_yield_none() {
        let grammar = grammar();
        let options = Options::default();
        let decoder = Decoder::new(&grammar, &options);

        assert!(decoder.decode_line('k', "anything").is_none());
        assert!(decoder.decode_line('v', "zero").is_none());
    }

    #[test]
    fn strict_policy_falls_through_to_later_rules() {
        let grammar = grammar();
        let options = Options { numeric: NumericPolicy::Strict };
        let decoder = Decoder::new(&grammar, &options);

        let found = decoder.decode_line('a', "ptime:abc").unwrap();
        assert_eq!(found.rule.rule.label(), "invalid");

        let lenient = Options::default();
        let found = Decoder::new(&grammar, &lenient).decode_line('a', "ptime:abc").unwrap();
        assert_eq!(found.fields, vec![Some(json!(0))]);
    }

    #[test]
    fn run_targets_latest_media_record() {
        let grammar = grammar();
        let options = Options::default();
        let run = Decoder::new(&grammar, &options).run(
            "v=0\r\na=recvonly\r\nm=audio 9 RTP/AVP 0\r\na=sendonly\r\nm=video 0 RTP/AVP\r\na=x-foo\r\n",
        );

        assert_eq!(
            run.session,
            json!({
                "version": 0,
                "direction": "recvonly",
                "media": [
                    { "rtp": [], "fmtp": [], "type": "audio", "port": 9, "protocol": "RTP/AVP", "payloads": "0", "direction": "sendonly" },
                    { "rtp": [], "fmtp": [], "type": "video", "port": 0, "protocol": "RTP/AVP", "invalid": [{ "value": "x-foo" }] },
                ],
            })
        );
        assert_eq!(run.details.matched.len(), 6);
    }

    #[test]
    fn run_records_skips_without_aborting() {
        let grammar = grammar();
        let options = Options::default();
        let run = Decoder::new(&grammar, &options).run("v=0\nX garbage\nk=clear:secret\nv=zero\nV=0\n");

        assert_eq!(run.session, json!({ "version": 0, "media": [] }));

        let reasons: Vec<_> = run.details.dropped().map(|s| (s.line, s.reason)).collect();
        assert_eq!(
            reasons,
            vec![
                (2, SkipReason::Malformed),
                (3, SkipReason::UnknownType('k')),
                (4, SkipReason::NoMatchingRule('v')),
                (5, SkipReason::Malformed),
            ]
        );
        assert_eq!(run.details.lines, 6);
    }

    #[test]
    fn media_record_exists_even_when_m_line_content_is_invalid() {
        let grammar = grammar();
        let options = Options::default();
        let run = Decoder::new(&grammar, &options).run("m=???\r\na=inactive\r\n");

        assert_eq!(run.session["media"], json!([{ "rtp": [], "fmtp": [], "direction": "inactive" }]));
    }
}
