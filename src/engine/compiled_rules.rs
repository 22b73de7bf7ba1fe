//! Rule compilation and indexing.
//!
//! This module holds the *static* side of the engine: a `Grammar` built once
//! from a rule table and shared read-only by every decode and encode call.
//!
//! Compilation does two things per rule:
//!
//! 1. Wraps the pattern as `^(?:...)$` so that a plain `captures` call has
//!    full-match semantics. Rule patterns in tables are written without anchors.
//! 2. Checks the rule's shape against its pattern (see invariants below).
//!
//! ## Invariants
//!
//! - Rules for one line type keep table order. The decoder relies on it for
//!   first-match-wins priority and the encoder for canonical line order.
//! - A rule has either `name` or `push`, never both.
//! - A rule with no `names` must have a `name` to hold its bare value.
//! - The pattern declares exactly `max(names.len(), 1)` capture groups, and
//!   `types` is empty or has one tag per capture.
//! - `Grammar::by_kind` is indexed by `kind - 'a'`; only lowercase ASCII letters
//!   can carry rules.

use crate::error::{Error, Result};
use crate::rules;
use crate::Rule;
use once_cell::sync::Lazy;
use regex::Regex;

static SDP_GRAMMAR: Lazy<Grammar> =
    Lazy::new(|| Grammar::new(rules::sdp::rules::get()).expect("built-in SDP grammar is well-formed"));

const KIND_COUNT: usize = 26;

/// Ordered rules for one line-type character.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub kind: char,
    pub rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(kind: char, rules: Vec<Rule>) -> Self {
        RuleSet { kind, rules }
    }
}

/// A rule paired with its anchored, compiled pattern.
#[derive(Debug)]
pub struct CompiledRule {
    pub rule: Rule,
    regex: Regex,
}

impl CompiledRule {
    fn new(kind: char, rule: Rule) -> Result<Self> {
        let label = rule.label();
        let shape = |reason: String| Error::RuleShape { kind, rule: label, reason };

        if rule.name.is_some() && rule.push.is_some() {
            return Err(shape("declares both a name and a push name".to_string()));
        }
        if rule.names.is_empty() && rule.name.is_none() {
            return Err(shape("has neither capture names nor a name for its value".to_string()));
        }

        let regex = Regex::new(&format!("^(?:{})$", rule.pattern))
            .map_err(|source| Error::Pattern { kind, rule: label, source })?;

        let expected = rule.expected_captures();
        let captures = regex.captures_len() - 1;
        if captures != expected {
            return Err(shape(format!("pattern has {captures} capture groups, expected {expected}")));
        }

        let tags = rule.types.chars().count();
        if tags != 0 && tags != expected {
            return Err(shape(format!("{tags} type tags for {expected} captures")));
        }

        Ok(CompiledRule { rule, regex })
    }

    /// Full-match `content` and return one token per capture.
    ///
    /// Optional groups that did not participate yield an empty token.
    pub(crate) fn extract<'t>(&self, content: &'t str) -> Option<Vec<&'t str>> {
        let caps = self.regex.captures(content)?;
        Some((1..caps.len()).map(|i| caps.get(i).map_or("", |m| m.as_str())).collect())
    }
}

/// Compiled, immutable rule table.
#[derive(Debug)]
pub struct Grammar {
    by_kind: [Vec<CompiledRule>; KIND_COUNT],
}

impl Grammar {
    /// Compile a rule table.
    ///
    /// Several sets for the same kind are concatenated in the order given.
    pub fn new(sets: Vec<RuleSet>) -> Result<Self> {
        let mut by_kind: [Vec<CompiledRule>; KIND_COUNT] = std::array::from_fn(|_| Vec::new());

        for set in sets {
            let Some(slot) = kind_index(set.kind) else {
                let rule = set.rules.first().map_or("-", Rule::label);
                return Err(Error::RuleShape {
                    kind: set.kind,
                    rule,
                    reason: "line type must be a lowercase ASCII letter".to_string(),
                });
            };
            for rule in set.rules {
                by_kind[slot].push(CompiledRule::new(set.kind, rule)?);
            }
        }

        let total: usize = by_kind.iter().map(Vec::len).sum();
        tracing::debug!(rules = total, "compiled grammar");

        Ok(Grammar { by_kind })
    }

    /// The built-in SDP grammar, compiled on first use.
    pub fn sdp() -> &'static Grammar {
        &SDP_GRAMMAR
    }

    /// Rules registered for `kind`, in table order. `None` when the kind has no rules.
    pub fn rules(&self, kind: char) -> Option<&[CompiledRule]> {
        let rules = &self.by_kind[kind_index(kind)?];
        if rules.is_empty() { None } else { Some(rules) }
    }

    /// Line types that have at least one rule.
    pub fn kinds(&self) -> impl Iterator<Item = char> + '_ {
        self.by_kind.iter().enumerate().filter(|(_, rules)| !rules.is_empty()).map(|(i, _)| (b'a' + i as u8) as char)
    }
}

fn kind_index(kind: char) -> Option<usize> {
    kind.is_ascii_lowercase().then(|| kind as usize - 'a' as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_patterns_for_full_match() {
        let grammar = Grammar::new(vec![RuleSet::new('t', vec![rule! {
            name: "timing",
            reg: r"(\d*) (\d*)",
            names: ["start", "stop"],
            types: "dd",
        }])])
        .unwrap();

        let rule = &grammar.rules('t').unwrap()[0];
        assert_eq!(rule.extract("0 0"), Some(vec!["0", "0"]));
        assert_eq!(rule.extract("0 0 trailing"), None);
        assert_eq!(rule.extract("x0 0"), None);
    }

    #[test]
    fn missing_optional_groups_yield_empty_tokens() {
        let grammar = Grammar::new(vec![RuleSet::new('a', vec![rule! {
            push: "rtp",
            reg: r"rtpmap:(\d*) ([\w\-.]*)(?:\s*/(\d*))?",
            names: ["payload", "codec", "rate"],
        }])])
        .unwrap();

        let rule = &grammar.rules('a').unwrap()[0];
        assert_eq!(rule.extract("rtpmap:0 PCMU"), Some(vec!["0", "PCMU", ""]));
    }

    #[test]
    fn rejects_capture_count_mismatch() {
        let err = Grammar::new(vec![RuleSet::new('c', vec![rule! {
            name: "connection",
            reg: r"IN IP(\d) (\S*)",
            names: ["version"],
        }])])
        .unwrap_err();

        assert!(matches!(err, Error::RuleShape { kind: 'c', rule: "connection", .. }));
    }

    #[test]
    fn rejects_name_and_push_together() {
        let rule = Rule { push: Some("things"), ..rule! { name: "thing", } };
        let err = Grammar::new(vec![RuleSet::new('a', vec![rule])]).unwrap_err();
        assert!(matches!(err, Error::RuleShape { .. }));
    }

    #[test]
    fn rejects_type_tag_count_mismatch() {
        let err = Grammar::new(vec![RuleSet::new('t', vec![rule! {
            name: "timing",
            reg: r"(\d*) (\d*)",
            names: ["start", "stop"],
            types: "d",
        }])])
        .unwrap_err();
        assert!(matches!(err, Error::RuleShape { kind: 't', .. }));
    }

    #[test]
    fn rejects_bad_patterns_and_kinds() {
        let err = Grammar::new(vec![RuleSet::new('a', vec![rule! { name: "broken", reg: "(", }])]).unwrap_err();
        assert!(matches!(err, Error::Pattern { rule: "broken", .. }));

        let err = Grammar::new(vec![RuleSet::new('X', vec![rule! { name: "upper", }])]).unwrap_err();
        assert!(matches!(err, Error::RuleShape { kind: 'X', .. }));
    }

    #[test]
    fn built_in_grammar_covers_sdp_line_types() {
        let kinds: String = Grammar::sdp().kinds().collect();
        assert_eq!(kinds, "abceimoprstuvz");
        assert!(Grammar::sdp().rules('k').is_none());
        assert!(Grammar::sdp().rules('1').is_none());
    }
}
