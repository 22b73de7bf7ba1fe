//! Rule interpretation engine.
//!
//! This module is the operational core of the transcoder. It interprets a
//! declarative rule table in both directions and carries no knowledge of
//! individual SDP line kinds.
//!
//! ## How the parts work together
//!
//! ```text
//! RuleSet (per line type) ──┐
//!                           │  Grammar::new               (compiled_rules.rs)
//!                           └────────────┬────────────
//!                                        │
//! text ── Decoder::run ──────────────────┼─ split lines, track target record
//!         (decoder.rs)                   │
//!                                        v
//!                           Decoder::decode_line          (decoder.rs)
//!                             - first full-match rule wins
//!                             - coerce captures           (coercion.rs)
//!                                        │
//!                                        v
//!                           place                         (assemble.rs)
//!                             - push / nested / flat
//!                                        │
//!                                        v
//!                                  session tree
//!
//! session tree ── encode ── fixed type order per scope    (encoder.rs)
//!                             └─ render_line              (render.rs)
//!                                  - template or selector
//!                                  - %s %d %v %% placeholders
//!                                        │
//!                                        v
//!                                   CRLF text
//! ```
//!
//! ## Responsibilities by module
//!
//! - `compiled_rules.rs`: compiles a rule table into a `Grammar`, anchoring every
//!   pattern for full-match semantics and checking rule shape invariants.
//! - `coercion.rs`: token to typed value conversion and the numeric policy.
//! - `decoder.rs`: line selection, rule matching and the document loop.
//! - `assemble.rs`: writes extracted fields into the output tree.
//! - `render.rs`: renders one record into one text line.
//! - `encoder.rs`: default normalization and canonical line ordering.
//! - `metrics.rs`: per-decode diagnostics (matched and skipped lines).
//!
//! The engine is synchronous and keeps no state between calls; a `Grammar` is
//! immutable once built and can be shared freely.

mod assemble;
mod coercion;
mod compiled_rules;
mod decoder;
mod encoder;
mod metrics;
mod render;

pub use coercion::{NumericPolicy, coerce};
pub use compiled_rules::{CompiledRule, Grammar, RuleSet};
pub(crate) use decoder::Decoder;
pub(crate) use encoder::encode_session;
pub use metrics::{DecodeDetails, MatchedLine, SkipReason, SkippedLine};
pub(crate) use metrics::DecodeRun;
