//! Session Description Protocol grammar (RFC 4566 and common extensions).

pub(crate) mod rules;
mod templates;
