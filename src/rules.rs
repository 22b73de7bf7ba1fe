//! Built-in rule tables.

pub(crate) mod sdp;
