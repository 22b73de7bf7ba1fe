//! Tree assembly.
//!
//! Places the fields extracted for one matched line into the destination
//! record (the session root, or the latest media record). The rule's
//! [`Placement`] decides where:
//!
//! ```text
//! Push("rtp")          dest.rtp[]  <- { fields }      (array created on first use)
//! Nested("origin")     dest.origin <- fields          (object created on first use)
//! Flat                 dest        <- fields
//! ```
//!
//! Fields are `Option`s aligned with the rule's `names`: `None` marks an empty
//! or absent capture and leaves that key unset. A rule without `names` carries
//! a single always-present value stored under its `name`.

use crate::{Placement, Rule};
use serde_json::{Map, Value};

pub(crate) fn place(rule: &Rule, fields: Vec<Option<Value>>, dest: &mut Map<String, Value>) {
    match rule.placement() {
        Placement::Push(key) => {
            let mut record = Map::new();
            attach(rule, fields, &mut record);

            let slot = dest.entry(key).or_insert_with(|| Value::Array(Vec::new()));
            if !slot.is_array() {
                *slot = Value::Array(Vec::new());
            }
            if let Value::Array(items) = slot {
                items.push(Value::Object(record));
            }
        }
        Placement::Nested(key) => {
            let slot = dest.entry(key).or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            if let Value::Object(nested) = slot {
                attach(rule, fields, nested);
            }
        }
        Placement::Flat => attach(rule, fields, dest),
    }
}

fn attach(rule: &Rule, fields: Vec<Option<Value>>, dest: &mut Map<String, Value>) {
    if rule.names.is_empty() {
        if let (Some(name), Some(Some(value))) = (rule.name, fields.into_iter().next()) {
            dest.insert(name.to_string(), value);
        }
        return;
    }

    for (name, value) in rule.names.iter().zip(fields) {
        if let Some(value) = value {
            dest.insert((*name).to_string(), value);
        }
    }
}
