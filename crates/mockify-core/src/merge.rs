//! Structural deep merge over field-definition trees.
//!
//! Object nodes (`FieldDef::Nested`) merge key by key, recursively. Every
//! other node, including generators and lists, is replaced wholesale by the
//! patch. Neither input is modified.

use crate::field::{FieldDef, Schema};

/// Merge `patch` over `base`, returning a new schema.
///
/// Keys already present in `base` keep their position; new keys from
/// `patch` are appended in patch order.
pub fn deep_merge(base: &Schema, patch: &Schema) -> Schema {
    let mut merged = base.clone();
    for (name, incoming) in patch.iter() {
        let next = match (base.get(name), incoming) {
            (Some(FieldDef::Nested(current)), FieldDef::Nested(nested_patch)) => {
                FieldDef::Nested(deep_merge(current, nested_patch))
            }
            _ => incoming.clone(),
        };
        merged.insert(name.clone(), next);
    }
    merged
}
