//! Field precedence.
//!
//! A field resolves from the first layer that yields a value:
//! override, active trait, base schema, then inference when enabled.

use std::fmt;

use mockify_core::{RandomEngine, Result, Schema, Value};
use mockify_generate::inference::infer_generator;

/// Source a field value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Override,
    Trait,
    Schema,
    Inferred,
}

impl Layer {
    pub fn as_str(self) -> &'static str {
        match self {
            Layer::Override => "override",
            Layer::Trait => "trait",
            Layer::Schema => "schema",
            Layer::Inferred => "inferred",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The definition sources consulted for one build call.
#[derive(Debug, Clone, Copy)]
pub struct Layers<'a> {
    pub overrides: &'a Schema,
    pub active_trait: Option<&'a Schema>,
    pub schema: &'a Schema,
    pub smart_inference: bool,
}

/// Resolve `name` against `layers`, drawing randomness from `rng`.
///
/// An override always decides the field: if it yields no value the field is
/// omitted. Trait and schema entries that yield no value fall through to the
/// next layer. `Ok(None)` means the field is omitted.
pub fn resolve_field(
    name: &str,
    layers: &Layers<'_>,
    rng: &mut RandomEngine,
) -> Result<Option<(Layer, Value)>> {
    if let Some(definition) = layers.overrides.get(name) {
        return Ok(definition
            .resolve(rng)?
            .map(|value| (Layer::Override, value)));
    }

    let shadowed = [
        (Layer::Trait, layers.active_trait),
        (Layer::Schema, Some(layers.schema)),
    ];
    for (layer, source) in shadowed {
        let Some(definition) = source.and_then(|schema| schema.get(name)) else {
            continue;
        };
        if let Some(value) = definition.resolve(rng)? {
            return Ok(Some((layer, value)));
        }
    }

    if !layers.smart_inference {
        return Ok(None);
    }
    Ok(infer_generator(name)
        .generate(rng)?
        .map(|value| (Layer::Inferred, value)))
}
