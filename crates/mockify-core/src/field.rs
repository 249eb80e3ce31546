use indexmap::IndexMap;

use crate::error::Result;
use crate::generator::{Generator, SequenceCounter};
use crate::merge::deep_merge;
use crate::random::RandomEngine;
use crate::value::{Fields, Value};

/// Definition of a single field slot.
#[derive(Debug, Clone)]
pub enum FieldDef {
    /// Literal value, used as-is.
    Constant(Value),
    /// Producer invoked at build time.
    Generator(Generator),
    /// Object literal whose members are definitions themselves.
    Nested(Schema),
    /// Explicitly absent entry.
    Unset,
}

impl FieldDef {
    /// Resolve to a concrete value, or `None` when the definition yields
    /// nothing for this call.
    pub fn resolve(&self, rng: &mut RandomEngine) -> Result<Option<Value>> {
        match self {
            FieldDef::Constant(value) => Ok(Some(value.clone())),
            FieldDef::Generator(generator) => generator.generate(rng),
            FieldDef::Nested(schema) => {
                let mut fields = Fields::with_capacity(schema.len());
                for (name, definition) in schema.iter() {
                    if let Some(value) = definition.resolve(rng)? {
                        fields.insert(name.clone(), value);
                    }
                }
                Ok(Some(Value::Object(fields)))
            }
            FieldDef::Unset => Ok(None),
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, FieldDef::Unset)
    }

    fn collect_counters(&self, out: &mut Vec<SequenceCounter>) {
        match self {
            FieldDef::Generator(generator) => out.extend(generator.counters().iter().cloned()),
            FieldDef::Nested(schema) => {
                for definition in schema.fields.values() {
                    definition.collect_counters(out);
                }
            }
            FieldDef::Constant(_) | FieldDef::Unset => {}
        }
    }
}

impl From<Value> for FieldDef {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => FieldDef::Nested(
                fields
                    .into_iter()
                    .map(|(name, value)| (name, FieldDef::from(value)))
                    .collect(),
            ),
            other => FieldDef::Constant(other),
        }
    }
}

impl From<Generator> for FieldDef {
    fn from(generator: Generator) -> Self {
        FieldDef::Generator(generator)
    }
}

impl From<Schema> for FieldDef {
    fn from(schema: Schema) -> Self {
        FieldDef::Nested(schema)
    }
}

macro_rules! constant_field_def {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for FieldDef {
                fn from(value: $ty) -> Self {
                    FieldDef::from(Value::from(value))
                }
            }
        )*
    };
}

constant_field_def!(bool, i64, i32, u32, f64, &str, String, Fields, serde_json::Value);

/// Ordered mapping from field name to definition.
///
/// Schemas are treated as immutable once attached to a factory; merging
/// produces a new schema.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: IndexMap<String, FieldDef>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn field(mut self, name: impl Into<String>, definition: impl Into<FieldDef>) -> Self {
        self.insert(name, definition);
        self
    }

    /// Insert or replace a definition, keeping the current position of an
    /// existing key.
    pub fn insert(&mut self, name: impl Into<String>, definition: impl Into<FieldDef>) {
        self.fields.insert(name.into(), definition.into());
    }

    pub fn get(&self, name: &str) -> Option<&FieldDef> {
        self.fields.get(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldDef)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Deep-merge `patch` over this schema into a new schema.
    pub fn merged(&self, patch: &Schema) -> Schema {
        deep_merge(self, patch)
    }

    /// Counters of every sequence generator reachable from this schema.
    pub fn sequence_counters(&self) -> Vec<SequenceCounter> {
        let mut counters = Vec::new();
        for definition in self.fields.values() {
            definition.collect_counters(&mut counters);
        }
        counters
    }
}

impl<K: Into<String>> FromIterator<(K, FieldDef)> for Schema {
    fn from_iter<I: IntoIterator<Item = (K, FieldDef)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(name, definition)| (name.into(), definition))
                .collect(),
        }
    }
}

impl IntoIterator for Schema {
    type Item = (String, FieldDef);
    type IntoIter = indexmap::map::IntoIter<String, FieldDef>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
