//! Declarative factory manifests.
//!
//! A manifest is a TOML or JSON document with three optional sections:
//! `config`, `schema` and `traits`. Inside `schema` and each trait, a table
//! carrying a directive key becomes a generator:
//!
//! - `{ generator = "special.uuid" }` looks the id up in a registry,
//! - `{ one_of = ["a", "b"] }` picks uniformly among literal values,
//! - `{ sequence = "user-{n}" }` counts from 1, substituting `{n}`.
//!
//! Directives accept the modifiers `nullable` and `optional`, each a
//! probability in `[0, 1]`. Any other table is a nested object and any other
//! value is a constant.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use mockify_core::{FieldDef, Generator, Schema, Value};
use mockify_generate::GeneratorRegistry;
use mockify_generate::generators::{collection, registry};
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};
use tracing::debug;

use crate::errors::ManifestError;
use crate::factory::{Factory, FactoryConfig};

type Table = Map<String, JsonValue>;

const DIRECTIVES: [&str; 3] = ["generator", "one_of", "sequence"];
const MODIFIERS: [&str; 2] = ["nullable", "optional"];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub config: ManifestConfig,
    #[serde(default)]
    pub schema: Table,
    #[serde(default)]
    pub traits: IndexMap<String, Table>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestConfig {
    #[serde(default = "default_smart_inference")]
    pub smart_inference: bool,
    /// Field names resolved by inference when no section defines them.
    #[serde(default)]
    pub fields: Vec<String>,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            smart_inference: default_smart_inference(),
            fields: Vec::new(),
        }
    }
}

fn default_smart_inference() -> bool {
    true
}

impl Manifest {
    /// Load a manifest, choosing the format from the file extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        debug!(path = %path.display(), "loading manifest");
        match extension.as_deref() {
            Some("toml") => Self::from_toml_str(&fs::read_to_string(path)?),
            Some("json") => Self::from_json_str(&fs::read_to_string(path)?),
            _ => Err(ManifestError::InvalidManifest(format!(
                "unsupported manifest extension for {} (expected .toml or .json)",
                path.display()
            ))),
        }
    }

    pub fn from_toml_str(input: &str) -> Result<Self, ManifestError> {
        Ok(toml::from_str(input)?)
    }

    pub fn from_json_str(input: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Build a factory using the built-in generator registry.
    pub fn to_factory(&self) -> Result<Factory, ManifestError> {
        self.to_factory_with(registry())
    }

    /// Build a factory resolving `generator` directives against `registry`.
    pub fn to_factory_with(&self, registry: &GeneratorRegistry) -> Result<Factory, ManifestError> {
        let schema = schema_from_table(&self.schema, "", registry)?;
        let mut factory = Factory::new(schema)
            .with_field_names(self.config.fields.iter().cloned())
            .with_config(FactoryConfig {
                smart_inference: self.config.smart_inference,
            });
        for (name, table) in &self.traits {
            let definition = schema_from_table(table, name, registry)?;
            factory = factory.with_trait(name.clone(), definition);
        }
        debug!(
            fields = factory.schema().len(),
            traits = self.traits.len(),
            "manifest compiled"
        );
        Ok(factory)
    }
}

fn schema_from_table(
    table: &Table,
    prefix: &str,
    registry: &GeneratorRegistry,
) -> Result<Schema, ManifestError> {
    table
        .iter()
        .map(|(name, value)| {
            let path = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}.{name}")
            };
            Ok::<_, ManifestError>((name.clone(), field_def(&path, value, registry)?))
        })
        .collect()
}

fn field_def(
    path: &str,
    value: &JsonValue,
    registry: &GeneratorRegistry,
) -> Result<FieldDef, ManifestError> {
    let JsonValue::Object(table) = value else {
        return Ok(FieldDef::from(Value::from(value.clone())));
    };
    if !DIRECTIVES.iter().any(|key| table.contains_key(*key)) {
        return Ok(FieldDef::Nested(schema_from_table(table, path, registry)?));
    }
    directive(path, table, registry).map(FieldDef::Generator)
}

fn directive(
    path: &str,
    table: &Table,
    registry: &GeneratorRegistry,
) -> Result<Generator, ManifestError> {
    let mut found = DIRECTIVES.iter().filter(|key| table.contains_key(**key));
    let (Some(kind), None) = (found.next(), found.next()) else {
        return Err(invalid(path, "expected exactly one of generator, one_of, sequence"));
    };
    if let Some(extra) = table
        .keys()
        .find(|key| !DIRECTIVES.contains(&key.as_str()) && !MODIFIERS.contains(&key.as_str()))
    {
        return Err(invalid(path, &format!("unexpected key '{extra}'")));
    }

    let mut generator = match (*kind, &table[*kind]) {
        ("generator", JsonValue::String(id)) => {
            registry
                .generator(id)
                .ok_or_else(|| ManifestError::UnknownGenerator {
                    field: path.to_string(),
                    id: id.clone(),
                })?
        }
        ("one_of", JsonValue::Array(values)) if !values.is_empty() => {
            collection::one_of(values.iter().cloned().map(Value::from))
        }
        ("one_of", _) => return Err(invalid(path, "one_of needs a non-empty array")),
        ("sequence", JsonValue::String(template)) => {
            let template = template.clone();
            collection::sequence(move |n| Value::Text(template.replace("{n}", &n.to_string())))
        }
        (kind, _) => return Err(invalid(path, &format!("{kind} needs a string"))),
    };

    if let Some(p) = probability(path, table, "nullable")? {
        generator = collection::nullable(generator, p);
    }
    if let Some(p) = probability(path, table, "optional")? {
        generator = collection::optional(generator, p);
    }
    Ok(generator)
}

fn probability(path: &str, table: &Table, key: &str) -> Result<Option<f64>, ManifestError> {
    let Some(raw) = table.get(key) else {
        return Ok(None);
    };
    match raw.as_f64() {
        Some(p) if (0.0..=1.0).contains(&p) => Ok(Some(p)),
        _ => Err(invalid(path, &format!("{key} must be a probability in [0, 1]"))),
    }
}

fn invalid(path: &str, message: &str) -> ManifestError {
    ManifestError::InvalidManifest(format!("field '{path}': {message}"))
}
