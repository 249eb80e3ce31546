use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use mockify_core::{
    FieldDef, GenerationError, Generator, RandomEngine, Schema, SequenceCounter, Value, random,
};
use serde::de::DeserializeOwned;
use tracing::{debug, trace, warn};

use crate::errors::FactoryError;
use crate::record::Record;
use crate::request::BuildRequest;
use crate::resolve::{Layers, resolve_field};

/// Factory-wide settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactoryConfig {
    /// Infer generators from field names when no layer defines a field.
    pub smart_inference: bool,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            smart_inference: true,
        }
    }
}

/// Immutable record factory.
///
/// `with_trait` and `extend` return new factories; the receiver is never
/// changed. Internals are shared read-only between the two.
#[derive(Debug, Clone, Default)]
pub struct Factory {
    schema: Arc<Schema>,
    traits: Arc<IndexMap<String, Schema>>,
    field_names: Arc<Vec<String>>,
    config: FactoryConfig,
}

/// Factory over an explicit schema.
pub fn factory(schema: Schema) -> Factory {
    Factory::new(schema)
}

/// Factory over bare field names, resolved by inference.
pub fn auto_factory<I, S>(field_names: I) -> Factory
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Factory::from_field_names(field_names).with_config(FactoryConfig {
        smart_inference: true,
    })
}

impl Factory {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema: Arc::new(schema),
            ..Self::default()
        }
    }

    /// Factory with no schema values, only declared field names.
    pub fn from_field_names<I, S>(field_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::default().with_field_names(field_names)
    }

    /// Replace the declared field names.
    pub fn with_field_names<I, S>(&self, field_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field_names: Arc::new(field_names.into_iter().map(Into::into).collect()),
            ..self.clone()
        }
    }

    pub fn with_config(&self, config: FactoryConfig) -> Self {
        Self {
            config,
            ..self.clone()
        }
    }

    /// New factory with `definition` registered as trait `name`. An existing
    /// trait of the same name is replaced.
    pub fn with_trait(&self, name: impl Into<String>, definition: Schema) -> Self {
        let mut traits = (*self.traits).clone();
        traits.insert(name.into(), definition);
        Self {
            traits: Arc::new(traits),
            ..self.clone()
        }
    }

    /// New factory whose schema is this schema deep-merged with `patch`.
    /// Traits are carried over unchanged.
    pub fn extend(&self, patch: Schema) -> Self {
        Self {
            schema: Arc::new(self.schema.merged(&patch)),
            ..self.clone()
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn trait_definition(&self, name: &str) -> Option<&Schema> {
        self.traits.get(name)
    }

    pub fn trait_names(&self) -> impl Iterator<Item = &str> {
        self.traits.keys().map(String::as_str)
    }

    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    pub fn config(&self) -> FactoryConfig {
        self.config
    }

    /// Build one record from the process-wide engine.
    ///
    /// The engine stays locked for the whole call, so producers must draw
    /// from the engine they are handed and must not call back into
    /// `build` on the process-wide engine. Nest factories through
    /// [`Factory::as_generator`] instead.
    pub fn build(&self, request: impl Into<BuildRequest>) -> Result<Record, FactoryError> {
        let mut rng = random::global();
        self.build_request(&mut rng, &request.into())
    }

    /// Build one record from a caller-owned engine.
    pub fn build_with(
        &self,
        rng: &mut RandomEngine,
        request: impl Into<BuildRequest>,
    ) -> Result<Record, FactoryError> {
        self.build_request(rng, &request.into())
    }

    /// Build `count` records with identical arguments.
    ///
    /// Every build resolves independently. With a one-shot seed each build
    /// pins and restores the engine on its own, so all records are equal.
    pub fn build_many(
        &self,
        count: usize,
        request: impl Into<BuildRequest>,
    ) -> Result<Vec<Record>, FactoryError> {
        let mut rng = random::global();
        self.build_many_with(&mut rng, count, request)
    }

    pub fn build_many_with(
        &self,
        rng: &mut RandomEngine,
        count: usize,
        request: impl Into<BuildRequest>,
    ) -> Result<Vec<Record>, FactoryError> {
        let request = request.into();
        (0..count)
            .map(|_| self.build_request(rng, &request))
            .collect()
    }

    /// Build one record and decode it into `T`.
    pub fn build_into<T: DeserializeOwned>(
        &self,
        request: impl Into<BuildRequest>,
    ) -> Result<T, FactoryError> {
        self.build(request)?.into_typed()
    }

    /// Generator that builds a record from this factory on the engine it is
    /// handed, for nesting one factory inside another's schema.
    ///
    /// Prefer this over calling `build` from a custom producer: the outer
    /// build already holds the process-wide engine.
    pub fn as_generator(&self, request: impl Into<BuildRequest>) -> Generator {
        let factory = self.clone();
        let request = request.into();
        Generator::new("factory.build", move |rng| {
            factory
                .build_request(rng, &request)
                .map(Value::from)
                .map_err(|err| match err {
                    FactoryError::Generation(inner) => inner,
                    other => GenerationError::producer(other),
                })
        })
        .with_counters(self.sequence_counters())
    }

    /// Rewind every sequence generator reachable from the schema and traits,
    /// then rewind the process-wide engine to its last seed.
    pub fn reset_sequences(&self) {
        let counters = self.sequence_counters();
        for counter in &counters {
            counter.reset();
        }
        random::reset_seed();
        debug!(counters = counters.len(), "sequences reset");
    }

    fn sequence_counters(&self) -> Vec<SequenceCounter> {
        let mut counters = self.schema.sequence_counters();
        for definition in self.traits.values() {
            counters.extend(definition.sequence_counters());
        }
        counters
    }

    fn build_request(
        &self,
        rng: &mut RandomEngine,
        request: &BuildRequest,
    ) -> Result<Record, FactoryError> {
        match request.options().seed {
            Some(seed) => {
                let mut pinned = rng.pin(seed);
                self.assemble(&mut pinned, request)
            }
            None => self.assemble(rng, request),
        }
    }

    fn assemble(
        &self,
        rng: &mut RandomEngine,
        request: &BuildRequest,
    ) -> Result<Record, FactoryError> {
        let active_trait = match request.trait_name() {
            Some(name) => {
                let definition = self.traits.get(name);
                if definition.is_none() {
                    debug!(trait_name = name, "unknown trait, building without it");
                }
                definition
            }
            None => None,
        };
        let layers = Layers {
            overrides: request.overrides(),
            active_trait,
            schema: &self.schema,
            smart_inference: self.config.smart_inference,
        };
        let candidates = self.candidate_fields(&layers);
        debug!(
            trait_name = request.trait_name(),
            seed = request.options().seed,
            fields = candidates.len(),
            "building record"
        );

        let mut record = Record::new();
        for name in candidates {
            match resolve_field(name, &layers, rng) {
                Ok(Some((layer, value))) => {
                    trace!(field = name, layer = layer.as_str(), "field resolved");
                    record.insert(name, value);
                }
                Ok(None) => trace!(field = name, "field omitted"),
                Err(err) => {
                    warn!(field = name, error = %err, "field producer failed");
                    return Err(err.into());
                }
            }
        }
        Ok(record)
    }

    /// Schema keys, then trait-only, override-only and declared-only names.
    fn candidate_fields<'a>(&'a self, layers: &Layers<'a>) -> IndexSet<&'a str> {
        let mut names: IndexSet<&'a str> = self.schema.keys().collect();
        if let Some(definition) = layers.active_trait {
            names.extend(definition.keys());
        }
        names.extend(layers.overrides.keys());
        names.extend(self.field_names.iter().map(String::as_str));
        names
    }
}

impl From<Factory> for FieldDef {
    fn from(factory: Factory) -> Self {
        FieldDef::Generator(factory.as_generator(()))
    }
}
