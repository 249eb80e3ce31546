//! Value generators grouped by family, plus the id-addressable registry.
//!
//! Every generator draws its randomness from the `RandomEngine` it is handed,
//! so a seeded engine reproduces the exact same values.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use mockify_core::{Generator, RandomEngine, Result};

pub mod boolean;
pub mod collection;
pub mod date;
pub mod number;
pub mod special;
pub mod string;

/// Constructor of a default-configured generator.
pub type GeneratorCtor = fn() -> Generator;

static BUILTIN: LazyLock<GeneratorRegistry> = LazyLock::new(GeneratorRegistry::builtin);

/// Generators addressable by a stable string id (`"special.uuid"`,
/// `"string.word"`, ...).
#[derive(Debug, Clone, Default)]
pub struct GeneratorRegistry {
    generators: BTreeMap<&'static str, GeneratorCtor>,
}

impl GeneratorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in generator family.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        string::register(&mut registry);
        number::register(&mut registry);
        boolean::register(&mut registry);
        date::register(&mut registry);
        special::register(&mut registry);
        registry
    }

    /// Register `ctor` under the id of the generator it builds.
    pub fn register(&mut self, ctor: GeneratorCtor) {
        self.generators.insert(ctor().id(), ctor);
    }

    /// Register `ctor` under an explicit id, e.g. for alternative defaults.
    pub fn register_as(&mut self, id: &'static str, ctor: GeneratorCtor) {
        self.generators.insert(id, ctor);
    }

    /// Fresh instance of the generator registered under `id`.
    pub fn generator(&self, id: &str) -> Option<Generator> {
        self.generators.get(id).map(|ctor| ctor())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.generators.contains_key(id)
    }

    /// Registered ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.generators.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}

/// Shared built-in registry.
pub fn registry() -> &'static GeneratorRegistry {
    &BUILTIN
}

pub(crate) fn pick(table: &'static [&'static str], rng: &mut RandomEngine) -> Result<&'static str> {
    rng.random_pick(table).copied()
}

pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
