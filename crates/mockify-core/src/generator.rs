use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::Result;
use crate::random::RandomEngine;
use crate::value::Value;

type Produce = dyn Fn(&mut RandomEngine) -> Result<Option<Value>> + Send + Sync;

/// Zero-argument producer of a field value.
///
/// Producers draw all randomness from the engine they are handed and are
/// only invoked at build time. A producer may yield `None`, meaning "no
/// value" for this call.
#[derive(Clone)]
pub struct Generator {
    id: &'static str,
    produce: Arc<Produce>,
    counters: Vec<SequenceCounter>,
}

impl Generator {
    /// Producer that always yields a value.
    pub fn new<F>(id: &'static str, produce: F) -> Self
    where
        F: Fn(&mut RandomEngine) -> Result<Value> + Send + Sync + 'static,
    {
        Self::partial(id, move |rng| produce(rng).map(Some))
    }

    /// Producer that may yield no value.
    pub fn partial<F>(id: &'static str, produce: F) -> Self
    where
        F: Fn(&mut RandomEngine) -> Result<Option<Value>> + Send + Sync + 'static,
    {
        Self {
            id,
            produce: Arc::new(produce),
            counters: Vec::new(),
        }
    }

    /// Caller-defined producer.
    pub fn from_fn<F>(produce: F) -> Self
    where
        F: Fn(&mut RandomEngine) -> Result<Value> + Send + Sync + 'static,
    {
        Self::new("custom", produce)
    }

    /// Producer that yields a clone of `value` every time.
    pub fn constant(value: impl Into<Value>) -> Self {
        let value = value.into();
        Self::new("collection.constant", move |_| Ok(value.clone()))
    }

    /// Attach sequence counters that `reset_sequences` should rewind.
    pub fn with_counters(mut self, counters: impl IntoIterator<Item = SequenceCounter>) -> Self {
        self.counters.extend(counters);
        self
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn generate(&self, rng: &mut RandomEngine) -> Result<Option<Value>> {
        (self.produce)(rng)
    }

    /// Produce a value, mapping "no value" to `Value::Null`.
    pub fn value(&self, rng: &mut RandomEngine) -> Result<Value> {
        Ok(self.generate(rng)?.unwrap_or(Value::Null))
    }

    pub fn counters(&self) -> &[SequenceCounter] {
        &self.counters
    }

    pub fn reset_sequences(&self) {
        for counter in &self.counters {
            counter.reset();
        }
    }
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("id", &self.id)
            .field("counters", &self.counters.len())
            .finish()
    }
}

/// Shared counter behind sequence generators. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct SequenceCounter(Arc<AtomicU64>);

impl SequenceCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance and return the next value, starting at 1.
    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Last value handed out, 0 before the first call.
    pub fn current(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.0.store(0, Ordering::Relaxed);
    }
}
