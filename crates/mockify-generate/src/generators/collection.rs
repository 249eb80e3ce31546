//! Generators composed from values or from other generators.
//!
//! Composite generators carry the sequence counters of the generators they
//! wrap so a factory can rewind them all.

use mockify_core::{GenerationError, Generator, Result, SequenceCounter, Value};
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;

/// Length of a generated list: fixed, or drawn from `min..=max` per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayOptions {
    pub min: usize,
    pub max: usize,
    pub length: Option<usize>,
}

impl Default for ArrayOptions {
    fn default() -> Self {
        Self {
            min: 1,
            max: 5,
            length: None,
        }
    }
}

impl ArrayOptions {
    pub fn exactly(length: usize) -> Self {
        Self {
            length: Some(length),
            ..Self::default()
        }
    }

    pub fn between(min: usize, max: usize) -> Self {
        Self {
            min,
            max,
            length: None,
        }
    }
}

/// List of values produced by `item`. Items yielding no value become `Null`.
pub fn array(item: Generator, options: ArrayOptions) -> Generator {
    let counters = item.counters().to_vec();
    Generator::new("collection.array", move |rng| {
        let count = match options.length {
            Some(length) => length,
            None => rng.random_int(options.min as i64, options.max as i64) as usize,
        };
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(item.value(rng)?);
        }
        Ok(Value::List(items))
    })
    .with_counters(counters)
}

/// Uniform pick among `values`. Fails at generation time when `values` is
/// empty.
pub fn one_of<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Generator {
    pick_values("collection.one_of", values)
}

/// Same as [`one_of`], for enum-like value sets.
pub fn enum_value<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Generator {
    pick_values("collection.enum", values)
}

/// Between `min` and `max` distinct elements of `values`, in random order.
/// `max` is capped at the number of values.
pub fn some_of<V: Into<Value>>(
    values: impl IntoIterator<Item = V>,
    min: usize,
    max: usize,
) -> Generator {
    let values: Vec<Value> = values.into_iter().map(Into::into).collect();
    Generator::new("collection.some_of", move |rng| {
        let upper = max.min(values.len());
        let count = rng.random_int(min.min(upper) as i64, upper as i64) as usize;
        Ok(Value::List(rng.pick_many(&values, count)))
    })
}

/// Values computed from a counter that starts at 1 and advances per call.
///
/// The counter is exposed through [`Generator::counters`] and rewinds with
/// [`Generator::reset_sequences`].
pub fn sequence<F>(produce: F) -> Generator
where
    F: Fn(u64) -> Value + Send + Sync + 'static,
{
    let counter = SequenceCounter::new();
    let shared = counter.clone();
    Generator::new("collection.sequence", move |_| Ok(produce(shared.next())))
        .with_counters([counter])
}

pub fn constant(value: impl Into<Value>) -> Generator {
    Generator::constant(value)
}

/// Yields `Null` with the given probability, otherwise delegates.
pub fn nullable(inner: Generator, probability: f64) -> Generator {
    let counters = inner.counters().to_vec();
    Generator::partial("collection.nullable", move |rng| {
        if rng.chance(probability) {
            return Ok(Some(Value::Null));
        }
        inner.generate(rng)
    })
    .with_counters(counters)
}

/// Yields no value with the given probability, otherwise delegates.
pub fn optional(inner: Generator, probability: f64) -> Generator {
    let counters = inner.counters().to_vec();
    Generator::partial("collection.optional", move |rng| {
        if rng.chance(probability) {
            return Ok(None);
        }
        inner.generate(rng)
    })
    .with_counters(counters)
}

/// Pick among values proportionally to their weights.
///
/// Fails when the list is empty, a weight is negative or not finite, or all
/// weights are zero.
pub fn weighted<V: Into<Value>>(
    options: impl IntoIterator<Item = (V, f64)>,
) -> Result<Generator> {
    let (values, weights): (Vec<Value>, Vec<f64>) = options
        .into_iter()
        .map(|(value, weight)| (value.into(), weight))
        .unzip();
    let distribution = WeightedIndex::new(&weights)
        .map_err(|err| GenerationError::invalid_argument(format!("invalid weights: {err}")))?;
    Ok(Generator::new("collection.weighted", move |rng| {
        let index = distribution.sample(rng);
        values
            .get(index)
            .cloned()
            .ok_or_else(|| GenerationError::invalid_argument("weighted index out of range"))
    }))
}

/// Build a fresh generator from `make` on every call and draw from it.
pub fn lazy<F>(make: F) -> Generator
where
    F: Fn() -> Generator + Send + Sync + 'static,
{
    Generator::partial("collection.lazy", move |rng| make().generate(rng))
}

/// Uniform pick among generators, then delegate to the chosen one.
pub fn one_of_generators(generators: Vec<Generator>) -> Generator {
    let counters: Vec<SequenceCounter> = generators
        .iter()
        .flat_map(|generator| generator.counters().iter().cloned())
        .collect();
    Generator::partial("collection.one_of_generators", move |rng| {
        rng.random_pick(generators.as_slice())?.generate(rng)
    })
    .with_counters(counters)
}

fn pick_values<V: Into<Value>>(
    id: &'static str,
    values: impl IntoIterator<Item = V>,
) -> Generator {
    let values: Vec<Value> = values.into_iter().map(Into::into).collect();
    Generator::new(id, move |rng| rng.random_pick(&values).cloned())
}
