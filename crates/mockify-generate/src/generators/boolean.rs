use mockify_core::{Generator, Value};

use super::GeneratorRegistry;

pub fn register(registry: &mut GeneratorRegistry) {
    registry.register(|| boolean(0.5));
    registry.register(truthy);
    registry.register(falsy);
}

/// `true` with the given probability.
pub fn boolean(probability: f64) -> Generator {
    Generator::new("boolean.boolean", move |rng| {
        Ok(Value::Bool(rng.chance(probability)))
    })
}

pub fn truthy() -> Generator {
    Generator::new("boolean.truthy", |_| Ok(Value::Bool(true)))
}

pub fn falsy() -> Generator {
    Generator::new("boolean.falsy", |_| Ok(Value::Bool(false)))
}
