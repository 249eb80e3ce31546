use mockify_core::{Generator, Value};

use super::GeneratorRegistry;

pub fn register(registry: &mut GeneratorRegistry) {
    registry.register(|| int(0, 100));
    registry.register(|| float(0.0, 100.0, 2));
    registry.register(age);
    registry.register(price);
    registry.register(quantity);
    registry.register(count);
    registry.register(percentage);
    registry.register(rating);
}

/// Integer in `[min, max]`.
pub fn int(min: i64, max: i64) -> Generator {
    int_with_id("number.int", min, max)
}

/// Float in `[min, max)` rounded to `decimals` digits.
pub fn float(min: f64, max: f64, decimals: u32) -> Generator {
    float_with_id("number.float", min, max, decimals)
}

pub fn age() -> Generator {
    int_with_id("number.age", 18, 80)
}

pub fn price() -> Generator {
    float_with_id("number.price", 0.99, 999.99, 2)
}

pub fn quantity() -> Generator {
    int_with_id("number.quantity", 1, 100)
}

pub fn count() -> Generator {
    int_with_id("number.count", 0, 1000)
}

pub fn percentage() -> Generator {
    int_with_id("number.percentage", 0, 100)
}

/// One-decimal rating between 1 and 5.
pub fn rating() -> Generator {
    float_with_id("number.rating", 1.0, 5.0, 1)
}

fn int_with_id(id: &'static str, min: i64, max: i64) -> Generator {
    Generator::new(id, move |rng| Ok(Value::Int(rng.random_int(min, max))))
}

fn float_with_id(id: &'static str, min: f64, max: f64, decimals: u32) -> Generator {
    Generator::new(id, move |rng| {
        Ok(Value::Float(rng.random_float(min, max, decimals)))
    })
}
