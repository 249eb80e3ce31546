//! Generator library and field-name inference for Mockify.
//!
//! Generators are grouped by family under [`generators`] and are also
//! reachable by id through the [`GeneratorRegistry`]. The [`inference`]
//! module maps field names to generators for factories with smart inference
//! enabled.

pub mod data;
pub mod errors;
pub mod generators;
pub mod inference;

pub use errors::InferenceError;
pub use generators::{GeneratorRegistry, registry};
pub use inference::{find_generator_for_field, find_rule_for_field, infer_generator};
