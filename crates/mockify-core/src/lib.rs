//! Core contracts for Mockify.
//!
//! This crate defines the value model produced by factories, field
//! definitions and schemas, the generator handle, the deterministic random
//! engine every generator draws from, and the structural deep-merge used by
//! `extend`.

pub mod error;
pub mod field;
pub mod generator;
pub mod merge;
pub mod random;
pub mod value;

pub use error::{BoxError, GenerationError, Result};
pub use field::{FieldDef, Schema};
pub use generator::{Generator, SequenceCounter};
pub use merge::deep_merge;
pub use random::{EngineSnapshot, PinnedSeed, RandomEngine};
pub use value::{Fields, Value};
