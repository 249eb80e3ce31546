//! Record factories for Mockify.
//!
//! A [`Factory`] combines a base schema, named traits, per-call overrides and
//! name-based inference into records. Factories are immutable: `with_trait`
//! and `extend` return new factories. A [`Manifest`] describes a factory in
//! TOML or JSON.

pub mod errors;
pub mod factory;
pub mod manifest;
pub mod record;
pub mod request;
pub mod resolve;

pub use errors::{FactoryError, ManifestError};
pub use factory::{Factory, FactoryConfig, auto_factory, factory};
pub use manifest::{Manifest, ManifestConfig};
pub use record::Record;
pub use request::{BuildOptions, BuildRequest};
pub use resolve::{Layer, Layers, resolve_field};
