use mockify_core::GenerationError;
use thiserror::Error;

/// Errors raised while building records.
#[derive(Debug, Error)]
pub enum FactoryError {
    /// A field producer failed; the producer's error is passed through as-is.
    #[error(transparent)]
    Generation(#[from] GenerationError),
    /// The record could not be decoded into the requested type.
    #[error("record decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors raised while loading a factory manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown generator '{id}' for field '{field}'")]
    UnknownGenerator { field: String, id: String },
    #[error("invalid manifest: {0}")]
    InvalidManifest(String),
}
