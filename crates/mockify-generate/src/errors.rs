use thiserror::Error;

/// Errors raised while compiling inference rules.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("invalid inference pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
