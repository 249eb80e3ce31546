use thiserror::Error;

/// Boxed error raised by a caller-supplied producer.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while producing a value.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// A producer was called with arguments it cannot honour.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Error raised by a caller-supplied producer, passed through as-is.
    #[error(transparent)]
    Producer(BoxError),
}

impl GenerationError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Wrap an error raised inside a custom producer.
    pub fn producer(err: impl Into<BoxError>) -> Self {
        Self::Producer(err.into())
    }
}

/// Convenience alias for results returned by producers.
pub type Result<T> = std::result::Result<T, GenerationError>;
