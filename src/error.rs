use thiserror::Error;

/// Failures outside the container operations themselves.
///
/// Multibucket operations never return this type: they report absent keys,
/// bad indexes and wrong held types alike as `false`, `None` or an empty
/// result.
#[derive(Error, Debug)]
pub enum MultibucketError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Logging error: {0}")]
    Logging(String),
    #[error("Empty bucket has no element type")]
    EmptyBucket,
}

pub type Result<T> = std::result::Result<T, MultibucketError>;

// Helper conversions
impl From<config::ConfigError> for MultibucketError {
    fn from(e: config::ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}
