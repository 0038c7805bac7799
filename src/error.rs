use thiserror::Error;

/// Errors raised synchronously by the cloud pipeline.
///
/// None of these are retried. Remote data-arrival failures never show up
/// here; the data source logs them and the cloud simply stays uninitialised.
#[derive(Error, Debug)]
pub enum CloudError {
    /// Missing or unusable surface, missing data, malformed literal JSON,
    /// or an invalid configuration value at construction time.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The data root does not carry a `topics` array.
    #[error("schema error: {0}")]
    SchemaRoot(String),

    /// An item does not conform to the topic schema.
    #[error("schema error: item {index} does not conform to schema")]
    SchemaViolation { index: usize },

    /// A localized string key is absent for the configured language.
    #[error("translation for string id '{key}' not found for language '{language}'")]
    TranslationMissing { key: String, language: String },

    /// A setter received a value it cannot use.
    #[error("invalid value for {setting}: {value}")]
    InvalidArgument { setting: &'static str, value: String },

    /// A font could not be loaded for text measurement.
    #[error("font error: {0}")]
    Font(String),
}

pub type Result<T> = std::result::Result<T, CloudError>;
