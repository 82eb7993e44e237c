use miette::Diagnostic;
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(coachbook::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(coachbook::config))]
    Config(String),

    #[error("Not found: {0}")]
    #[diagnostic(code(coachbook::not_found))]
    NotFound(String),

    #[error("Validation error: {0}")]
    #[diagnostic(code(coachbook::validation))]
    Validation(String),

    #[error("Repository error: {0}")]
    #[diagnostic(code(coachbook::repository))]
    Repository(String),

    #[error(transparent)]
    #[diagnostic(code(coachbook::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(coachbook::serialization))]
    Serialization(String),
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

// Implement From for JSON errors
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<redis::RedisError> for Error {
    fn from(err: redis::RedisError) -> Self {
        Error::Repository(format!("Redis error: {}", err))
    }
}

/// Type alias for Result with our Error type
pub type AppResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Invalid environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create not-found errors
pub fn not_found_error(collection: &str, id: &str) -> Error {
    Error::NotFound(format!("{} '{}'", collection, id))
}

/// Helper to create validation errors
pub fn validation_error(message: &str) -> Error {
    Error::Validation(message.to_string())
}

/// Helper to create repository errors
pub fn repository_error(message: &str) -> Error {
    Error::Repository(message.to_string())
}
