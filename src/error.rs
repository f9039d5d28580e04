use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(roster_view::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(roster_view::config))]
    Config(String),

    #[error("HTTP error: {0}")]
    #[diagnostic(code(roster_view::http))]
    Http(#[from] reqwest::Error),

    #[error("Backend returned {status}: {message}")]
    #[diagnostic(code(roster_view::api))]
    Api { status: u16, message: String },

    #[error("Invalid URL: {0}")]
    #[diagnostic(code(roster_view::url))]
    Url(#[from] url::ParseError),

    #[error("Component error: {0}")]
    #[diagnostic(code(roster_view::component))]
    Component(String),

    #[error(transparent)]
    #[diagnostic(code(roster_view::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(roster_view::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(roster_view::other))]
    Other(String),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type RosterResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Invalid environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create component errors
pub fn component_error(message: &str) -> Error {
    Error::Component(message.to_string())
}

/// Helper to create other errors
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
