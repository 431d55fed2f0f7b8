use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur while reading or writing the repo configuration.
#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("Error while {action}: {source}")]
    #[diagnostic(code(get_config::io))]
    IoError {
        action: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(
        code(get_config::json),
        help("Check your repos.json syntax and structure")
    )]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Extension trait for adding context to I/O errors.
pub trait ErrorContext<T> {
    /// Adds context to an error, describing what action was being performed.
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: FnOnce() -> String;
}

impl<T> ErrorContext<T> for std::io::Result<T> {
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: FnOnce() -> String,
    {
        self.map_err(|err| ConfigError::IoError {
            action: context(),
            source: err,
        })
    }
}
