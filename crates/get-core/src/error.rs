use miette::Diagnostic;
use thiserror::Error;

/// Errors raised by the catalog engine.
#[derive(Error, Diagnostic, Debug)]
pub enum CoreError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] get_config::ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    FileSystem(#[from] get_utils::error::FileSystemError),

    #[error("Error while {action}: {source}")]
    #[diagnostic(code(get_core::io), help("Check file permissions and disk space"))]
    IoError {
        action: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(
        code(get_core::json),
        help("The package index may be corrupted or in an invalid format")
    )]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    #[diagnostic(code(get_core::extract))]
    ExtractError(#[from] compak::error::ArchiveError),

    #[error("Failed to fetch from remote source: {0}")]
    #[diagnostic(
        code(get_core::fetch),
        help("Verify the repo URL is correct and accessible")
    )]
    FailedToFetchRemote(String),

    #[error("Invalid URL: {0}")]
    #[diagnostic(code(get_core::invalid_url))]
    InvalidUrl(String),

    #[error("Package '{0}' not found")]
    #[diagnostic(
        code(get_core::package_not_found),
        help("Check the package name against `get list`")
    )]
    PackageNotFound(String),

    #[error("Repo '{0}' not found")]
    #[diagnostic(code(get_core::repo_not_found))]
    RepoNotFound(String),

    #[error("There are no repos configured!")]
    #[diagnostic(
        code(get_core::no_repos),
        help("Check repos.json in the config directory")
    )]
    NoReposConfigured,
}

/// A specialized Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CoreError>;

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
        self.map_err(|err| CoreError::IoError {
            action: context(),
            source: err,
        })
    }
}
