use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised by filesystem helpers.
#[derive(Error, Diagnostic, Debug)]
pub enum FileSystemError {
    #[error("Failed to {action} file `{}`: {source}", path.display())]
    #[diagnostic(code(get_utils::file))]
    File {
        path: PathBuf,
        action: &'static str,
        source: std::io::Error,
    },

    #[error("Failed to {action} directory `{}`: {source}", path.display())]
    #[diagnostic(code(get_utils::directory))]
    Directory {
        path: PathBuf,
        action: &'static str,
        source: std::io::Error,
    },

    #[error("`{}` is not a directory", path.display())]
    #[diagnostic(code(get_utils::not_a_directory))]
    NotADirectory { path: PathBuf },
}

pub type FileSystemResult<T> = std::result::Result<T, FileSystemError>;
