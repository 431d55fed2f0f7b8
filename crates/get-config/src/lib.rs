//! Repository configuration for the get package manager.
//!
//! The persisted state is a single JSON document at `<config_dir>/repos.json`:
//!
//! ```json
//! { "repos": [ { "name": "...", "url": "...", "enabled": true } ] }
//! ```
//!
//! A missing or empty file is regenerated with one default entry; a document
//! without the top-level `repos` key is reported as invalid and yields an
//! empty collection.

pub mod error;
pub mod repos;
pub mod repository;

pub use error::{ConfigError, ErrorContext, Result};
pub use repos::{load_repos, save_repos, RepoDoc, REPO_FILE_NAME};
pub use repository::Repository;
