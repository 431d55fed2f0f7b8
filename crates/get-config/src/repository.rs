use serde::{Deserialize, Serialize};

/// Name given to the repo entry synthesized when no config file exists.
pub const DEFAULT_REPO_NAME: &str = "Default Repo";

/// Name of the in-memory fallback repo used when the config dir is unwritable.
pub const OFFLINE_FALLBACK_REPO_NAME: &str = "Switchbru";

/// Defines a remote repository that provides packages.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Repository {
    /// Display name of the repository.
    pub name: String,

    /// URL the repository's package index is served from.
    pub url: String,

    /// Whether the repository contributes packages to the catalog.
    pub enabled: bool,
}

impl Repository {
    /// The repo entry written to a freshly generated `repos.json`.
    pub fn default_entry(url: &str) -> Self {
        Self {
            name: DEFAULT_REPO_NAME.to_string(),
            url: url.to_string(),
            enabled: true,
        }
    }

    /// The hardcoded repo used when `repos.json` cannot be written at all.
    pub fn offline_fallback(url: &str) -> Self {
        Self {
            name: OFFLINE_FALLBACK_REPO_NAME.to_string(),
            url: url.to_string(),
            enabled: true,
        }
    }
}
