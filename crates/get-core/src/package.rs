//! Package model and local install-status derivation.

use std::{fmt, fs, path::Path, path::PathBuf};

use get_config::Repository;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ErrorContext, Result};

/// File written into an installed package's directory at install time.
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

fn empty_is_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.is_empty()))
}

/// Package metadata as advertised by a repo's `repo.json` index.
///
/// Only `name` and `version` are required; everything else is informational
/// and empty strings are normalized to `None`. When `url` is absent the
/// download location is derived from the owning repo's URL
/// (`<repo url>/zips/<name>.zip`).
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct RemotePackage {
    pub name: String,
    pub version: String,

    #[serde(default, deserialize_with = "empty_is_none")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "empty_is_none")]
    pub author: Option<String>,

    #[serde(default, deserialize_with = "empty_is_none")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "empty_is_none")]
    pub category: Option<String>,

    #[serde(default, deserialize_with = "empty_is_none")]
    pub url: Option<String>,
}

/// Local install status, derived from the package directory on every
/// reconciliation pass and never persisted as authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStatus {
    NotInstalled,
    Installed,
    UpdateAvailable,
}

impl fmt::Display for InstallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallStatus::NotInstalled => write!(f, "not installed"),
            InstallStatus::Installed => write!(f, "installed"),
            InstallStatus::UpdateAvailable => write!(f, "update available"),
        }
    }
}

/// One installable unit advertised by a repo.
///
/// Instances are created fresh on every reconciliation pass; none survives
/// a rebuild of the catalog. The owning repo is referenced by name only,
/// for diagnostics.
#[derive(Debug, Clone)]
pub struct Package {
    pub name: String,
    pub version: String,
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub repo_name: String,
    pub download_url: String,
    pub status: InstallStatus,
}

impl Package {
    pub fn from_remote(remote: RemotePackage, repo: &Repository) -> Self {
        let download_url = remote.url.unwrap_or_else(|| {
            format!(
                "{}/zips/{}.zip",
                repo.url.trim_end_matches('/'),
                remote.name
            )
        });

        Self {
            name: remote.name,
            version: remote.version,
            title: remote.title,
            author: remote.author,
            description: remote.description,
            category: remote.category,
            repo_name: repo.name.clone(),
            download_url,
            status: InstallStatus::NotInstalled,
        }
    }

    /// The directory this package occupies when installed.
    pub fn install_dir(&self, pkg_path: &Path) -> PathBuf {
        pkg_path.join(&self.name)
    }

    /// Recomputes the install status from the local package directory.
    ///
    /// A missing directory means not installed. An existing directory with a
    /// readable manifest is compared by version; a directory without one
    /// (written by an older client) still counts as installed.
    pub fn update_status(&mut self, pkg_path: &Path) {
        let install_dir = self.install_dir(pkg_path);

        self.status = if !install_dir.is_dir() {
            InstallStatus::NotInstalled
        } else {
            match InstalledManifest::load(&install_dir) {
                Some(manifest) if manifest.version == self.version => InstallStatus::Installed,
                Some(_) => InstallStatus::UpdateAvailable,
                None => InstallStatus::Installed,
            }
        };
    }
}

/// Record of an installed package, written next to its files.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InstalledManifest {
    pub name: String,
    pub version: String,
    pub repo: String,
    pub files: Vec<PathBuf>,
}

impl InstalledManifest {
    /// Reads the manifest from an install directory, if present and valid.
    pub fn load(install_dir: &Path) -> Option<Self> {
        let content = fs::read_to_string(install_dir.join(MANIFEST_FILE_NAME)).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Writes the manifest into an install (or staging) directory.
    pub fn write(&self, install_dir: &Path) -> Result<()> {
        let path = install_dir.join(MANIFEST_FILE_NAME);
        let content = serde_json::to_string(self)?;
        fs::write(&path, content)
            .with_context(|| format!("writing manifest to {}", path.display()))?;
        Ok(())
    }
}
