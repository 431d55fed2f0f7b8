//! Loading and persisting the `repos.json` document.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    error::{ErrorContext, Result},
    repository::Repository,
};

/// File name of the repo list inside the config directory.
pub const REPO_FILE_NAME: &str = "repos.json";

/// The persisted document: a single top-level `repos` array.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RepoDoc {
    pub repos: Vec<Repository>,
}

/// Loads the repo collection from `repos_path`, regenerating defaults as needed.
///
/// - Missing or empty file: a document with one [`Repository::default_entry`]
///   for `default_url` is written, then loaded back.
/// - Unwritable config location: a single in-memory
///   [`Repository::offline_fallback`] is returned so the process can proceed.
/// - Document without the `repos` key (or otherwise malformed): reported as
///   invalid and an empty collection is returned, no auto-repair.
///
/// The returned order equals the document array order.
pub fn load_repos(repos_path: &Path, default_url: &str) -> Vec<Repository> {
    let content = match fs::read_to_string(repos_path) {
        Ok(content) if !content.trim().is_empty() => content,
        _ => {
            info!(
                "--> Could not load repos from \"{}\", generating default repos.json",
                repos_path.display()
            );

            let doc = RepoDoc {
                repos: vec![Repository::default_entry(default_url)],
            };

            match write_doc(repos_path, &doc) {
                Ok(content) => content,
                Err(err) => {
                    warn!("--> Could not generate a new repos.json: {err}");
                    // no filesystem access at all, proceed with one repo in memory
                    return vec![Repository::offline_fallback(default_url)];
                }
            }
        }
    };

    match serde_json::from_str::<RepoDoc>(&content) {
        Ok(doc) => doc.repos,
        Err(err) => {
            warn!("--> Invalid format in \"{}\": {err}", repos_path.display());
            Vec::new()
        }
    }
}

/// Persists the given repo collection back to `repos_path`.
pub fn save_repos(repos_path: &Path, repos: &[Repository]) -> Result<()> {
    let doc = RepoDoc {
        repos: repos.to_vec(),
    };
    write_doc(repos_path, &doc)?;
    Ok(())
}

fn write_doc(repos_path: &Path, doc: &RepoDoc) -> Result<String> {
    let content = serde_json::to_string(doc)?;
    fs::write(repos_path, &content)
        .with_context(|| format!("writing repo list to {}", repos_path.display()))?;
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{DEFAULT_REPO_NAME, OFFLINE_FALLBACK_REPO_NAME};

    const FALLBACK_URL: &str = "https://example.com/pkgs";

    #[test]
    fn test_missing_file_generates_default() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(REPO_FILE_NAME);

        let repos = load_repos(&path, FALLBACK_URL);

        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].name, DEFAULT_REPO_NAME);
        assert_eq!(repos[0].url, FALLBACK_URL);
        assert!(repos[0].enabled);

        // the generated document matches the documented shape exactly
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            r#"{"repos":[{"name":"Default Repo","url":"https://example.com/pkgs","enabled":true}]}"#
        );
    }

    #[test]
    fn test_empty_file_treated_as_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(REPO_FILE_NAME);
        fs::write(&path, "").unwrap();

        let repos = load_repos(&path, FALLBACK_URL);
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].name, DEFAULT_REPO_NAME);
    }

    #[test]
    fn test_round_trip_default() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(REPO_FILE_NAME);

        let first = load_repos(&path, FALLBACK_URL);
        let second = load_repos(&path, FALLBACK_URL);
        assert_eq!(first, second);
    }

    #[test]
    fn test_unwritable_location_falls_back_in_memory() {
        // parent directory does not exist, so the default doc cannot be written
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("no/such/dir").join(REPO_FILE_NAME);

        let repos = load_repos(&path, FALLBACK_URL);
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].name, OFFLINE_FALLBACK_REPO_NAME);
        assert_eq!(repos[0].url, FALLBACK_URL);
        assert!(repos[0].enabled);
    }

    #[test]
    fn test_missing_repos_key_is_invalid_format() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(REPO_FILE_NAME);
        fs::write(&path, r#"{"notrepos": []}"#).unwrap();

        let repos = load_repos(&path, FALLBACK_URL);
        assert!(repos.is_empty());

        // not auto-repaired
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, r#"{"notrepos": []}"#);
    }

    #[test]
    fn test_document_order_is_preserved() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(REPO_FILE_NAME);
        fs::write(
            &path,
            r#"{"repos":[
                {"name": "b", "url": "https://b.example", "enabled": false},
                {"name": "a", "url": "https://a.example", "enabled": true}
            ]}"#,
        )
        .unwrap();

        let repos = load_repos(&path, FALLBACK_URL);
        assert_eq!(repos.len(), 2);
        assert_eq!(repos[0].name, "b");
        assert!(!repos[0].enabled);
        assert_eq!(repos[1].name, "a");
    }

    #[test]
    fn test_save_repos_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(REPO_FILE_NAME);

        let repos = vec![
            Repository {
                name: "main".into(),
                url: "https://main.example".into(),
                enabled: true,
            },
            Repository {
                name: "extra".into(),
                url: "https://extra.example".into(),
                enabled: false,
            },
        ];

        save_repos(&path, &repos).unwrap();
        let loaded = load_repos(&path, FALLBACK_URL);
        assert_eq!(loaded, repos);
    }
}
