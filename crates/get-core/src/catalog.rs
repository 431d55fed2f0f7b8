//! Fetching and parsing repo package indexes.

use get_config::Repository;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::{
    error::{CoreError, Result},
    http::AGENT,
    package::RemotePackage,
};

/// Shape of the remote `repo.json` index.
#[derive(Debug, Default, Deserialize)]
struct RepoIndex {
    packages: Vec<RemotePackage>,
}

/// A source of package catalogs.
///
/// One implementation per catalog format/transport; the reconciliation
/// engine only ever talks to this trait.
pub trait CatalogSource {
    /// Fetches and parses the package list advertised by `repo`.
    fn load_packages(&self, repo: &Repository) -> Result<Vec<RemotePackage>>;
}

/// Loads `<repo url>/repo.json` over HTTP.
#[derive(Default, Clone)]
pub struct HttpCatalog;

impl CatalogSource for HttpCatalog {
    fn load_packages(&self, repo: &Repository) -> Result<Vec<RemotePackage>> {
        Url::parse(&repo.url).map_err(|err| CoreError::InvalidUrl(err.to_string()))?;

        let index_url = format!("{}/repo.json", repo.url.trim_end_matches('/'));
        debug!("Fetching package index from {index_url}");

        let mut resp = AGENT
            .get(&index_url)
            .call()
            .map_err(|err| CoreError::FailedToFetchRemote(err.to_string()))?;

        if !resp.status().is_success() {
            let msg = format!("{} [{}]", index_url, resp.status());
            return Err(CoreError::FailedToFetchRemote(msg));
        }

        let index: RepoIndex = resp
            .body_mut()
            .read_json()
            .map_err(|err| CoreError::FailedToFetchRemote(err.to_string()))?;

        Ok(index.packages)
    }
}
