//! The catalog store: one source of truth for configured repos and
//! reconciled package state.

use std::path::{Path, PathBuf};

use get_config::{load_repos, save_repos, Repository, REPO_FILE_NAME};
use get_utils::fs::{ensure_dir_exists, safe_remove};
use tracing::{error, info, warn};

use crate::{
    catalog::{CatalogSource, HttpCatalog},
    error::{CoreError, Result},
    extract::{ArchiveExtractor, CompakExtractor},
    fetch::{ArchiveFetcher, HttpFetcher},
    install::PackageInstaller,
    package::Package,
};

/// Subdirectory of the config dir that installed packages live in.
pub const PACKAGES_DIR_NAME: &str = "packages";

/// Subdirectory of the config dir used as download scratch space.
pub const TMP_DIR_NAME: &str = "tmp";

/// Owns the repo and package collections and keeps them reconciled against
/// configuration and filesystem truth.
///
/// Every mutating operation ends with a full [`update`](Self::update) pass,
/// so callers never observe a package collection that is stale with respect
/// to the enabled-repo set or the local package directory. All operations
/// are blocking and run to completion; mutation requires `&mut self`, which
/// keeps the single-writer discipline in the type system.
pub struct CatalogStore {
    repos: Vec<Repository>,
    packages: Vec<Package>,
    repos_path: PathBuf,
    pkg_path: PathBuf,
    tmp_path: PathBuf,
    default_repo_url: String,
    catalog: Box<dyn CatalogSource>,
    fetcher: Box<dyn ArchiveFetcher>,
    extractor: Box<dyn ArchiveExtractor>,
}

impl CatalogStore {
    /// Opens the store at `config_dir` with the HTTP/zip collaborators.
    pub fn new<P: AsRef<Path>>(config_dir: P, default_repo_url: &str) -> Self {
        Self::with_collaborators(
            config_dir,
            default_repo_url,
            Box::new(HttpCatalog),
            Box::new(HttpFetcher),
            Box::new(CompakExtractor),
        )
    }

    /// Opens the store with caller-provided collaborators.
    ///
    /// Ensures the config, package, and scratch directories exist
    /// (best-effort), loads the repo list, and runs an initial
    /// reconciliation pass.
    pub fn with_collaborators<P: AsRef<Path>>(
        config_dir: P,
        default_repo_url: &str,
        catalog: Box<dyn CatalogSource>,
        fetcher: Box<dyn ArchiveFetcher>,
        extractor: Box<dyn ArchiveExtractor>,
    ) -> Self {
        let config_dir = config_dir.as_ref();
        let repos_path = config_dir.join(REPO_FILE_NAME);
        let pkg_path = config_dir.join(PACKAGES_DIR_NAME);
        let tmp_path = config_dir.join(TMP_DIR_NAME);

        for dir in [config_dir, &pkg_path, &tmp_path] {
            if dir.exists() {
                continue;
            }
            if let Err(err) = ensure_dir_exists(dir) {
                warn!("--> Could not create {}: {err}", dir.display());
                continue;
            }
            // freshly created dirs are owner-only
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let _ = std::fs::set_permissions(dir, std::fs::Permissions::from_mode(0o700));
            }
        }

        info!("--> Using \"{}\" as repo list", repos_path.display());

        let mut store = Self {
            repos: Vec::new(),
            packages: Vec::new(),
            repos_path,
            pkg_path,
            tmp_path,
            default_repo_url: default_repo_url.to_string(),
            catalog,
            fetcher,
            extractor,
        };

        store.load_repos();
        store.update();
        store
    }

    /// Replaces the repo collection from `repos.json`, regenerating
    /// defaults when the file is missing or empty.
    pub fn load_repos(&mut self) {
        self.repos = load_repos(&self.repos_path, &self.default_repo_url);
    }

    /// Rebuilds the package collection from the enabled repos and refreshes
    /// every package's install status from the package directory.
    ///
    /// A repo whose index cannot be fetched contributes zero packages; this
    /// is logged per-repo and never fatal.
    pub fn update(&mut self) {
        self.packages.clear();

        for repo in &self.repos {
            if !repo.enabled {
                continue;
            }

            match self.catalog.load_packages(repo) {
                Ok(remotes) => {
                    self.packages.extend(
                        remotes
                            .into_iter()
                            .map(|remote| Package::from_remote(remote, repo)),
                    );
                }
                Err(err) => {
                    warn!("--> Could not load packages from [{}]: {err}", repo.name);
                }
            }
        }

        for package in &mut self.packages {
            package.update_status(&self.pkg_path);
        }
    }

    /// Downloads and installs the named package.
    ///
    /// Returns `Ok(false)` when the archive could not be located (404 or
    /// unreachable host); nothing is mutated in that case. Installer-step
    /// failures surface as errors. On success a reconciliation pass runs
    /// before returning `Ok(true)`.
    pub fn install(&mut self, pkg_name: &str) -> Result<bool> {
        let package = self
            .find_package(pkg_name)
            .cloned()
            .ok_or_else(|| CoreError::PackageNotFound(pkg_name.to_string()))?;

        // found the package in a remote server, fetch it
        let archive = self.tmp_path.join(format!("{}.zip", package.name));
        let located = self.fetcher.fetch(&package.download_url, &archive)?;

        if !located {
            // the repo advertised this zip, but it isn't there
            error!(
                "--> Error retrieving remote file for [{}] (check network or 404 error?)",
                package.name
            );
            return Ok(false);
        }

        PackageInstaller::new(&package, &self.pkg_path, &self.tmp_path)
            .install(self.extractor.as_ref(), &archive)?;

        info!("--> Installed [{}]", package.name);

        self.update();
        Ok(true)
    }

    /// Removes the named package's installed files.
    ///
    /// Removing a package that is not installed is a filesystem no-op and
    /// still succeeds. Ends with a reconciliation pass.
    pub fn remove(&mut self, pkg_name: &str) -> Result<bool> {
        let package = self
            .find_package(pkg_name)
            .cloned()
            .ok_or_else(|| CoreError::PackageNotFound(pkg_name.to_string()))?;

        safe_remove(package.install_dir(&self.pkg_path))?;
        info!("--> Uninstalled [{}] package", package.name);

        self.update();
        Ok(true)
    }

    /// Flips the named repo's enabled flag, persists the repo list, and
    /// reconciles.
    ///
    /// A failure to persist is logged and non-fatal; the in-memory toggle
    /// still takes effect.
    pub fn toggle_repo(&mut self, repo_name: &str) -> Result<bool> {
        let repo = self
            .repos
            .iter_mut()
            .find(|repo| repo.name == repo_name)
            .ok_or_else(|| CoreError::RepoNotFound(repo_name.to_string()))?;

        repo.enabled = !repo.enabled;

        if let Err(err) = save_repos(&self.repos_path, &self.repos) {
            warn!("--> Could not persist repo list: {err}");
        }

        self.update();
        Ok(true)
    }

    /// Checks that at least one repo is configured.
    pub fn validate_repos(&self) -> Result<()> {
        if self.repos.is_empty() {
            return Err(CoreError::NoReposConfigured);
        }

        Ok(())
    }

    pub fn repos(&self) -> &[Repository] {
        &self.repos
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn find_package(&self, name: &str) -> Option<&Package> {
        self.packages.iter().find(|pkg| pkg.name == name)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        fs,
        fs::File,
        io::Write,
        path::Path,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc,
        },
    };

    use get_config::repository::DEFAULT_REPO_NAME;

    use super::*;
    use crate::package::{InstallStatus, RemotePackage};

    const FALLBACK_URL: &str = "https://example.com/pkgs";

    /// Serves a fixed package list per repo URL.
    struct FakeCatalog {
        by_url: HashMap<String, Vec<RemotePackage>>,
    }

    impl FakeCatalog {
        fn new(entries: &[(&str, &[(&str, &str)])]) -> Self {
            let by_url = entries
                .iter()
                .map(|(url, pkgs)| {
                    let remotes = pkgs
                        .iter()
                        .map(|(name, version)| RemotePackage {
                            name: name.to_string(),
                            version: version.to_string(),
                            ..Default::default()
                        })
                        .collect();
                    (url.to_string(), remotes)
                })
                .collect();
            Self { by_url }
        }
    }

    impl CatalogSource for FakeCatalog {
        fn load_packages(&self, repo: &Repository) -> Result<Vec<RemotePackage>> {
            self.by_url
                .get(&repo.url)
                .cloned()
                .ok_or_else(|| CoreError::FailedToFetchRemote(repo.url.clone()))
        }
    }

    /// Writes an empty archive file, or reports not-located.
    struct FakeFetcher {
        located: bool,
        calls: Arc<AtomicUsize>,
    }

    impl FakeFetcher {
        fn new(located: bool) -> Self {
            Self {
                located,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl ArchiveFetcher for FakeFetcher {
        fn fetch(&self, _url: &str, dest: &Path) -> Result<bool> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.located {
                return Ok(false);
            }
            File::create(dest).unwrap();
            Ok(true)
        }
    }

    /// Pretends every archive contains one payload file.
    struct FakeExtractor;

    impl ArchiveExtractor for FakeExtractor {
        fn extract(&self, _archive: &Path, dest: &Path) -> Result<()> {
            let mut f = File::create(dest.join("payload.bin")).unwrap();
            f.write_all(b"data").unwrap();
            Ok(())
        }
    }

    fn store_with(
        config_dir: &Path,
        catalog: FakeCatalog,
        fetcher: FakeFetcher,
    ) -> CatalogStore {
        CatalogStore::with_collaborators(
            config_dir,
            FALLBACK_URL,
            Box::new(catalog),
            Box::new(fetcher),
            Box::new(FakeExtractor),
        )
    }

    fn write_repos(config_dir: &Path, body: &str) {
        fs::create_dir_all(config_dir).unwrap();
        fs::write(config_dir.join(REPO_FILE_NAME), body).unwrap();
    }

    fn two_repo_doc() -> &'static str {
        r#"{"repos":[
            {"name": "main", "url": "https://main.example", "enabled": true},
            {"name": "extra", "url": "https://extra.example", "enabled": false}
        ]}"#
    }

    fn snapshot(store: &CatalogStore) -> Vec<(String, InstallStatus)> {
        store
            .packages()
            .iter()
            .map(|pkg| (pkg.name.clone(), pkg.status))
            .collect()
    }

    #[test]
    fn test_bootstrap_creates_layout_and_default_config() {
        let tmp = tempfile::tempdir().unwrap();
        let config_dir = tmp.path().join("get");

        let store = store_with(
            &config_dir,
            FakeCatalog::new(&[(FALLBACK_URL, &[("appstore", "2.2")])]),
            FakeFetcher::new(true),
        );

        assert!(config_dir.join(PACKAGES_DIR_NAME).is_dir());
        assert!(config_dir.join(TMP_DIR_NAME).is_dir());

        let written = fs::read_to_string(config_dir.join(REPO_FILE_NAME)).unwrap();
        assert_eq!(
            written,
            r#"{"repos":[{"name":"Default Repo","url":"https://example.com/pkgs","enabled":true}]}"#
        );

        assert_eq!(store.repos().len(), 1);
        assert_eq!(store.repos()[0].name, DEFAULT_REPO_NAME);
        store.validate_repos().unwrap();

        // initial reconciliation already ran
        assert_eq!(store.packages().len(), 1);
        assert_eq!(store.packages()[0].name, "appstore");
        assert_eq!(store.packages()[0].status, InstallStatus::NotInstalled);
    }

    #[test]
    fn test_only_enabled_repos_contribute() {
        let tmp = tempfile::tempdir().unwrap();
        write_repos(tmp.path(), two_repo_doc());

        let store = store_with(
            tmp.path(),
            FakeCatalog::new(&[
                ("https://main.example", &[("vgedit", "1.0")]),
                ("https://extra.example", &[("chesto", "3.0")]),
            ]),
            FakeFetcher::new(true),
        );

        assert_eq!(store.packages().len(), 1);
        assert_eq!(store.packages()[0].name, "vgedit");
        assert_eq!(store.packages()[0].repo_name, "main");
    }

    #[test]
    fn test_update_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        write_repos(tmp.path(), two_repo_doc());

        let mut store = store_with(
            tmp.path(),
            FakeCatalog::new(&[
                ("https://main.example", &[("vgedit", "1.0"), ("hbas", "2.0")]),
                ("https://extra.example", &[]),
            ]),
            FakeFetcher::new(true),
        );

        let first = snapshot(&store);
        store.update();
        assert_eq!(first, snapshot(&store));
    }

    #[test]
    fn test_toggle_removes_and_restores_packages() {
        let tmp = tempfile::tempdir().unwrap();
        write_repos(tmp.path(), two_repo_doc());

        let mut store = store_with(
            tmp.path(),
            FakeCatalog::new(&[
                ("https://main.example", &[("vgedit", "1.0")]),
                ("https://extra.example", &[("chesto", "3.0")]),
            ]),
            FakeFetcher::new(true),
        );

        assert!(store.toggle_repo("extra").unwrap());
        let names: Vec<_> = store.packages().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["vgedit", "chesto"]);

        assert!(store.toggle_repo("main").unwrap());
        let names: Vec<_> = store.packages().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["chesto"]);

        assert!(store.toggle_repo("main").unwrap());
        let names: Vec<_> = store.packages().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["vgedit", "chesto"]);
    }

    #[test]
    fn test_toggle_persists_to_repo_config() {
        let tmp = tempfile::tempdir().unwrap();
        write_repos(tmp.path(), two_repo_doc());

        let mut store = store_with(
            tmp.path(),
            FakeCatalog::new(&[
                ("https://main.example", &[]),
                ("https://extra.example", &[]),
            ]),
            FakeFetcher::new(true),
        );

        store.toggle_repo("extra").unwrap();

        let content = fs::read_to_string(tmp.path().join(REPO_FILE_NAME)).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(doc["repos"][1]["name"], "extra");
        assert_eq!(doc["repos"][1]["enabled"], true);
    }

    #[test]
    fn test_install_success_updates_status() {
        let tmp = tempfile::tempdir().unwrap();
        write_repos(tmp.path(), two_repo_doc());

        let mut store = store_with(
            tmp.path(),
            FakeCatalog::new(&[
                ("https://main.example", &[("vgedit", "1.0")]),
                ("https://extra.example", &[]),
            ]),
            FakeFetcher::new(true),
        );

        assert!(store.install("vgedit").unwrap());

        let pkg = store.find_package("vgedit").unwrap();
        assert_eq!(pkg.status, InstallStatus::Installed);
        assert!(tmp
            .path()
            .join(PACKAGES_DIR_NAME)
            .join("vgedit/payload.bin")
            .is_file());
    }

    #[test]
    fn test_install_download_failure_leaves_state_unchanged() {
        let tmp = tempfile::tempdir().unwrap();
        write_repos(tmp.path(), two_repo_doc());

        let fetcher = FakeFetcher::new(false);
        let calls = fetcher.calls.clone();
        let mut store = store_with(
            tmp.path(),
            FakeCatalog::new(&[
                ("https://main.example", &[("vgedit", "1.0")]),
                ("https://extra.example", &[]),
            ]),
            fetcher,
        );

        let before = snapshot(&store);
        assert!(!store.install("vgedit").unwrap());

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(before, snapshot(&store));
        assert_eq!(
            store.find_package("vgedit").unwrap().status,
            InstallStatus::NotInstalled
        );
        assert!(!tmp.path().join(PACKAGES_DIR_NAME).join("vgedit").exists());
    }

    #[test]
    fn test_install_unknown_package_errors() {
        let tmp = tempfile::tempdir().unwrap();
        write_repos(tmp.path(), two_repo_doc());

        let mut store = store_with(
            tmp.path(),
            FakeCatalog::new(&[
                ("https://main.example", &[]),
                ("https://extra.example", &[]),
            ]),
            FakeFetcher::new(true),
        );

        let err = store.install("ghost").unwrap_err();
        assert!(matches!(err, CoreError::PackageNotFound(_)));
    }

    #[test]
    fn test_remove_installed_package() {
        let tmp = tempfile::tempdir().unwrap();
        write_repos(tmp.path(), two_repo_doc());

        let mut store = store_with(
            tmp.path(),
            FakeCatalog::new(&[
                ("https://main.example", &[("vgedit", "1.0")]),
                ("https://extra.example", &[]),
            ]),
            FakeFetcher::new(true),
        );

        assert!(store.install("vgedit").unwrap());
        assert!(store.remove("vgedit").unwrap());

        assert_eq!(
            store.find_package("vgedit").unwrap().status,
            InstallStatus::NotInstalled
        );
        assert!(!tmp.path().join(PACKAGES_DIR_NAME).join("vgedit").exists());
    }

    #[test]
    fn test_remove_absent_package_is_noop_success() {
        let tmp = tempfile::tempdir().unwrap();
        write_repos(tmp.path(), two_repo_doc());

        let mut store = store_with(
            tmp.path(),
            FakeCatalog::new(&[
                ("https://main.example", &[("vgedit", "1.0")]),
                ("https://extra.example", &[]),
            ]),
            FakeFetcher::new(true),
        );

        assert!(store.remove("vgedit").unwrap());
    }

    #[test]
    fn test_update_detects_version_bump() {
        let tmp = tempfile::tempdir().unwrap();
        write_repos(tmp.path(), two_repo_doc());

        let mut store = store_with(
            tmp.path(),
            FakeCatalog::new(&[
                ("https://main.example", &[("vgedit", "1.0")]),
                ("https://extra.example", &[]),
            ]),
            FakeFetcher::new(true),
        );
        assert!(store.install("vgedit").unwrap());

        // the repo now advertises a newer version
        let mut store = store_with(
            tmp.path(),
            FakeCatalog::new(&[
                ("https://main.example", &[("vgedit", "2.0")]),
                ("https://extra.example", &[]),
            ]),
            FakeFetcher::new(true),
        );

        assert_eq!(
            store.find_package("vgedit").unwrap().status,
            InstallStatus::UpdateAvailable
        );

        // installing the new version settles the status
        assert!(store.install("vgedit").unwrap());
        assert_eq!(
            store.find_package("vgedit").unwrap().status,
            InstallStatus::Installed
        );
    }

    #[test]
    fn test_unreachable_repo_contributes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        write_repos(
            tmp.path(),
            r#"{"repos":[
                {"name": "main", "url": "https://main.example", "enabled": true},
                {"name": "down", "url": "https://down.example", "enabled": true}
            ]}"#,
        );

        // FakeCatalog has no entry for down.example, so it errors
        let store = store_with(
            tmp.path(),
            FakeCatalog::new(&[("https://main.example", &[("vgedit", "1.0")])]),
            FakeFetcher::new(true),
        );

        let names: Vec<_> = store.packages().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["vgedit"]);
    }

    #[test]
    fn test_invalid_format_leaves_repos_empty() {
        let tmp = tempfile::tempdir().unwrap();
        write_repos(tmp.path(), r#"{"notrepos": []}"#);

        let store = store_with(
            tmp.path(),
            FakeCatalog::new(&[]),
            FakeFetcher::new(true),
        );

        assert!(store.repos().is_empty());
        assert!(store.packages().is_empty());
        let err = store.validate_repos().unwrap_err();
        assert!(matches!(err, CoreError::NoReposConfigured));
    }
}
