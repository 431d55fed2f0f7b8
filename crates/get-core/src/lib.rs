//! Catalog reconciliation engine for the get package manager.
//!
//! The [`CatalogStore`] owns the configured repo collection and the
//! currently-known package collection. It loads repo definitions from
//! `repos.json`, merges the package catalogs of every enabled repo, and
//! reconciles each package's install status against the local package
//! directory. Install, remove, and toggle operations all end with a full
//! reconciliation pass, so callers never observe stale state.
//!
//! Network and archive handling sit behind the [`CatalogSource`],
//! [`ArchiveFetcher`], and [`ArchiveExtractor`] traits; the HTTP/zip
//! implementations live in this crate, and tests inject fakes.
//!
//! [`CatalogSource`]: catalog::CatalogSource
//! [`ArchiveFetcher`]: fetch::ArchiveFetcher
//! [`ArchiveExtractor`]: extract::ArchiveExtractor
//! [`CatalogStore`]: store::CatalogStore

pub mod catalog;
pub mod error;
pub mod extract;
pub mod fetch;
mod http;
pub mod install;
pub mod package;
pub mod store;

pub use catalog::{CatalogSource, HttpCatalog};
pub use error::{CoreError, ErrorContext, Result};
pub use extract::{ArchiveExtractor, CompakExtractor};
pub use fetch::{ArchiveFetcher, HttpFetcher};
pub use package::{InstallStatus, InstalledManifest, Package, RemotePackage};
pub use store::CatalogStore;
