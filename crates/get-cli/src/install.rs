use get_core::{CatalogStore, Result};
use tracing::error;

/// Installs each named package in turn. Returns whether every install
/// succeeded; a package that cannot be downloaded is reported and counted
/// as a failure without stopping the rest.
pub fn install_packages(store: &mut CatalogStore, packages: &[String]) -> Result<bool> {
    let mut all_ok = true;

    for name in packages {
        match store.install(name) {
            Ok(true) => {}
            Ok(false) => all_ok = false,
            Err(get_core::CoreError::PackageNotFound(name)) => {
                error!("--> Package [{name}] not found in any enabled repo");
                all_ok = false;
            }
            Err(err) => return Err(err),
        }
    }

    Ok(all_ok)
}
