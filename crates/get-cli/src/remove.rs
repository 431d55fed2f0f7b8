use get_core::{CatalogStore, Result};
use tracing::error;

/// Removes each named package in turn. Unknown names are reported and
/// counted as failures without stopping the rest.
pub fn remove_packages(store: &mut CatalogStore, packages: &[String]) -> Result<bool> {
    let mut all_ok = true;

    for name in packages {
        match store.remove(name) {
            Ok(_) => {}
            Err(get_core::CoreError::PackageNotFound(name)) => {
                error!("--> Package [{name}] not found in any enabled repo");
                all_ok = false;
            }
            Err(err) => return Err(err),
        }
    }

    Ok(all_ok)
}
