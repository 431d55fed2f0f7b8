use get_core::{CatalogStore, InstallStatus};
use nu_ansi_term::Color::{Blue, Green, LightRed, Yellow};
use tracing::info;

use crate::utils::Colored;

/// Prints the reconciled catalog, one package per line.
pub fn list_packages(store: &CatalogStore) {
    if store.packages().is_empty() {
        info!("--> No packages available");
        return;
    }

    for pkg in store.packages() {
        let status_marker = match pkg.status {
            InstallStatus::NotInstalled => String::new(),
            InstallStatus::Installed => format!(" {}", Colored(Yellow, "[installed]")),
            InstallStatus::UpdateAvailable => format!(" {}", Colored(LightRed, "[update]")),
        };

        info!(
            "{}:{} | {}{}",
            Colored(Blue, &pkg.name),
            Colored(Green, &pkg.repo_name),
            pkg.version,
            status_marker
        );
    }
}
