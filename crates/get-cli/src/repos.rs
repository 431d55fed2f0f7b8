use get_core::{CatalogStore, Result};
use nu_ansi_term::Color::{Blue, DarkGray, Green};
use tracing::info;

use crate::utils::Colored;

/// Prints the configured repos in config-file order.
pub fn list_repos(store: &CatalogStore) {
    for repo in store.repos() {
        let marker = if repo.enabled {
            Colored(Green, "[enabled]")
        } else {
            Colored(DarkGray, "[disabled]")
        };
        info!("{} {} {}", marker, Colored(Blue, &repo.name), repo.url);
    }
}

/// Flips a repo's enabled flag and reports the resulting state.
pub fn toggle_repo(store: &mut CatalogStore, name: &str) -> Result<()> {
    store.toggle_repo(name)?;

    let state = store
        .repos()
        .iter()
        .find(|repo| repo.name == name)
        .map(|repo| if repo.enabled { "enabled" } else { "disabled" })
        .unwrap_or("unknown");
    info!("--> Repo [{name}] is now {state}");

    Ok(())
}
