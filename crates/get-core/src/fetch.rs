//! Downloading package archives into the scratch directory.

use std::{fs::File, io, path::Path};

use tracing::debug;

use crate::{
    error::{ErrorContext, Result},
    http::AGENT,
};

/// Fetches package archives.
///
/// A download that cannot be located (404, unreachable host) is an expected
/// condition and reported as `Ok(false)`; only local I/O problems surface
/// as errors.
pub trait ArchiveFetcher {
    /// Fetches the archive at `url` into `dest`. Returns whether the remote
    /// file could be located.
    fn fetch(&self, url: &str, dest: &Path) -> Result<bool>;
}

/// Single-attempt blocking HTTP fetcher. No retries, no resume.
#[derive(Default, Clone)]
pub struct HttpFetcher;

impl ArchiveFetcher for HttpFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<bool> {
        debug!("Downloading {url} to {}", dest.display());

        let resp = match AGENT.get(url).call() {
            Ok(resp) => resp,
            Err(err) => {
                debug!("Request for {url} failed: {err}");
                return Ok(false);
            }
        };

        if !resp.status().is_success() {
            debug!("Request for {url} returned {}", resp.status());
            return Ok(false);
        }

        let mut file =
            File::create(dest).with_context(|| format!("creating {}", dest.display()))?;
        let mut reader = resp.into_body().into_reader();
        io::copy(&mut reader, &mut file)
            .with_context(|| format!("writing download to {}", dest.display()))?;

        Ok(true)
    }
}
