//! Unpacking downloaded archives.

use std::path::Path;

use crate::error::Result;

/// Unpacks a package archive into a directory.
pub trait ArchiveExtractor {
    fn extract(&self, archive: &Path, dest: &Path) -> Result<()>;
}

/// Extractor backed by `compak`, which handles the zip archives repos serve.
#[derive(Default, Clone)]
pub struct CompakExtractor;

impl ArchiveExtractor for CompakExtractor {
    fn extract(&self, archive: &Path, dest: &Path) -> Result<()> {
        compak::extract_archive(archive, dest)?;
        Ok(())
    }
}
