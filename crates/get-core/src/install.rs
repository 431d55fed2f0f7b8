//! Staged, atomic package installation.

use std::{fs, path::Path, path::PathBuf};

use get_utils::fs::{ensure_dir_exists, list_files_recursively, safe_remove};
use tracing::debug;

use crate::{
    error::{ErrorContext, Result},
    extract::ArchiveExtractor,
    package::{InstalledManifest, Package},
};

/// Installs a downloaded archive into the package directory.
///
/// Extraction happens in a staging directory under the scratch path; the
/// manifest is written there and the whole directory is then renamed into
/// place. A failed extraction leaves nothing under the package directory.
pub struct PackageInstaller<'a> {
    package: &'a Package,
    pkg_path: &'a Path,
    tmp_path: &'a Path,
}

impl<'a> PackageInstaller<'a> {
    pub fn new(package: &'a Package, pkg_path: &'a Path, tmp_path: &'a Path) -> Self {
        Self {
            package,
            pkg_path,
            tmp_path,
        }
    }

    fn staging_dir(&self) -> PathBuf {
        self.tmp_path.join(format!("{}.staging", self.package.name))
    }

    pub fn install(&self, extractor: &dyn ArchiveExtractor, archive: &Path) -> Result<()> {
        let staging = self.staging_dir();
        safe_remove(&staging)?;
        ensure_dir_exists(&staging)?;

        debug!(
            "Extracting {} into {}",
            archive.display(),
            staging.display()
        );
        extractor.extract(archive, &staging)?;

        let files = list_files_recursively(&staging)?;
        let manifest = InstalledManifest {
            name: self.package.name.clone(),
            version: self.package.version.clone(),
            repo: self.package.repo_name.clone(),
            files,
        };
        manifest.write(&staging)?;

        let target = self.package.install_dir(self.pkg_path);
        safe_remove(&target)?;
        fs::rename(&staging, &target).with_context(|| {
            format!(
                "moving staged package into {}",
                target.display()
            )
        })?;

        // scratch cleanup
        fs::remove_file(archive).ok();

        Ok(())
    }
}
