use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::{FileSystemError, FileSystemResult};

/// Creates a directory structure if it doesn't exist.
///
/// If the directory already exists, this function does nothing. If the path
/// exists but is not a directory, an error is returned.
///
/// # Errors
///
/// * [`FileSystemError::Directory`] if the directory could not be created.
/// * [`FileSystemError::NotADirectory`] if the path exists but is not a directory.
pub fn ensure_dir_exists<P: AsRef<Path>>(path: P) -> FileSystemResult<()> {
    let path = path.as_ref();
    if !path.exists() {
        fs::create_dir_all(path).map_err(|err| FileSystemError::Directory {
            path: path.to_path_buf(),
            action: "create",
            source: err,
        })?;
    } else if !path.is_dir() {
        return Err(FileSystemError::NotADirectory {
            path: path.to_path_buf(),
        });
    }

    Ok(())
}

/// Removes the specified file or directory safely.
///
/// If the path does not exist, this returns `Ok(())` without error. A
/// directory is removed recursively, a file with [`fs::remove_file`].
///
/// # Errors
///
/// Returns a [`FileSystemError::File`] if the removal fails for any reason
/// other than the path not existing.
pub fn safe_remove<P: AsRef<Path>>(path: P) -> FileSystemResult<()> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(());
    }

    let result = if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };

    result.map_err(|err| FileSystemError::File {
        path: path.to_path_buf(),
        action: "remove",
        source: err,
    })
}

/// Lists every file under `dir`, returned as paths relative to `dir`.
///
/// Directories themselves are not included in the result. Returns an empty
/// list when `dir` does not exist.
pub fn list_files_recursively<P: AsRef<Path>>(dir: P) -> FileSystemResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut files = Vec::new();
    if !dir.exists() {
        return Ok(files);
    }

    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        let entries = fs::read_dir(&current).map_err(|err| FileSystemError::Directory {
            path: current.clone(),
            action: "read",
            source: err,
        })?;

        for entry in entries {
            let entry = entry.map_err(|err| FileSystemError::Directory {
                path: current.clone(),
                action: "read",
                source: err,
            })?;
            let path = entry.path();
            if path.is_dir() {
                pending.push(path);
            } else if let Ok(relative) = path.strip_prefix(dir) {
                files.push(relative.to_path_buf());
            }
        }
    }

    files.sort();
    Ok(files)
}
