//! Local file collaborator used by the acquisition step.

use log::warn;
use std::io;
use std::path::Path;

/// Existence check and removal for the destination file.
#[cfg_attr(test, mockall::automock)]
pub trait FileService {
    /// Return true when `path` exists.
    ///
    /// An error while probing is logged and treated as absence.
    fn exists(&self, path: &Path) -> bool;

    /// Remove the file at `path`, doing nothing if it is absent.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if an existing file cannot be removed.
    fn delete_if_exists(&self, path: &Path) -> io::Result<()>;
}

/// [`FileService`] backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileService;

impl FileService for LocalFileService {
    fn exists(&self, path: &Path) -> bool {
        match path.try_exists() {
            Ok(exists) => exists,
            Err(e) => {
                warn!("could not check whether {} exists: {e}", path.display());
                false
            }
        }
    }

    fn delete_if_exists(&self, path: &Path) -> io::Result<()> {
        match std::fs::remove_file(path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}
