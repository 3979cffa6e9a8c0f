//! Artefact download.

use std::path::Path;

use super::build_info::BuildInfo;
use super::client::HttpApi;
use super::error::ApiError;

/// Downloads the application artefact of a build.
///
/// Abstractions allow tests to observe whether a download happened without
/// network access.
#[cfg_attr(test, mockall::automock)]
pub trait ArtifactDownloader {
    /// Download the artefact described by `build` into a new file at `dest`.
    ///
    /// Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the file cannot be written.
    fn download_artifact(&self, build: &BuildInfo, dest: &Path) -> Result<u64, ApiError>;
}

impl ArtifactDownloader for HttpApi {
    fn download_artifact(&self, build: &BuildInfo, dest: &Path) -> Result<u64, ApiError> {
        let url = self.artifact_url(&build.version, build.build, &build.artifact_name);
        self.download_to_file(&url, dest)
    }
}
