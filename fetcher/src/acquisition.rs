//! Acquisition of a resolved build onto local disk.
//!
//! Decides whether a download is needed, performs it, and verifies the
//! result:
//!
//! 1. An existing destination whose digest matches is left alone
//!    ([`AcquisitionOutcome::AlreadyPresent`]), even when downloads are
//!    skipped.
//! 2. With downloads skipped nothing is touched
//!    ([`AcquisitionOutcome::Skipped`]).
//! 3. Otherwise the stale destination is removed, the artefact is
//!    downloaded into its place, and the digest is checked again. A
//!    mismatch is reported as [`AcquisitionOutcome::Invalid`]; the file is
//!    left for the caller to deal with.

use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info};
use std::io;
use thiserror::Error;

use crate::api::{ApiError, ArtifactDownloader, BuildInfo};
use crate::files::FileService;
use crate::integrity::{Sha256Digest, compute_sha256, digest_matches};

/// What [`ensure_artifact`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcquisitionOutcome {
    /// The destination already holds the resolved artefact.
    AlreadyPresent,
    /// Downloading was disabled; the destination was not touched.
    Skipped,
    /// The artefact was downloaded and verified.
    Downloaded {
        /// Number of bytes written.
        bytes: u64,
    },
    /// The artefact was downloaded but its digest does not match.
    Invalid {
        /// Digest published by the API.
        expected: String,
        /// Digest of the downloaded file.
        actual: Sha256Digest,
    },
}

/// Parameters for a single acquisition.
#[derive(Debug, Clone, Copy)]
pub struct AcquisitionRequest<'a> {
    /// The resolved build.
    pub build: &'a BuildInfo,
    /// Where the artefact should end up.
    pub destination: &'a Utf8Path,
    /// Check the destination but never download.
    pub skip_download: bool,
}

/// Errors arising from acquisition.
#[derive(Debug, Error)]
pub enum AcquisitionError {
    /// The destination exists but could not be read for verification.
    #[error("failed to verify {path}")]
    Verify {
        /// The file being verified.
        path: Utf8PathBuf,
        /// The underlying read failure.
        #[source]
        source: io::Error,
    },

    /// A stale destination could not be removed before downloading.
    #[error("failed to remove stale file {path}")]
    Cleanup {
        /// The file that could not be removed.
        path: Utf8PathBuf,
        /// The underlying removal failure.
        #[source]
        source: io::Error,
    },

    /// The download itself failed.
    #[error(transparent)]
    Download(#[from] ApiError),
}

/// Ensure `request.destination` holds the artefact of `request.build`.
///
/// # Errors
///
/// Returns [`AcquisitionError`] when the destination cannot be read or
/// removed, or the download fails. A digest mismatch after downloading is
/// not an error at this layer; see [`AcquisitionOutcome::Invalid`].
pub fn ensure_artifact(
    request: &AcquisitionRequest<'_>,
    downloader: &dyn ArtifactDownloader,
    files: &dyn FileService,
) -> Result<AcquisitionOutcome, AcquisitionError> {
    let destination = request.destination;
    let expected = request.build.sha256.as_str();

    if files.exists(destination.as_std_path()) && verify(destination, expected)? {
        debug!("{destination} already matches sha256 {expected}");
        return Ok(AcquisitionOutcome::AlreadyPresent);
    }

    if request.skip_download {
        debug!("download skipped; {destination} left untouched");
        return Ok(AcquisitionOutcome::Skipped);
    }

    files
        .delete_if_exists(destination.as_std_path())
        .map_err(|source| AcquisitionError::Cleanup {
            path: destination.to_owned(),
            source,
        })?;

    info!(
        "downloading {} to {destination}",
        request.build.artifact_name
    );
    let bytes = downloader.download_artifact(request.build, destination.as_std_path())?;

    let actual =
        compute_sha256(destination.as_std_path()).map_err(|source| AcquisitionError::Verify {
            path: destination.to_owned(),
            source,
        })?;
    if actual.matches(expected) {
        Ok(AcquisitionOutcome::Downloaded { bytes })
    } else {
        Ok(AcquisitionOutcome::Invalid {
            expected: expected.to_owned(),
            actual,
        })
    }
}

fn verify(path: &Utf8Path, expected: &str) -> Result<bool, AcquisitionError> {
    digest_matches(path.as_std_path(), expected).map_err(|source| AcquisitionError::Verify {
        path: path.to_owned(),
        source,
    })
}

#[cfg(test)]
#[path = "acquisition_tests.rs"]
mod tests;
