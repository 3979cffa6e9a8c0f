//! Error types for the fetch run.
//!
//! Component errors are carried unchanged inside [`FetchError`]; the only
//! error raised at this level is [`FetchError::IntegrityMismatch`], which
//! turns an invalid download into a failure the operator can tell apart
//! from a network problem. [`FetchError::kind`] flattens everything into
//! the [`ErrorKind`] taxonomy.

use camino::Utf8PathBuf;
use std::fmt;
use thiserror::Error;

use crate::acquisition::AcquisitionError;
use crate::api::ApiError;
use crate::resolution::ResolutionError;

/// Errors that can end a fetch run.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The run configuration cannot produce usable requests.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the rejected setting.
        reason: String,
    },

    /// Resolving the build failed.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// Checking, removing, or downloading the local artefact failed.
    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),

    /// The downloaded artefact does not hash to the published digest.
    #[error(
        "downloaded file {path} failed integrity check: expected sha256 {expected}, got {actual}; \
         the artefact itself is suspect and was left in place"
    )]
    IntegrityMismatch {
        /// The downloaded file.
        path: Utf8PathBuf,
        /// Digest published by the API.
        expected: String,
        /// Digest of the downloaded file.
        actual: String,
    },
}

/// Flat classification of every failure a run can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An empty or unusable argument or setting.
    InvalidArgument,
    /// Transport failure or error status on a remote call.
    Network,
    /// Malformed JSON response.
    Decode,
    /// No version survived the prefix filter.
    NoVersionsFound,
    /// A scanned version had no builds.
    NoBuildsForVersion,
    /// No stable build among the candidates.
    NoStableVersionFound,
    /// Local file read, write, or removal failure.
    Io,
    /// Post-download digest disagreement.
    IntegrityMismatch,
}

impl FetchError {
    /// Classify the error.
    ///
    /// # Examples
    ///
    /// ```
    /// use paper_fetch::error::{ErrorKind, FetchError};
    /// use paper_fetch::resolution::ResolutionError;
    ///
    /// let err = FetchError::from(ResolutionError::NoStableVersionFound {
    ///     prefix: String::new(),
    /// });
    /// assert_eq!(err.kind(), ErrorKind::NoStableVersionFound);
    /// ```
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidConfig { .. } => ErrorKind::InvalidArgument,
            Self::Resolution(err) => match err {
                ResolutionError::Api(api) => api_kind(api),
                ResolutionError::NoVersionsFound { .. } => ErrorKind::NoVersionsFound,
                ResolutionError::NoBuildsForVersion { .. } => ErrorKind::NoBuildsForVersion,
                ResolutionError::NoStableVersionFound { .. } => ErrorKind::NoStableVersionFound,
            },
            Self::Acquisition(err) => match err {
                AcquisitionError::Verify { .. } | AcquisitionError::Cleanup { .. } => ErrorKind::Io,
                AcquisitionError::Download(api) => api_kind(api),
            },
            Self::IntegrityMismatch { .. } => ErrorKind::IntegrityMismatch,
        }
    }
}

const fn api_kind(err: &ApiError) -> ErrorKind {
    match err {
        ApiError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
        ApiError::Http { .. } | ApiError::NotFound { .. } => ErrorKind::Network,
        ApiError::Decode { .. } => ErrorKind::Decode,
        ApiError::Io(_) => ErrorKind::Io,
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidArgument => "invalid argument",
            Self::Network => "network error",
            Self::Decode => "decode error",
            Self::NoVersionsFound => "no versions found",
            Self::NoBuildsForVersion => "no builds for version",
            Self::NoStableVersionFound => "no stable version found",
            Self::Io => "I/O error",
            Self::IntegrityMismatch => "integrity mismatch",
        };
        f.write_str(name)
    }
}

/// Result type alias using [`FetchError`].
pub type Result<T> = std::result::Result<T, FetchError>;
