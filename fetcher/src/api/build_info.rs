//! Metadata for a single build.

use serde::Deserialize;

use super::client::HttpApi;
use super::error::ApiError;
use crate::version::Version;

/// Channel name the API uses for stable builds.
pub const STABLE_CHANNEL: &str = "default";

/// Metadata describing one build of one version.
///
/// Produced by a single lookup and never mutated afterwards. The channel is
/// kept verbatim; deciding whether it is acceptable is the resolver's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    /// Version the build belongs to.
    pub version: Version,
    /// Build number within the version.
    pub build: u32,
    /// Release channel; [`STABLE_CHANNEL`] marks a stable build.
    pub channel: String,
    /// File name of the downloadable application artefact.
    pub artifact_name: String,
    /// Lowercase hex SHA-256 digest of the artefact.
    pub sha256: String,
}

impl BuildInfo {
    /// Return true when the build is on the stable channel.
    ///
    /// # Examples
    ///
    /// ```
    /// use paper_fetch::api::BuildInfo;
    ///
    /// let info = BuildInfo {
    ///     version: "1.20.2".into(),
    ///     build: 318,
    ///     channel: "experimental".to_owned(),
    ///     artifact_name: "paper-1.20.2-318.jar".to_owned(),
    ///     sha256: "ab12".to_owned(),
    /// };
    /// assert!(!info.is_stable());
    /// ```
    #[must_use]
    pub fn is_stable(&self) -> bool {
        self.channel == STABLE_CHANNEL
    }
}

/// Looks up the metadata of one build.
#[cfg_attr(test, mockall::automock)]
pub trait BuildInfoService {
    /// Return the metadata of `build` within `version`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`] for an empty version without
    /// contacting the API, a network error when the request fails, or
    /// [`ApiError::Decode`] when the response is malformed.
    fn build_info(&self, version: &Version, build: u32) -> Result<BuildInfo, ApiError>;
}

/// Body of `GET {base}/versions/{version}/builds/{build}`.
#[derive(Debug, Deserialize)]
struct BuildDocument {
    version: Version,
    build: u32,
    channel: String,
    downloads: Downloads,
}

#[derive(Debug, Deserialize)]
struct Downloads {
    application: Application,
}

#[derive(Debug, Deserialize)]
struct Application {
    name: String,
    sha256: String,
}

impl From<BuildDocument> for BuildInfo {
    fn from(document: BuildDocument) -> Self {
        Self {
            version: document.version,
            build: document.build,
            channel: document.channel,
            artifact_name: document.downloads.application.name,
            sha256: document.downloads.application.sha256,
        }
    }
}

impl BuildInfoService for HttpApi {
    fn build_info(&self, version: &Version, build: u32) -> Result<BuildInfo, ApiError> {
        if version.is_empty() {
            return Err(ApiError::InvalidArgument {
                argument: "version",
            });
        }
        let document: BuildDocument = self.get_json(&self.build_info_url(version, build))?;
        Ok(document.into())
    }
}
