//! Build numbers published for one version.

use log::trace;
use serde::Deserialize;

use super::client::HttpApi;
use super::error::ApiError;
use crate::version::Version;

/// Lists the builds published for a version.
#[cfg_attr(test, mockall::automock)]
pub trait BuildsListService {
    /// Return the build numbers of `version`, sorted ascending.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`] for an empty version without
    /// contacting the API, a network error when the request fails, or
    /// [`ApiError::Decode`] when the response is malformed.
    fn list_builds(&self, version: &Version) -> Result<Vec<u32>, ApiError>;
}

/// Body of `GET {base}/versions/{version}`.
#[derive(Debug, Deserialize)]
struct BuildsDocument {
    builds: Vec<u32>,
}

impl BuildsListService for HttpApi {
    fn list_builds(&self, version: &Version) -> Result<Vec<u32>, ApiError> {
        if version.is_empty() {
            return Err(ApiError::InvalidArgument {
                argument: "version",
            });
        }
        let document: BuildsDocument = self.get_json(&self.builds_url(version))?;
        let mut builds = document.builds;
        // Source order is not guaranteed.
        builds.sort_unstable();
        trace!("version {version} has {} builds", builds.len());
        Ok(builds)
    }
}
