//! Project version catalogue lookup.

use log::trace;
use serde::Deserialize;

use super::client::HttpApi;
use super::error::ApiError;
use crate::version::{Version, sort_versions};

/// Lists every version published for the project.
#[cfg_attr(test, mockall::automock)]
pub trait VersionsListService {
    /// Return all published versions, sorted ascending.
    ///
    /// Implementations never filter; prefix filtering belongs to the
    /// resolver.
    ///
    /// # Errors
    ///
    /// Returns a network error when the request fails, or
    /// [`ApiError::Decode`] when the response is malformed.
    fn list_versions(&self) -> Result<Vec<Version>, ApiError>;
}

/// Body of `GET {base}`.
#[derive(Debug, Deserialize)]
struct VersionsDocument {
    versions: Vec<Version>,
}

impl VersionsListService for HttpApi {
    fn list_versions(&self) -> Result<Vec<Version>, ApiError> {
        let document: VersionsDocument = self.get_json(&self.versions_url())?;
        let mut versions = document.versions;
        sort_versions(&mut versions);
        trace!("catalogue lists {} versions", versions.len());
        Ok(versions)
    }
}
