//! `ureq`-backed implementation of the build API traits.
//!
//! [`HttpApi`] owns one agent configured from [`FetchConfig`]; every lookup
//! and the artefact download go through it, so the timeout applies to the
//! whole run. The trait implementations live next to their traits.

use log::debug;
use serde::de::DeserializeOwned;
use std::io::{Read, Write};
use std::path::Path;

use super::error::ApiError;
use crate::config::FetchConfig;
use crate::version::Version;

/// HTTP client for a single project of the build API.
///
/// # Examples
///
/// ```
/// use paper_fetch::api::HttpApi;
/// use paper_fetch::config::FetchConfig;
///
/// let api = HttpApi::new(&FetchConfig::default());
/// assert!(api.base_url().ends_with("/projects/paper"));
/// ```
#[derive(Clone)]
pub struct HttpApi {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpApi {
    /// Build a client for the project described by `config`.
    #[must_use]
    pub fn new(config: &FetchConfig) -> Self {
        let agent_config = ureq::Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .build();
        Self {
            base_url: config.base_url(),
            agent: ureq::Agent::new_with_config(agent_config),
        }
    }

    /// The project base URL all endpoints are relative to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn versions_url(&self) -> String {
        self.base_url.clone()
    }

    pub(crate) fn builds_url(&self, version: &Version) -> String {
        format!("{}/versions/{version}", self.base_url)
    }

    pub(crate) fn build_info_url(&self, version: &Version, build: u32) -> String {
        format!("{}/versions/{version}/builds/{build}", self.base_url)
    }

    pub(crate) fn artifact_url(&self, version: &Version, build: u32, name: &str) -> String {
        format!(
            "{}/versions/{version}/builds/{build}/downloads/{name}",
            self.base_url
        )
    }

    /// Fetch `url` and decode the body as JSON.
    pub(crate) fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        debug!("GET {url}");
        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| map_ureq_error(url, &e))?;
        let body = response
            .into_body()
            .read_to_string()
            .map_err(|e| ApiError::Http {
                url: url.to_owned(),
                reason: e.to_string(),
            })?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode {
            url: url.to_owned(),
            reason: e.to_string(),
        })
    }

    /// Fetch `url` and stream the body into a newly created file at `dest`.
    ///
    /// Failures reading the body are transport errors ([`ApiError::Http`]);
    /// only creating, writing, or syncing the file yields [`ApiError::Io`].
    pub(crate) fn download_to_file(&self, url: &str, dest: &Path) -> Result<u64, ApiError> {
        debug!("GET {url} -> {}", dest.display());
        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| map_ureq_error(url, &e))?;
        let mut body = response.into_body().into_reader();
        let mut file = std::fs::File::create(dest)?;
        let mut buffer = [0u8; 8192];
        let mut written = 0u64;
        loop {
            let bytes_read = body.read(&mut buffer).map_err(|e| ApiError::Http {
                url: url.to_owned(),
                reason: e.to_string(),
            })?;
            if bytes_read == 0 {
                break;
            }
            file.write_all(buffer.get(..bytes_read).unwrap_or_default())?;
            written += bytes_read as u64;
        }
        file.sync_all()?;
        Ok(written)
    }
}

/// Map a ureq error to an [`ApiError`].
fn map_ureq_error(url: &str, err: &ureq::Error) -> ApiError {
    match err {
        ureq::Error::StatusCode(404) => ApiError::NotFound {
            url: url.to_owned(),
        },
        other => ApiError::Http {
            url: url.to_owned(),
            reason: other.to_string(),
        },
    }
}
