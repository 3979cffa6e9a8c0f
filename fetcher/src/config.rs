//! Run configuration for talking to the build API.
//!
//! Every endpoint hangs off [`FetchConfig::base_url`]; the config is passed
//! explicitly to [`crate::api::HttpApi::new`].

use std::time::Duration;

use crate::error::{FetchError, Result};

/// Root of the public PaperMC v2 API.
pub const DEFAULT_API_ROOT: &str = "https://api.papermc.io/v2";

/// Project whose builds are fetched when none is specified.
pub const DEFAULT_PROJECT: &str = "paper";

/// Network timeout applied to every request, including artefact downloads.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the build API.
///
/// # Examples
///
/// ```
/// use paper_fetch::config::FetchConfig;
///
/// let config = FetchConfig::default();
/// assert_eq!(
///     config.base_url(),
///     "https://api.papermc.io/v2/projects/paper"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// API root, e.g. `https://api.papermc.io/v2`.
    pub api_root: String,
    /// Project name, e.g. `paper`, `velocity`, or `folia`.
    pub project: String,
    /// Global per-request timeout.
    pub timeout: Duration,
}

impl FetchConfig {
    /// Return the project base URL that all endpoints are relative to.
    ///
    /// Trailing slashes on the API root are ignored.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!(
            "{}/projects/{}",
            self.api_root.trim_end_matches('/'),
            self.project
        )
    }

    /// Check that the configuration can produce usable requests.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidConfig`] when the API root or project is
    /// empty, or the timeout is zero.
    pub fn validate(&self) -> Result<()> {
        if self.api_root.trim().is_empty() {
            return Err(FetchError::InvalidConfig {
                reason: "API root must not be empty".to_owned(),
            });
        }
        if self.project.trim().is_empty() {
            return Err(FetchError::InvalidConfig {
                reason: "project must not be empty".to_owned(),
            });
        }
        if self.timeout.is_zero() {
            return Err(FetchError::InvalidConfig {
                reason: "timeout must be greater than zero".to_owned(),
            });
        }
        Ok(())
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            api_root: DEFAULT_API_ROOT.to_owned(),
            project: DEFAULT_PROJECT.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
