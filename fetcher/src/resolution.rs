//! Resolution of filter criteria into a single build.
//!
//! The resolver chains the three lookups (versions, builds, build info).
//! Stable resolution walks the filtered catalogue from the newest version
//! backwards and stops at the first build on the stable channel, so a
//! pre-release that happens to be newest is skipped. Non-stable resolution
//! takes the newest version's latest build unconditionally.
//!
//! The walk is sequential and stops at the first error: a version whose
//! build list is empty fails the run with
//! [`ResolutionError::NoBuildsForVersion`] instead of moving on to an older
//! candidate.

use log::{debug, info};
use thiserror::Error;

use crate::api::{ApiError, BuildInfo, BuildInfoService, BuildsListService, VersionsListService};
use crate::version::{Version, filter_by_prefix};

/// Criteria for a resolution run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveOptions<'a> {
    /// Accept the newest build regardless of its channel.
    pub allow_non_stable: bool,
    /// Only consider versions starting with this prefix at a segment
    /// boundary; empty means no filtering.
    pub version_prefix: &'a str,
}

/// Errors arising from resolution.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// A remote lookup failed; the scan stops here.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// No published version survives the prefix filter.
    #[error("no versions found{}", describe_prefix(.prefix))]
    NoVersionsFound {
        /// The prefix that was applied.
        prefix: String,
    },

    /// A scanned version has no builds.
    #[error("no builds exist for version {version}")]
    NoBuildsForVersion {
        /// The version whose build list was empty.
        version: Version,
    },

    /// Every candidate's latest build is on a non-stable channel.
    #[error("no stable versions found{}", describe_prefix(.prefix))]
    NoStableVersionFound {
        /// The prefix that was applied.
        prefix: String,
    },
}

fn describe_prefix(prefix: &str) -> String {
    if prefix.is_empty() {
        String::new()
    } else {
        format!(" matching prefix \"{prefix}\"")
    }
}

/// Orchestrates the three lookups into one resolved build.
///
/// Each dependency is injected separately so tests can substitute any of
/// them.
pub struct Resolver<'a> {
    versions: &'a dyn VersionsListService,
    builds: &'a dyn BuildsListService,
    build_info: &'a dyn BuildInfoService,
}

impl<'a> Resolver<'a> {
    /// Create a resolver over the given services.
    #[must_use]
    pub fn new(
        versions: &'a dyn VersionsListService,
        builds: &'a dyn BuildsListService,
        build_info: &'a dyn BuildInfoService,
    ) -> Self {
        Self {
            versions,
            builds,
            build_info,
        }
    }

    /// Resolve the build selected by `options`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::NoVersionsFound`] when the filtered
    /// catalogue is empty, [`ResolutionError::NoStableVersionFound`] when
    /// stable resolution finds no stable build, and otherwise propagates the
    /// first lookup or empty-build-list failure encountered.
    pub fn resolve_latest(&self, options: &ResolveOptions<'_>) -> Result<BuildInfo, ResolutionError> {
        let candidates = self.filtered_versions(options.version_prefix)?;
        if options.allow_non_stable {
            return self.resolve_newest(&candidates, options.version_prefix);
        }
        self.resolve_stable(&candidates, options.version_prefix)
    }

    /// Fetch the build info of the highest build number of `version`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::NoBuildsForVersion`] when the version has
    /// no builds, or the failing lookup's error.
    pub fn latest_build_info(&self, version: &Version) -> Result<BuildInfo, ResolutionError> {
        let builds = self.builds.list_builds(version)?;
        let Some(&latest) = builds.last() else {
            return Err(ResolutionError::NoBuildsForVersion {
                version: version.clone(),
            });
        };
        debug!("latest build of {version} is #{latest}");
        Ok(self.build_info.build_info(version, latest)?)
    }

    fn filtered_versions(&self, prefix: &str) -> Result<Vec<Version>, ResolutionError> {
        let all = self.versions.list_versions()?;
        let filtered = filter_by_prefix(&all, prefix);
        debug!(
            "{} of {} versions match prefix {prefix:?}",
            filtered.len(),
            all.len()
        );
        if filtered.is_empty() {
            return Err(ResolutionError::NoVersionsFound {
                prefix: prefix.to_owned(),
            });
        }
        Ok(filtered)
    }

    fn resolve_newest(
        &self,
        candidates: &[Version],
        prefix: &str,
    ) -> Result<BuildInfo, ResolutionError> {
        let newest = candidates
            .last()
            .ok_or_else(|| ResolutionError::NoVersionsFound {
                prefix: prefix.to_owned(),
            })?;
        self.latest_build_info(newest)
    }

    fn resolve_stable(
        &self,
        candidates: &[Version],
        prefix: &str,
    ) -> Result<BuildInfo, ResolutionError> {
        for version in candidates.iter().rev() {
            let info = self.latest_build_info(version)?;
            if info.is_stable() {
                return Ok(info);
            }
            info!(
                "skipping {version} build #{}: channel is {:?}",
                info.build, info.channel
            );
        }
        Err(ResolutionError::NoStableVersionFound {
            prefix: prefix.to_owned(),
        })
    }
}

#[cfg(test)]
#[path = "resolution_tests.rs"]
mod tests;
