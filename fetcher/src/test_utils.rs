//! In-memory fakes of the remote services for tests.
//!
//! [`FakeCatalog`] answers the three lookup traits from a fixed table of
//! releases; [`StubDownloader`] writes fixed bytes to the destination and
//! counts how often it was asked to.

use sha2::{Digest, Sha256};
use std::cell::Cell;
use std::path::Path;

use crate::api::{
    ApiError, ArtifactDownloader, BuildInfo, BuildInfoService, BuildsListService,
    STABLE_CHANNEL, VersionsListService,
};
use crate::version::{Version, sort_versions};

/// Lowercase hex SHA-256 digest of `bytes`.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Body the API returns for the version catalogue.
#[must_use]
pub fn versions_json(project: &str, versions: &[&str]) -> String {
    serde_json::json!({
        "project_id": project,
        "project_name": project,
        "version_groups": [],
        "versions": versions,
    })
    .to_string()
}

/// Body the API returns for the build list of one version.
#[must_use]
pub fn builds_json(project: &str, version: &str, builds: &[u32]) -> String {
    serde_json::json!({
        "project_id": project,
        "project_name": project,
        "version": version,
        "builds": builds,
    })
    .to_string()
}

/// Body the API returns for the metadata of one build.
#[must_use]
pub fn build_info_json(info: &BuildInfo) -> String {
    serde_json::json!({
        "project_id": "paper",
        "project_name": "Paper",
        "version": info.version.as_str(),
        "build": info.build,
        "time": "2023-11-20T16:16:10.593Z",
        "channel": info.channel,
        "promoted": false,
        "changes": [],
        "downloads": {
            "application": {
                "name": info.artifact_name,
                "sha256": info.sha256,
            },
        },
    })
    .to_string()
}

/// One version in a [`FakeCatalog`].
#[derive(Debug, Clone)]
struct FakeRelease {
    version: Version,
    builds: Vec<u32>,
    channel: String,
    sha256: String,
}

/// Fixed catalogue implementing the three lookup traits.
///
/// Every build of a release shares the release's channel and digest.
/// Lookups for unknown versions fail with [`ApiError::NotFound`].
#[derive(Debug, Default)]
pub struct FakeCatalog {
    releases: Vec<FakeRelease>,
    build_lookups: Cell<usize>,
}

impl FakeCatalog {
    /// Create an empty catalogue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stable release whose artefact hashes to `sha256`.
    #[must_use]
    pub fn with_stable(self, version: &str, builds: &[u32], sha256: &str) -> Self {
        self.with_release(version, builds, STABLE_CHANNEL, sha256)
    }

    /// Add a release on `channel`.
    #[must_use]
    pub fn with_release(
        mut self,
        version: &str,
        builds: &[u32],
        channel: &str,
        sha256: &str,
    ) -> Self {
        self.releases.push(FakeRelease {
            version: Version::from(version),
            builds: builds.to_vec(),
            channel: channel.to_owned(),
            sha256: sha256.to_owned(),
        });
        self
    }

    /// Number of build-list lookups answered so far.
    #[must_use]
    pub fn build_lookups(&self) -> usize {
        self.build_lookups.get()
    }

    fn release(&self, version: &Version) -> Result<&FakeRelease, ApiError> {
        if version.is_empty() {
            return Err(ApiError::InvalidArgument { argument: "version" });
        }
        self.releases
            .iter()
            .find(|release| &release.version == version)
            .ok_or_else(|| ApiError::NotFound {
                url: format!("fake://versions/{version}"),
            })
    }
}

impl VersionsListService for FakeCatalog {
    fn list_versions(&self) -> Result<Vec<Version>, ApiError> {
        let mut versions: Vec<Version> = self
            .releases
            .iter()
            .map(|release| release.version.clone())
            .collect();
        sort_versions(&mut versions);
        Ok(versions)
    }
}

impl BuildsListService for FakeCatalog {
    fn list_builds(&self, version: &Version) -> Result<Vec<u32>, ApiError> {
        self.build_lookups.set(self.build_lookups.get() + 1);
        let mut builds = self.release(version)?.builds.clone();
        builds.sort_unstable();
        Ok(builds)
    }
}

impl BuildInfoService for FakeCatalog {
    fn build_info(&self, version: &Version, build: u32) -> Result<BuildInfo, ApiError> {
        let release = self.release(version)?;
        if !release.builds.contains(&build) {
            return Err(ApiError::NotFound {
                url: format!("fake://versions/{version}/builds/{build}"),
            });
        }
        Ok(BuildInfo {
            version: release.version.clone(),
            build,
            channel: release.channel.clone(),
            artifact_name: format!("paper-{version}-{build}.jar"),
            sha256: release.sha256.clone(),
        })
    }
}

/// Downloader that writes fixed content and counts calls.
#[derive(Debug)]
pub struct StubDownloader {
    content: Vec<u8>,
    calls: Cell<usize>,
}

impl StubDownloader {
    /// Create a downloader that writes `content` on every call.
    #[must_use]
    pub fn new(content: &[u8]) -> Self {
        Self {
            content: content.to_vec(),
            calls: Cell::new(0),
        }
    }

    /// Number of downloads performed so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl ArtifactDownloader for StubDownloader {
    fn download_artifact(&self, _build: &BuildInfo, dest: &Path) -> Result<u64, ApiError> {
        self.calls.set(self.calls.get() + 1);
        std::fs::write(dest, &self.content)?;
        Ok(self.content.len() as u64)
    }
}
