//! Remote build API: one trait per lookup plus the HTTP implementation.
//!
//! Each lookup in the resolution chain is behind its own trait so the
//! resolver and the acquisition step can be exercised with substitutes:
//!
//! - [`versions`]: [`VersionsListService`], the project version catalogue.
//! - [`builds`]: [`BuildsListService`], the build numbers of one version.
//! - [`build_info`]: [`BuildInfoService`], metadata for one build.
//! - [`download`]: [`ArtifactDownloader`], the artefact bytes.
//! - [`client`]: [`HttpApi`], the `ureq` implementation of all four.
//! - [`error`]: [`ApiError`], shared by every remote call.

pub mod build_info;
pub mod builds;
pub mod client;
pub mod download;
pub mod error;
pub mod versions;

pub use build_info::{BuildInfo, BuildInfoService, STABLE_CHANNEL};
pub use builds::BuildsListService;
pub use client::HttpApi;
pub use download::ArtifactDownloader;
pub use error::ApiError;
pub use versions::VersionsListService;
