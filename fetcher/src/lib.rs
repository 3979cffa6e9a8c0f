//! paper-fetch library.
//!
//! Resolves filter criteria (stable or not, optional version prefix) into a
//! single build of a PaperMC project, downloads its artefact when the local
//! copy is missing or stale, and verifies it against the published SHA-256
//! digest. The `paper-fetch` binary is a thin wrapper over [`fetch::run_fetch`].
//!
//! # Modules
//!
//! - [`acquisition`] - Download decision, transfer, and post-download check
//! - [`api`] - Remote build API traits and their HTTP implementation
//! - [`cli`] - Command-line argument definitions
//! - [`config`] - API root, project, and timeout settings
//! - [`error`] - Run-level error type and failure taxonomy
//! - [`fetch`] - One complete resolve-and-acquire run
//! - [`files`] - Local file existence and removal
//! - [`integrity`] - Streaming SHA-256 digests
//! - [`output`] - Progress messages
//! - [`resolution`] - Stable and non-stable build selection
//! - [`version`] - Version strings, ordering, and prefix filtering

pub mod acquisition;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod files;
pub mod integrity;
pub mod output;
pub mod resolution;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
pub mod version;
