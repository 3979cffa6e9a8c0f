//! One complete fetch run: resolve, acquire, report.
//!
//! [`run_fetch`] is what the binary calls once its services are wired. It
//! prints progress to the supplied writer unless the request is quiet and
//! converts an invalid download into [`FetchError::IntegrityMismatch`].

use camino::Utf8Path;
use log::debug;
use std::cell::RefCell;
use std::io::Write;
use std::path::Path;

use crate::acquisition::{AcquisitionOutcome, AcquisitionRequest, ensure_artifact};
use crate::api::{
    ApiError, ArtifactDownloader, BuildInfo, BuildInfoService, BuildsListService,
    VersionsListService,
};
use crate::error::{FetchError, Result};
use crate::files::FileService;
use crate::output::{
    checking_message, downloading_message, latest_build_message, outcome_lines,
    write_stderr_line,
};
use crate::resolution::{ResolveOptions, Resolver};

/// What to fetch and where to put it.
#[derive(Debug, Clone, Copy)]
pub struct FetchRequest<'a> {
    /// Project name used in progress messages.
    pub project: &'a str,
    /// Resolution criteria.
    pub resolve: ResolveOptions<'a>,
    /// Destination file for the artefact.
    pub destination: &'a Utf8Path,
    /// Resolve and check the destination, but never download.
    pub skip_download: bool,
    /// Suppress progress output.
    pub quiet: bool,
}

/// The services a run depends on.
///
/// [`crate::api::HttpApi`] implements the four remote traits, so a
/// production run passes the same client for each.
#[derive(Clone, Copy)]
pub struct FetchServices<'a> {
    /// Version catalogue.
    pub versions: &'a dyn VersionsListService,
    /// Build list per version.
    pub builds: &'a dyn BuildsListService,
    /// Build metadata.
    pub build_info: &'a dyn BuildInfoService,
    /// Artefact transfer.
    pub downloader: &'a dyn ArtifactDownloader,
    /// Local file checks.
    pub files: &'a dyn FileService,
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchReport {
    /// The resolved build.
    pub build: BuildInfo,
    /// What happened to the destination.
    pub outcome: AcquisitionOutcome,
}

/// Resolve the requested build and ensure it is present at the destination.
///
/// # Errors
///
/// Propagates resolution and acquisition failures, and returns
/// [`FetchError::IntegrityMismatch`] when the downloaded file's digest
/// differs from the published one.
pub fn run_fetch(
    request: &FetchRequest<'_>,
    services: &FetchServices<'_>,
    stderr: &mut dyn Write,
) -> Result<FetchReport> {
    let mut progress = Progress {
        quiet: request.quiet,
        stderr,
    };

    progress.line(checking_message(request.project));
    let resolver = Resolver::new(services.versions, services.builds, services.build_info);
    let build = resolver.resolve_latest(&request.resolve)?;
    progress.line(latest_build_message(request.project, &build));

    let acquisition = AcquisitionRequest {
        build: &build,
        destination: request.destination,
        skip_download: request.skip_download,
    };
    let outcome = {
        let announcing = AnnouncingDownloader {
            inner: services.downloader,
            progress: RefCell::new(&mut progress),
        };
        ensure_artifact(&acquisition, &announcing, services.files)?
    };
    for line in outcome_lines(request.project, &outcome) {
        progress.line(line);
    }

    if let AcquisitionOutcome::Invalid { expected, actual } = &outcome {
        return Err(FetchError::IntegrityMismatch {
            path: request.destination.to_owned(),
            expected: expected.clone(),
            actual: actual.as_str().to_owned(),
        });
    }

    debug!("run finished: {outcome:?}");
    Ok(FetchReport { build, outcome })
}

struct Progress<'w> {
    quiet: bool,
    stderr: &'w mut dyn Write,
}

impl Progress<'_> {
    fn line(&mut self, message: impl std::fmt::Display) {
        if !self.quiet {
            write_stderr_line(self.stderr, message);
        }
    }
}

/// Prints the download announcement at the moment the transfer starts.
struct AnnouncingDownloader<'a, 'w> {
    inner: &'a dyn ArtifactDownloader,
    progress: RefCell<&'a mut Progress<'w>>,
}

impl ArtifactDownloader for AnnouncingDownloader<'_, '_> {
    fn download_artifact(
        &self,
        build: &BuildInfo,
        dest: &Path,
    ) -> std::result::Result<u64, ApiError> {
        self.progress.borrow_mut().line(downloading_message(build));
        self.inner.download_artifact(build, dest)
    }
}

#[cfg(test)]
#[path = "fetch_tests.rs"]
mod tests;
