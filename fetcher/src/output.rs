//! Progress messages printed during a fetch run.
//!
//! Messages go to stderr so stdout stays free for scripting; the builders
//! here return plain strings so the wording can be tested without a
//! terminal.

use std::io::Write;

use crate::acquisition::AcquisitionOutcome;
use crate::api::BuildInfo;

/// Announce the start of resolution.
#[must_use]
pub fn checking_message(project: &str) -> String {
    format!("Checking for latest version of {project}...")
}

/// Describe the resolved build, flagging non-stable channels.
///
/// # Example
///
/// ```
/// use paper_fetch::api::BuildInfo;
/// use paper_fetch::output::latest_build_message;
///
/// let build = BuildInfo {
///     version: "1.20.2".into(),
///     build: 318,
///     channel: "default".to_owned(),
///     artifact_name: "paper-1.20.2-318.jar".to_owned(),
///     sha256: "0".repeat(64),
/// };
/// assert_eq!(
///     latest_build_message("paper", &build),
///     "Latest paper version is 1.20.2 - build #318"
/// );
/// ```
#[must_use]
pub fn latest_build_message(project: &str, build: &BuildInfo) -> String {
    let marker = if build.is_stable() { "" } else { " EXPERIMENTAL" };
    format!(
        "Latest {project} version is {} - build #{}{marker}",
        build.version, build.build
    )
}

/// Announce a download about to start.
#[must_use]
pub fn downloading_message(build: &BuildInfo) -> String {
    format!("Downloading {}...", build.artifact_name)
}

/// Lines describing how acquisition ended.
#[must_use]
pub fn outcome_lines(project: &str, outcome: &AcquisitionOutcome) -> Vec<String> {
    match outcome {
        AcquisitionOutcome::AlreadyPresent => {
            vec![format!("You already have this version of {project}.")]
        }
        AcquisitionOutcome::Skipped => vec!["Skipping download.".to_owned()],
        AcquisitionOutcome::Downloaded { .. } => vec![
            "Finished downloading.".to_owned(),
            "Verifying file integrity...".to_owned(),
            "Download verified.".to_owned(),
        ],
        AcquisitionOutcome::Invalid { .. } => vec![
            "Finished downloading.".to_owned(),
            "Verifying file integrity...".to_owned(),
            "Download is invalid!!".to_owned(),
        ],
    }
}

/// Write a line to stderr, ignoring failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Progress output is best-effort.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrity::Sha256Digest;
    use rstest::{fixture, rstest};

    #[fixture]
    fn build() -> BuildInfo {
        BuildInfo {
            version: "1.20.2".into(),
            build: 318,
            channel: "default".to_owned(),
            artifact_name: "paper-1.20.2-318.jar".to_owned(),
            sha256: "0".repeat(64),
        }
    }

    #[test]
    fn checking_message_names_project() {
        assert_eq!(
            checking_message("velocity"),
            "Checking for latest version of velocity..."
        );
    }

    #[rstest]
    fn stable_build_has_no_marker(build: BuildInfo) {
        assert!(!latest_build_message("paper", &build).contains("EXPERIMENTAL"));
    }

    #[rstest]
    #[case::experimental("experimental")]
    #[case::beta("beta")]
    fn non_stable_build_is_flagged(mut build: BuildInfo, #[case] channel: &str) {
        build.channel = channel.to_owned();
        assert_eq!(
            latest_build_message("paper", &build),
            "Latest paper version is 1.20.2 - build #318 EXPERIMENTAL"
        );
    }

    #[rstest]
    fn downloading_message_names_artefact(build: BuildInfo) {
        assert_eq!(downloading_message(&build), "Downloading paper-1.20.2-318.jar...");
    }

    #[rstest]
    #[case::present(AcquisitionOutcome::AlreadyPresent, "You already have this version of paper.")]
    #[case::skipped(AcquisitionOutcome::Skipped, "Skipping download.")]
    #[case::downloaded(AcquisitionOutcome::Downloaded { bytes: 42 }, "Download verified.")]
    #[case::invalid(
        AcquisitionOutcome::Invalid {
            expected: "0".repeat(64),
            actual: Sha256Digest::of_bytes(b"tampered"),
        },
        "Download is invalid!!"
    )]
    fn outcome_lines_end_with_verdict(#[case] outcome: AcquisitionOutcome, #[case] last: &str) {
        let lines = outcome_lines("paper", &outcome);
        assert_eq!(lines.last().map(String::as_str), Some(last));
    }

    #[test]
    fn write_stderr_line_appends_newline() {
        let mut buffer = Vec::new();
        write_stderr_line(&mut buffer, "Skipping download.");
        assert_eq!(buffer, b"Skipping download.\n");
    }
}
