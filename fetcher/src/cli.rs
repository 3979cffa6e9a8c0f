//! CLI argument definitions for paper-fetch.
//!
//! Connection settings fall back to `PAPER_FETCH_*` environment variables
//! and then to the public PaperMC API defaults.

use camino::Utf8PathBuf;
use clap::Parser;
use std::time::Duration;

use crate::config::{DEFAULT_API_ROOT, DEFAULT_PROJECT, FetchConfig};
use crate::fetch::FetchRequest;
use crate::resolution::ResolveOptions;

/// Default destination for the downloaded artefact.
pub const DEFAULT_FILE: &str = "paper.jar";

/// Download the latest PaperMC build and verify it.
#[derive(Parser, Debug, Clone)]
#[command(name = "paper-fetch")]
#[command(version, about)]
#[command(long_about = concat!(
    "Download the latest PaperMC build and verify it.\n\n",
    "By default the newest build on the stable channel is fetched. A build is ",
    "only downloaded when the destination file is missing or its SHA-256 ",
    "digest differs from the published one, so repeated runs are cheap.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Fetch the latest stable build to ./paper.jar:\n",
    "    $ paper-fetch\n\n",
    "  Stay on the 1.20 line:\n",
    "    $ paper-fetch -p 1.20\n\n",
    "  Accept experimental builds and write to server.jar:\n",
    "    $ paper-fetch --experimental -f server.jar\n\n",
    "  Report the latest build without downloading:\n",
    "    $ paper-fetch --skip-download\n\n",
    "  Fetch Velocity instead of Paper:\n",
    "    $ paper-fetch --project velocity",
))]
pub struct Cli {
    /// Accept the newest build even when it is not on the stable channel.
    #[arg(long)]
    pub experimental: bool,

    /// Destination file for the downloaded artefact.
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_FILE)]
    pub file: Utf8PathBuf,

    /// Resolve and check the destination, but never download.
    #[arg(long)]
    pub skip_download: bool,

    /// Only consider versions starting with this prefix (e.g. 1.20).
    #[arg(short, long, value_name = "PREFIX", default_value = "")]
    pub prefix: String,

    /// Project to fetch builds of.
    #[arg(long, value_name = "NAME", env = "PAPER_FETCH_PROJECT", default_value = DEFAULT_PROJECT)]
    pub project: String,

    /// Root URL of the build API.
    #[arg(long, value_name = "URL", env = "PAPER_FETCH_API_ROOT", default_value = DEFAULT_API_ROOT)]
    pub api_root: String,

    /// Network timeout in seconds, applied to every request.
    #[arg(long, value_name = "SECS", env = "PAPER_FETCH_TIMEOUT", default_value_t = 30)]
    pub timeout: u64,

    /// Increase log verbosity (repeatable: -v, -vv, -vvv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Suppress progress output (errors still shown).
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

impl Cli {
    /// Connection settings selected on the command line.
    ///
    /// # Examples
    ///
    /// ```
    /// use clap::Parser;
    /// use paper_fetch::cli::Cli;
    ///
    /// let cli = Cli::parse_from(["paper-fetch", "--project", "folia", "--timeout", "5"]);
    /// let config = cli.fetch_config();
    /// assert_eq!(config.project, "folia");
    /// assert_eq!(config.timeout.as_secs(), 5);
    /// ```
    #[must_use]
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            api_root: self.api_root.clone(),
            project: self.project.clone(),
            timeout: Duration::from_secs(self.timeout),
        }
    }

    /// The run request described by the flags.
    #[must_use]
    pub fn fetch_request(&self) -> FetchRequest<'_> {
        FetchRequest {
            project: &self.project,
            resolve: ResolveOptions {
                allow_non_stable: self.experimental,
                version_prefix: &self.prefix,
            },
            destination: &self.file,
            skip_download: self.skip_download,
            quiet: self.quiet,
        }
    }

    /// Log filter used when `RUST_LOG` is unset.
    #[must_use]
    pub const fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
