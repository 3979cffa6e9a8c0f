//! paper-fetch CLI entrypoint.
//!
//! Resolves the latest build of a PaperMC project, downloads it when the
//! local copy is missing or stale, and verifies the SHA-256 digest.

use clap::Parser;
use std::io::Write;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use paper_fetch::api::HttpApi;
use paper_fetch::cli::Cli;
use paper_fetch::error::{ErrorKind, FetchError, Result};
use paper_fetch::fetch::{FetchServices, run_fetch};
use paper_fetch::files::LocalFileService;
use paper_fetch::output::write_stderr_line;

/// Exit status for a download whose digest does not match.
const EXIT_INTEGRITY_MISMATCH: i32 = 2;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn init_logging(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run(cli: &Cli, stderr: &mut dyn Write) -> Result<()> {
    let config = cli.fetch_config();
    config.validate()?;

    let api = HttpApi::new(&config);
    let services = FetchServices {
        versions: &api,
        builds: &api,
        build_info: &api,
        downloader: &api,
        files: &LocalFileService,
    };
    run_fetch(&cli.fetch_request(), &services, stderr)?;
    Ok(())
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, format!("Error: {err}"));
            exit_code_for_error(&err)
        }
    }
}

fn exit_code_for_error(err: &FetchError) -> i32 {
    match err.kind() {
        ErrorKind::IntegrityMismatch => EXIT_INTEGRITY_MISMATCH,
        _ => 1,
    }
}
