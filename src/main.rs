use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use reqwest::Client;

use crate::config::build_info::BUILD_INFO;
use crate::config::{load_config, AppConfig};
use crate::error::UpdateError;
use crate::scraping::extract_version::{OVERVIEW_SELECTOR, RELEASE_SELECTOR};
use crate::utilities::fetch_versions::{fetch_versions, FetchedVersions};
use crate::utilities::update_version::{maybe_update, SkipReason, UpdateOutcome};

// Import modules
mod config;
mod error;
mod scraping;
mod utilities;

/// Keeps the version shown on the overview page in line with the published release.
#[derive(Parser, Debug)]
#[command(name = "overview_version_sync")]
struct Cli {
    /// Print version, git commit and build date, then exit
    #[arg(short = 'v', long = "version-info")]
    version_info: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.version_info {
        for line in BUILD_INFO.lines() {
            println!("{}", line);
        }
        return ExitCode::SUCCESS;
    }

    exit_code(run().await)
}

/// Prints a fatal error to stderr and picks the process status.
fn exit_code(result: anyhow::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", format!("Error: {:#}", e).red());
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let config = load_config()?;
    let client = Client::new();

    let (versions, outcome) = sync_version(&client, &config)
        .await
        .with_context(|| format!("Failed to synchronize {}", config.index_html_file.display()))?;

    if config.verbose {
        report(&config, &versions, outcome);
    }

    Ok(())
}

/// Fetches both versions and patches the index file when the release moved on.
async fn sync_version(
    client: &Client,
    config: &AppConfig,
) -> Result<(FetchedVersions, UpdateOutcome), UpdateError> {
    let versions = fetch_versions(
        client,
        config.current_source(),
        OVERVIEW_SELECTOR,
        config.remote_source(),
        RELEASE_SELECTOR,
    )
    .await?;

    let outcome = maybe_update(
        &config.index_html_file,
        &versions.current,
        &versions.remote,
        &config.search_string,
    )
    .await?;

    Ok((versions, outcome))
}

fn report(config: &AppConfig, versions: &FetchedVersions, outcome: UpdateOutcome) {
    let file = config.index_html_file.display();
    let line = match outcome {
        UpdateOutcome::Patched => {
            format!("Updated {}: '{}' -> '{}'", file, versions.current, versions.remote).green()
        }
        UpdateOutcome::VersionNotInFile => {
            format!("'{}' not found in {}, nothing replaced", versions.current, file).yellow()
        }
        UpdateOutcome::Skipped(SkipReason::EmptyRemote) => {
            format!("No release version found at {}", config.remote_source()).yellow()
        }
        UpdateOutcome::Skipped(SkipReason::Untrusted) => format!(
            "Release version '{}' does not contain '{}', ignoring it",
            versions.remote, config.search_string
        )
        .yellow(),
        UpdateOutcome::Skipped(SkipReason::EmptyCurrent) => {
            format!("No current version found at {}", config.current_source()).yellow()
        }
        UpdateOutcome::Skipped(SkipReason::UpToDate) => {
            format!("Version '{}' is up to date", versions.current).yellow()
        }
    };
    eprintln!("{}", line);
}
