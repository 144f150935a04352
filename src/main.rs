mod arn;
mod cli;
mod console;
mod error;
mod inventory;
mod launcher;
mod navigator;
mod output;
mod region_store;
mod summary;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use console::TerminalConsole;
use inventory::EcsInventory;
use launcher::AwsCliLauncher;
use navigator::{Navigator, SessionContext};
use output::print_error;
use region_store::RegionStore;
use summary::print_session_summary;

/// Overrides the `--verbose` level, e.g. `ECS_SESSION_LOG=aws_config=debug`.
const LOG_ENV: &str = "ECS_SESSION_LOG";

fn init_tracing(verbose: bool) -> Result<()> {
    let default_directive = if verbose { "ecs_session=debug,warn" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_directive))
        .context("failed to initialize tracing filter")?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .try_init();

    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.verbose)?;

    debug!("Profile: {}", cli.profile.as_deref().unwrap_or("default"));
    debug!(
        "Region: {}",
        cli.region.as_deref().unwrap_or("not set (will be resolved interactively)")
    );

    let store = RegionStore::new(
        cli.region_file
            .clone()
            .unwrap_or_else(RegionStore::default_location),
    );
    debug!("Default region file: {}", store.path().display());

    let inventory = EcsInventory::load(cli.profile.as_deref()).await;
    let launcher = AwsCliLauncher::new(cli.profile.clone());
    let mut navigator = Navigator::new(inventory, launcher, TerminalConsole, store);

    let report = navigator
        .run(SessionContext::new(cli.region.clone()))
        .await?;

    if !cli.no_summary {
        print_session_summary(&report, cli.profile.as_deref());
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        print_error(&format!("{:#}", err));
        std::process::exit(1);
    }
}
