//! ghpeek - Look up GitHub users and their repositories from the terminal
//!
//! Fetched profiles and repository lists are cached in memory and on disk, so
//! repeated lookups never hit the network.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use ghpeek::app::App;
use ghpeek::cli::{Cli, StartupConfig};
use ghpeek::github::GitHubClient;
use ghpeek::logging;
use ghpeek::repository::CachingRepository;
use ghpeek::session::Session;
use ghpeek::ui;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Parses arguments, wires the components together and runs the menu
async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = StartupConfig::from_cli(&cli)?;
    logging::init(config.verbose);
    ui::style::init_from_env();

    let store = config.store()?;
    info!(cache_dir = %store.dir().display(), api_url = %config.api_url, "starting");

    let client = GitHubClient::with_config(config.api_url.as_str(), config.timeout)?;
    let repository = CachingRepository::new(client, store);
    let mut app = App::new(Session::new(repository), config.token.clone());

    let mut input = io::stdin().lock();
    let mut out = io::stdout();
    app.run(&mut input, &mut out).await?;

    Ok(())
}
