mod cli;
mod config;
mod domain;
mod infra;
mod workflows;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Command};
use config::Config;
use domain::models::WatchEvent;
use infra::anilist::AniListClient;
use infra::transport::HttpTransport;
use workflows::{setup, sync};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "anilist_sync=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    dispatch(cli.command, &config)
}

fn dispatch(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Sync {
            title,
            season,
            episode,
        } => {
            let client = connect(config)?;
            let event = WatchEvent {
                title,
                season,
                episode,
            };
            // Not-found and failed updates are reported but are not process errors.
            sync::sync_event(&client, &event);
        }
        Command::Login => setup::login(config, &config::get_config_path())?,
        Command::Check => {
            let client = connect(config)?;
            setup::check(&client)?;
            println!("Your configuration is correct!");
        }
    }

    Ok(())
}

/// Fails on a missing or malformed token before anything touches the network.
fn connect(config: &Config) -> Result<AniListClient<HttpTransport>> {
    let token = config.require_token()?;
    config::check_token_shape(token)?;
    let transport = HttpTransport::new(
        config.endpoint().to_string(),
        token.to_string(),
        config.timeout(),
    )?;
    Ok(AniListClient::new(transport))
}
