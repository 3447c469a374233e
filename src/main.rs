use anyhow::{bail, Context};
use betbrain::adapters::start_api_server;
use betbrain::api::AppState;
use betbrain::cli::{self, Cli, Commands};
use betbrain::config::AppConfig;
use clap::Parser;
use tracing::{info, warn};

mod main_runtime;

use main_runtime::{init_logging, init_logging_simple};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_from(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config))?;

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("config error: {}", error);
        }
        bail!("invalid configuration ({} problems)", errors.len());
    }

    match cli.command {
        Commands::Serve { port, host } => {
            let _log_guard = init_logging(&config.logging);
            run_server(config, host, port).await?;
        }
        Commands::Predict {
            home_xg,
            away_xg,
            home_odds,
            draw_odds,
            away_odds,
            json,
        } => {
            init_logging_simple();
            let odds = match (home_odds, draw_odds, away_odds) {
                (Some(h), Some(d), Some(a)) => Some((h, d, a)),
                _ => None,
            };
            let prediction = cli::predict(config.model, home_xg, away_xg, odds)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&prediction)?);
            } else {
                cli::print_prediction(&prediction);
            }
        }
    }

    Ok(())
}

async fn run_server(config: AppConfig, host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        cache_ttl_secs = config.cache.ttl_secs,
        "Starting BetBrain"
    );
    if config.football_data.api_token.is_empty() {
        warn!("FOOTBALL_DATA_TOKEN not set, fixture endpoints will fail");
    }
    if config.odds.api_key.is_empty() {
        warn!("THE_ODDS_API_KEY not set, listings will carry estimated odds");
    }
    if !config.assistant.is_configured() {
        warn!("CHAT_API_KEY not set, chat replies use the fallback template");
    }

    let state = AppState::from_config(&config).context("failed to build application state")?;
    start_api_server(state, &host, port).await?;
    Ok(())
}
