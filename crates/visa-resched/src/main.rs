use anyhow::Result;
use clap::Parser;
use tracing::info;

mod cli;
mod orchestrator;

use cli::Cli;
use orchestrator::Orchestrator;
use vrs_config::{Config, Credentials, validate_config};
use vrs_core::State;
use vrs_gateway::HttpPortal;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing (output to stderr, initialize only once)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init()
        .ok();

    let cli = Cli::parse();

    let config = Config::load(&cli.config)?;
    validate_config(&config)?;
    let credentials = Credentials::from_env()?;

    if cli.check_config {
        println!("Configuration OK: {} location(s), threshold {}",
            config.locations.len(),
            config.current_appointment_date
        );
        return Ok(());
    }

    info!(
        locations = config.locations.len(),
        threshold = %config.current_appointment_date,
        "Starting rescheduler"
    );

    let portal = HttpPortal::new(&config.base_url)?;
    let mut orchestrator = Orchestrator::new(portal, config, credentials);

    match orchestrator.run().await {
        State::Complete => Ok(()),
        _ => anyhow::bail!("rescheduling stopped in an error state"),
    }
}
