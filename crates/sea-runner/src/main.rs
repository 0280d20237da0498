//! Playback driver for the sea simulator.

mod playback;
mod telemetry;

use anyhow::{Context, Result};
use sea_core::RunConfig;
use sea_world::Sea;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    telemetry::init_telemetry()?;

    let config = load_config()?;
    info!(
        width = config.sea.width,
        height = config.sea.height,
        predators = config.sea.predators,
        victims = config.sea.victims,
        obstacles = config.sea.obstacles,
        "Starting sea simulation"
    );

    let mut sea = Sea::new(config.sea.clone())?;
    let mut stdout = std::io::stdout();

    tokio::select! {
        summary = playback::play(&mut sea, &config, &mut stdout) => {
            let summary = summary?;
            info!(summary = %serde_json::to_string(&summary)?, "Simulation finished");
        }
        _ = shutdown_signal() => {
            let census = sea.census();
            warn!(
                day = sea.day(),
                predators = census.predators,
                victims = census.victims,
                "Simulation interrupted"
            );
        }
    }

    Ok(())
}

/// Config file from the first argument or `SEA_CONFIG`, defaults otherwise.
fn load_config() -> Result<RunConfig> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("SEA_CONFIG").ok());

    match path {
        Some(path) => {
            info!("Loading run config from {}", path);
            RunConfig::from_json_file(&path).with_context(|| format!("failed to load {}", path))
        }
        None => {
            info!("No run config given, using defaults");
            Ok(RunConfig::default())
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
