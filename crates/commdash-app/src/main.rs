//! commdash - headless commission dashboard runner.

use anyhow::Result;
use clap::Parser;
use tracing::info;

/// Commission dashboard runner
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via COMMDASH_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    commdash_telemetry::init_logging()?;

    info!("Starting commdash v{}", env!("CARGO_PKG_VERSION"));

    // CLI arg > COMMDASH_CONFIG > default
    let config_path = args
        .config
        .or_else(|| std::env::var("COMMDASH_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());

    info!(config_path = %config_path, "Loading configuration");
    let config = commdash_app::AppConfig::load(&config_path)?;

    let app = commdash_app::Application::new(config)?;
    app.run().await?;

    Ok(())
}
