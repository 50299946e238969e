//! Polyglot demo server - Main Entry Point

mod routes;

use clap::Parser;
use polyglot_axum::{Config, I18nLayer};
use polyglot_common::{init_logging, PolyglotError, Result};
use polyglot_config::ConfigLoader;
use tokio::net::TcpListener;
use tracing::info;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Settings file path
    #[arg(short, long)]
    config: Option<String>,

    /// Log level, overriding the settings file
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => ConfigLoader::load_config(path)?,
        None => ConfigLoader::load()?,
    };

    let mut logging = settings.logging.to_logging_config();
    if let Some(level) = args.log_level {
        logging.level = level;
    }
    init_logging(logging)?;

    info!("Starting Polyglot demo server");

    let i18n = I18nLayer::try_new(Config::from_settings(&settings.i18n)?)?;
    info!(
        "Loaded languages {:?} from {}",
        i18n.state().languages(),
        settings.i18n.root_path
    );

    let listener = TcpListener::bind(&settings.server.bind)
        .await
        .map_err(|e| {
            PolyglotError::server_with_source(format!("Failed to bind {}", settings.server.bind), e)
        })?;
    info!("Listening on {}", settings.server.bind);

    axum::serve(listener, routes::router(i18n))
        .await
        .map_err(|e| PolyglotError::server_with_source("Server stopped unexpectedly", e))?;

    Ok(())
}
