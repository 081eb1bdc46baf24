// Vetsoft - Web Server

use anyhow::{Context, Result};
use clap::Parser;
use rusqlite::Connection;
use std::path::PathBuf;
use tracing::info;

use vetsoft::api::{router, AppState};
use vetsoft::config::{Config, Overrides, DEFAULT_CONFIG_PATH};
use vetsoft::logging::init_logging;
use vetsoft::setup_database;

#[derive(Parser, Debug)]
#[command(name = "vetsoft-server", version, about = "Veterinary clinic records API")]
struct ServerArgs {
    /// Path to config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// SQLite database path (overrides config file)
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Port to listen on (overrides config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level (overrides config file)
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = ServerArgs::parse();

    let config = Config::load(&args.config)?.apply(Overrides {
        database: args.database,
        port: args.port,
        log_level: args.log_level,
    });
    init_logging(&config.logging);

    let db_path = &config.database.path;
    let conn = Connection::open(db_path)
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;
    setup_database(&conn).context("Failed to set up database schema")?;
    info!(path = %db_path.display(), "database opened");

    let app = router(AppState::new(conn));

    let addr = config.listen_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!(%addr, "server listening");

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
