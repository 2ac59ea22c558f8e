//! Server and migration commands

use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use blogctl_server::db::{create_pool, run_migrations};
use blogctl_server::{run_server, BlogConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (overrides server.bind from the config)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Database URL (overrides config/environment)
    #[arg(long)]
    pub database_url: Option<String>,
}

/// Run the HTTP server until Ctrl+C/SIGTERM
pub async fn run_serve(config_path: &Path, args: ServeArgs) -> Result<()> {
    let mut config = BlogConfig::load(config_path)?;
    if let Some(url) = args.database_url {
        config.database.url = url;
    }
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }

    tracing::info!("Starting blogctl server on {}", config.server.bind);

    let pool = create_pool(&config.database.url)
        .await
        .context("Failed to create database pool")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    run_server(pool, config)
        .await
        .context("Server error")?;

    Ok(())
}

/// Create tables without starting the server
pub async fn run_migrate(config_path: &Path) -> Result<()> {
    let config = BlogConfig::load(config_path)?;

    let pool = create_pool(&config.database.url)
        .await
        .context("Failed to create database pool")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    println!("✅ Database ready at {}", config.database.url);
    Ok(())
}
