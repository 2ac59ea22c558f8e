//! blogctl CLI - run and manage the blog backend
//!
//! - `serve`: run the HTTP server
//! - `migrate`: create the database tables
//! - `config`: inspect and bootstrap the configuration file

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "blogctl",
    author,
    version,
    about = "Personal blog backend: posts, contact form, and admin dashboard"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    /// Config file (default: ~/.blogctl/config.toml)
    #[arg(long, short = 'c', global = true, env = "BLOGCTL_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(commands::serve::ServeArgs),
    /// Create database tables if missing
    Migrate,
    /// Manage blogctl configuration (init, show, validate, path)
    Config(commands::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;

    let config_path = cli
        .config
        .unwrap_or_else(blogctl_server::BlogConfig::default_path);

    match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(&config_path, args).await?,
        Commands::Migrate => commands::serve::run_migrate(&config_path).await?,
        Commands::Config(args) => commands::config::run_config(&config_path, args)?,
    }

    Ok(())
}
