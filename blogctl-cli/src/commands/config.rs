use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use blogctl_server::BlogConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a starter config file
    Init(InitArgs),
    /// Print the effective config (password hidden)
    Show,
    /// Load and validate the config
    Validate,
    /// Show config file path
    Path,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

const TEMPLATE: &str = r#"[server]
bind = "127.0.0.1:5000"

[database]
url = "sqlite://blog.db"

[admin]
username = "admin"
password = "change-me"

[uploads]
dir = "static/uploads"

[site]
posts_per_page = 3
blog_name = "My Blog"
"#;

pub fn run_config(config_path: &Path, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Init(args) => run_init(config_path, args),
        ConfigCommands::Show => run_show(config_path),
        ConfigCommands::Validate => run_validate(config_path),
        ConfigCommands::Path => {
            println!("{}", config_path.display());
            Ok(())
        }
    }
}

fn run_init(config_path: &Path, args: InitArgs) -> Result<()> {
    if config_path.exists() && !args.force {
        anyhow::bail!(
            "Config already exists at {:?}\n\nUse --force to overwrite",
            config_path
        );
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    std::fs::write(config_path, TEMPLATE)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("✅ Config written to {}", config_path.display());
    println!("   Set admin.password before running `blogctl serve`.");
    Ok(())
}

fn run_show(config_path: &Path) -> Result<()> {
    let mut config = BlogConfig::load(config_path)?;
    config.admin.password = "***".to_string();

    let toml_str =
        toml::to_string_pretty(&config).context("Failed to serialize config to TOML")?;
    println!("{}", toml_str);
    Ok(())
}

fn run_validate(config_path: &Path) -> Result<()> {
    let config = BlogConfig::load(config_path)?;

    println!("✓ Config loaded from {}", config_path.display());
    println!("  bind: {}", config.server.bind);
    println!("  database: {}", config.database.url);
    println!("  uploads: {}", config.uploads.dir.display());
    println!("  posts per page: {}", config.site.posts_per_page);

    if config.admin.password == "change-me" {
        println!("⚠  admin.password is still the template default");
    }

    Ok(())
}
