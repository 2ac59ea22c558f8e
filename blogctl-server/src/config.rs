//! Blog configuration loaded once at startup
//!
//! Configuration lives in `~/.blogctl/config.toml` unless a path is given.
//! A handful of environment variables override the file:
//! - `DATABASE_URL`: database connection string
//! - `BLOGCTL_ADMIN_USER` / `BLOGCTL_ADMIN_PASSWORD`: admin credentials
//! - `BLOGCTL_UPLOAD_DIR`: upload directory

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default page size for the home page listing
const DEFAULT_POSTS_PER_PAGE: u32 = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub database: DatabaseSection,
    pub admin: AdminCredentials,
    #[serde(default)]
    pub uploads: UploadSection,
    #[serde(default)]
    pub site: SiteParams,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    pub bind: SocketAddr,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSection {
    pub url: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: "sqlite://blog.db".to_string(),
        }
    }
}

/// The single admin identity
#[derive(Clone, Serialize, Deserialize)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadSection {
    pub dir: PathBuf,
}

impl Default for UploadSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("static/uploads"),
        }
    }
}

/// Site parameters handed to every view.
///
/// Unknown keys in `[site]` (social links, about text, ...) are kept in
/// `extra` so templates can reference them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteParams {
    #[serde(default = "default_posts_per_page")]
    pub posts_per_page: u32,
    #[serde(default)]
    pub blog_name: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, toml::Value>,
}

fn default_posts_per_page() -> u32 {
    DEFAULT_POSTS_PER_PAGE
}

impl Default for SiteParams {
    fn default() -> Self {
        Self {
            posts_per_page: DEFAULT_POSTS_PER_PAGE,
            blog_name: String::new(),
            extra: BTreeMap::new(),
        }
    }
}

impl BlogConfig {
    /// Config file path: ~/.blogctl/config.toml
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".blogctl/config.toml")
    }

    /// Load, apply environment overrides and validate.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "Config not found at {:?}\n\nCreate it or pass --config <path>",
                path
            );
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let mut config = Self::from_toml(&content)?;
        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parse a config from TOML text without touching the environment.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file (invalid TOML)")
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = env::var("DATABASE_URL") {
            self.database.url = url;
        }
        if let Ok(user) = env::var("BLOGCTL_ADMIN_USER") {
            self.admin.username = user;
        }
        if let Ok(password) = env::var("BLOGCTL_ADMIN_PASSWORD") {
            self.admin.password = password;
        }
        if let Ok(dir) = env::var("BLOGCTL_UPLOAD_DIR") {
            self.uploads.dir = PathBuf::from(dir);
        }
    }

    /// Reject settings the server cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.site.posts_per_page == 0 {
            anyhow::bail!("site.posts_per_page must be at least 1");
        }
        if self.admin.username.is_empty() || self.admin.password.is_empty() {
            anyhow::bail!("admin.username and admin.password must be set");
        }
        if self.database.url.is_empty() {
            anyhow::bail!("database.url must be set");
        }
        Ok(())
    }
}
