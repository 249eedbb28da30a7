//! Configuration management for the library server

use anyhow::{Context, Result};
use doclib::LibraryConfig;
use serde::Deserialize;
use std::path::Path;

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server host (default: 0.0.0.0)
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port (default: 5000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins (comma-separated). If empty, any origin is allowed.
    pub cors_allowed_origins: Option<String>,

    /// JSON file listing Drive files offered to `POST /api/sync-drive`
    pub drive_manifest: Option<String>,

    /// Library store behavior
    #[serde(default)]
    pub library: LibraryConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = lookup("DOCLIB_HOST").unwrap_or_else(default_host);
        let port = match lookup("DOCLIB_PORT") {
            Some(s) => s
                .parse()
                .with_context(|| format!("Invalid DOCLIB_PORT '{}'", s))?,
            None => default_port(),
        };
        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS");
        let drive_manifest = lookup("DOCLIB_DRIVE_MANIFEST");

        let defaults = LibraryConfig::default();
        let flag = |key: &str, default: bool| -> Result<bool> {
            match lookup(key) {
                Some(s) => parse_flag(&s).with_context(|| format!("Invalid {} '{}'", key, s)),
                None => Ok(default),
            }
        };
        let library = LibraryConfig {
            seed_defaults: flag("DOCLIB_SEED_DEFAULTS", defaults.seed_defaults)?,
            strict_folder_parents: flag(
                "DOCLIB_STRICT_FOLDER_PARENTS",
                defaults.strict_folder_parents,
            )?,
            unique_user_emails: flag("DOCLIB_UNIQUE_USER_EMAILS", defaults.unique_user_emails)?,
            recount_on_update: flag("DOCLIB_RECOUNT_ON_UPDATE", defaults.recount_on_update)?,
            ..defaults
        };

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            drive_manifest,
            library,
        })
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config =
            toml::from_str(&content).with_context(|| "Failed to parse config file")?;
        Ok(config)
    }

    /// Parsed CORS origins; empty when any origin is allowed
    pub fn allowed_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Accepts `true`/`false` (any case) and `1`/`0`
fn parse_flag(value: &str) -> Result<bool> {
    match value.trim() {
        "1" => Ok(true),
        "0" => Ok(false),
        v if v.eq_ignore_ascii_case("true") => Ok(true),
        v if v.eq_ignore_ascii_case("false") => Ok(false),
        _ => anyhow::bail!("expected true, false, 1 or 0"),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_allowed_origins: None,
            drive_manifest: None,
            library: LibraryConfig::default(),
        }
    }
}
