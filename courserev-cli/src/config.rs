use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use courserev_core::ReportOptions;
use courserev_server::db::pool::DEFAULT_MAX_CONNECTIONS;

/// Environment variable that points at an alternative config file
pub const CONFIG_ENV: &str = "COURSEREV_CONFIG";

/// Variables substituted into `${VAR}` placeholders
const EXPANDED_VARS: &[&str] = &["HOME", "DATABASE_URL"];

/// Configuration loaded from ~/.courserev/config.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourserevConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
    pub report: ReportOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind: SocketAddr,
    pub cors_permissive: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3030)),
            cors_permissive: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl CourserevConfig {
    /// Default config file path: ~/.courserev/config.toml
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".courserev/config.toml")
    }

    /// `--config` wins, then `COURSEREV_CONFIG`, then the default path.
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        match env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => Self::default_path(),
        }
    }

    /// Load config from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).context("Invalid TOML")?;
        config.expand_variables();
        Ok(config)
    }

    fn expand_variables(&mut self) {
        if let Some(url) = self.database.url.take() {
            let expanded = expand_string(&url);
            // An unset ${DATABASE_URL} leaves nothing to connect to
            self.database.url = Some(expanded).filter(|u| !u.trim().is_empty());
        }
    }
}

fn expand_string(s: &str) -> String {
    EXPANDED_VARS.iter().fold(s.to_string(), |acc, key| {
        let pattern = format!("${{{key}}}");
        if acc.contains(&pattern) {
            acc.replace(&pattern, &env::var(key).unwrap_or_default())
        } else {
            acc
        }
    })
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show config file path
    Path,
    /// Print the effective config as TOML
    Show,
}

pub fn run_config(args: ConfigArgs, path: &Path, config: &CourserevConfig) -> Result<()> {
    match args.command {
        ConfigCommands::Path => {
            println!("{}", path.display());
        }
        ConfigCommands::Show => {
            let toml_str =
                toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;
            println!("{toml_str}");
        }
    }
    Ok(())
}
