//! CLI argument definitions for the banter terminal.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

/// Banter — an embeddable terminal chat widget driven by a response catalog.
#[derive(Parser, Debug)]
#[command(name = "banter", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Path to the response catalog (JSON).
    #[arg(long = "catalog")]
    pub catalog: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Disable the typing animation and render whole lines at once.
    #[arg(long = "plain")]
    pub plain: bool,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > BANTER_CONFIG env var > platform default
    /// (~/.banter/config.toml).
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("BANTER_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the response catalog path.
    ///
    /// Priority: --catalog flag > BANTER_CATALOG env var > config file value.
    pub fn resolve_catalog_path(&self, config_path: &str) -> PathBuf {
        if let Some(ref p) = self.catalog {
            return p.clone();
        }
        if let Ok(p) = std::env::var("BANTER_CATALOG") {
            return PathBuf::from(p);
        }
        PathBuf::from(config_path)
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".banter").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".banter").join("config.toml");
    }
    PathBuf::from("config.toml")
}
