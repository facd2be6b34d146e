use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{BanterError, Result};

/// Top-level configuration for the Banter application.
///
/// Loaded from `~/.banter/config.toml` by default. Each section corresponds
/// to a bounded context or cross-cutting concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BanterConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub engine: EngineSettings,
    #[serde(default)]
    pub render: RenderSettings,
}

impl Default for BanterConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            catalog: CatalogConfig::default(),
            engine: EngineSettings::default(),
            render: RenderSettings::default(),
        }
    }
}

impl BanterConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed. Out-of-range
    /// numeric settings are clamped rather than rejected.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: BanterConfig = toml::from_str(&content)?;
        config.sanitize();
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| BanterError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Clamp numeric settings into their valid ranges, warning on each fix.
    fn sanitize(&mut self) {
        if !(0.0..=1.0).contains(&self.engine.fuzzy_threshold) {
            let clamped = self.engine.fuzzy_threshold.clamp(0.0, 1.0);
            warn!(
                "fuzzy_threshold {} outside [0, 1], clamping to {}",
                self.engine.fuzzy_threshold, clamped
            );
            self.engine.fuzzy_threshold = clamped;
        }
        if self.render.max_char_delay_ms < self.render.min_char_delay_ms {
            warn!(
                "max_char_delay_ms {} below min_char_delay_ms {}, raising to match",
                self.render.max_char_delay_ms, self.render.min_char_delay_ms
            );
            self.render.max_char_delay_ms = self.render.min_char_delay_ms;
        }
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Response catalog source and reserved keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path to the catalog JSON document.
    pub path: String,
    /// Key whose entry (and aliases) triggers the command listing.
    pub help_key: String,
    /// Key whose resolution hands control back to the host view.
    pub goodbye_key: String,
    /// Key holding the fallback reply for unmatched input.
    pub unknown_key: String,
    /// Key whose resolution arms the awaiting-name follow-up.
    pub ask_name_key: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: "responses.json".to_string(),
            help_key: "help".to_string(),
            goodbye_key: "goodbye".to_string(),
            unknown_key: "unknown".to_string(),
            ask_name_key: "ask-name".to_string(),
        }
    }
}

/// Matching and selection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Fuzzy match eligibility threshold in [0, 1]; lower is stricter.
    pub fuzzy_threshold: f64,
    /// Maximum redraw attempts when a variant repeats the previous reply.
    pub max_redraws: u32,
    /// Reply template for the awaiting-name follow-up; `{name}` is replaced.
    pub greeting_template: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            fuzzy_threshold: 0.4,
            max_redraws: 10,
            greeting_template: "Nice to meet you, {name}!".to_string(),
        }
    }
}

/// Typewriter rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Whether to animate output character by character.
    pub animate: bool,
    /// Minimum per-character delay in milliseconds.
    pub min_char_delay_ms: u64,
    /// Maximum per-character delay in milliseconds.
    pub max_char_delay_ms: u64,
    /// Pause between queued messages in milliseconds.
    pub message_gap_ms: u64,
    /// Delay between the goodbye render completing and the view toggle.
    pub handoff_delay_ms: u64,
    /// Messages rendered after a successful catalog load.
    pub welcome: Vec<String>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            animate: true,
            min_char_delay_ms: 50,
            max_char_delay_ms: 150,
            message_gap_ms: 800,
            handoff_delay_ms: 1500,
            welcome: vec![
                "Initializing terminal...".to_string(),
                "Response catalog loaded.".to_string(),
                "Type 'help' to list available commands.".to_string(),
            ],
        }
    }
}
