//! Portal Configuration
//!
//! TOML config, user path `~/.config/atrium/config.toml`, falling back to
//! built-in defaults when no file exists. The chat API key is read from the
//! `OPENAI_API_KEY` environment variable only and is never persisted.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address for the portal API
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Directory for the JSON record files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Seed demo records into an empty store on startup
    #[serde(default = "default_true")]
    pub seed_sample_data: bool,
}

fn default_listen_addr() -> String {
    "127.0.0.1:7810".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("/var/lib/atrium")
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            data_dir: default_data_dir(),
            seed_sample_data: true,
        }
    }
}

/// Chat completion settings for the assistant passthrough
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Disable to force canned responses even when a key is present
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_api_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_max_tokens() -> u32 {
    500
}

fn default_temperature() -> f32 {
    0.7
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_url: default_api_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

impl LlmConfig {
    /// API key from the environment; never read from or written to disk
    pub fn api_key(&self) -> Option<String> {
        std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty())
    }
}

/// Main portal configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortalConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub llm: LlmConfig,
}

impl PortalConfig {
    /// Default user config path: ~/.config/atrium/config.toml
    pub fn user_config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("XDG_CONFIG_HOME"))
            .context("Cannot determine home directory")?;

        let config_dir = if home.contains("/.config") {
            PathBuf::from(home)
        } else {
            Path::new(&home).join(".config")
        };

        Ok(config_dir.join("atrium").join("config.toml"))
    }

    /// Load from the user config file, or fall back to defaults
    pub fn load() -> Result<Self> {
        if let Ok(path) = Self::user_config_path() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }
        Ok(Self::default())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: PortalConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Save to the user config file
    pub fn save(&self) -> Result<()> {
        let path = Self::user_config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        let toml_string =
            toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        fs::write(&path, toml_string)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PortalConfig::default();
        assert_eq!(config.server.listen_addr, "127.0.0.1:7810");
        assert_eq!(config.llm.model, "gpt-3.5-turbo");
        assert_eq!(config.llm.max_tokens, 500);
        assert!(config.server.seed_sample_data);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: PortalConfig = toml::from_str(
            r#"
            [server]
            listen_addr = "0.0.0.0:8080"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.server.data_dir, PathBuf::from("/var/lib/atrium"));
        assert_eq!(config.llm.temperature, 0.7);
    }

    #[test]
    fn test_toml_round_trip() {
        let mut original = PortalConfig::default();
        original.llm.enabled = false;
        original.llm.model = "gpt-4o-mini".to_string();

        let toml = toml::to_string(&original).unwrap();
        let parsed: PortalConfig = toml::from_str(&toml).unwrap();
        assert!(!parsed.llm.enabled);
        assert_eq!(parsed.llm.model, "gpt-4o-mini");
    }
}
