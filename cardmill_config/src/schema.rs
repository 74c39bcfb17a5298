use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use cardmill_core::MatcherDef;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub anki: AnkiConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub parser: ParserConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AnkiConfig {
    #[serde(default = "AnkiConfig::default_url")]
    pub url: String,
}

impl Default for AnkiConfig {
    fn default() -> Self {
        Self {
            url: Self::default_url(),
        }
    }
}

impl AnkiConfig {
    fn default_url() -> String {
        "http://localhost:8765".to_string()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SyncConfig {
    #[serde(default = "SyncConfig::default_deck")]
    pub deck: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            deck: Self::default_deck(),
        }
    }
}

impl SyncConfig {
    fn default_deck() -> String {
        "Auto Deck".to_string()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ParserConfig {
    /// Matcher overrides. Empty means the built-in definition-block matcher.
    #[serde(default)]
    pub matchers: Vec<MatcherDef>,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("cardmill");

        let config_path = config_dir.join("config.json");

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'cardmill init' to create config.",
                config_path.display()
            );
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = serde_json::from_str(&content)?;

        Ok(config)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("cardmill");

        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        let config_template = r#"{
  "anki": {
    "url": "http://localhost:8765"
  },
  "sync": {
    "deck": "Auto Deck"
  },
  "parser": {
    "matchers": []
  }
}"#;

        std::fs::write(&config_path, config_template)?;

        println!("Created config file at: {}", config_path.display());
        println!();
        println!("Next steps:");
        println!("   1. Start Anki with the AnkiConnect add-on enabled");
        println!("   2. Adjust the deck name or endpoint URL if needed");
        println!("   3. Run 'cardmill sync <files>' to push definitions");
        println!();
        println!("Configuration options:");
        println!("   - anki.url: AnkiConnect endpoint (default http://localhost:8765)");
        println!("   - sync.deck: deck receiving extracted notes");
        println!("   - parser.matchers: custom extraction patterns (pattern, key_slot, val_slot)");
        println!();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_contract() {
        let config = Config::default();
        assert_eq!(config.anki.url, "http://localhost:8765");
        assert_eq!(config.sync.deck, "Auto Deck");
        assert!(config.parser.matchers.is_empty());
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn partial_config_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"sync": {"deck": "Biology"}}"#)
            .expect("valid JSON should deserialize");

        assert_eq!(config.sync.deck, "Biology");
        assert_eq!(config.anki.url, "http://localhost:8765");
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn template_is_valid_config() {
        let template = r#"{
  "anki": { "url": "http://localhost:8765" },
  "sync": { "deck": "Auto Deck" },
  "parser": { "matchers": [] }
}"#;
        let config: Config = serde_json::from_str(template).expect("template should deserialize");
        assert_eq!(config.sync.deck, "Auto Deck");
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn custom_matchers_deserialize() {
        let config: Config = serde_json::from_str(
            r#"{"parser": {"matchers": [{"pattern": "(a):(b)", "key_slot": 1, "val_slot": 2}]}}"#,
        )
        .expect("valid JSON should deserialize");

        assert_eq!(config.parser.matchers.len(), 1);
        assert!(config.parser.matchers[0].build().is_ok());
    }
}
