use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use orderscribe_core::{DraftConfig, ItemMatcher, MatcherConfig, ModifierExtractor};

const CONFIG_DIR: &str = "orderscribe";
const CONFIG_FILE: &str = "config.json";

const CONFIG_TEMPLATE: &str = r#"{
  "matcher": {
    "window_radius": 50,
    "entity_max_distance": 50,
    "whole_word_confidence": 0.95,
    "substring_confidence": 0.7
  },
  "modifiers": {
    "rules": null
  },
  "draft": {
    "auto_confirm_threshold": 0.8
  },
  "transcription": {
    "max_keyterms": 100
  }
}"#;

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub matcher: MatcherConfig,
    #[serde(default)]
    pub modifiers: ModifierConfig,
    #[serde(default)]
    pub draft: DraftConfig,
    #[serde(default)]
    pub transcription: TranscriptionConfig,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ModifierConfig {
    /// Replaces the built-in modifier table when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<orderscribe_core::ModifierRule>>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct TranscriptionConfig {
    #[serde(default = "TranscriptionConfig::default_max_keyterms")]
    pub max_keyterms: usize,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            max_keyterms: Self::default_max_keyterms(),
        }
    }
}

impl TranscriptionConfig {
    const fn default_max_keyterms() -> usize {
        100
    }
}

impl Config {
    /// `~/orderscribe`.
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join(CONFIG_DIR))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'orderscribe init' to create config.",
                config_path.display()
            );
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config at {}: {e}", path.display()))?;
        Ok(config)
    }

    /// Like [`Config::load`], but a missing file means defaults.
    ///
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_or_default() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            return Self::load_from(&config_path);
        }

        warn!(
            "No config at {}, using built-in defaults",
            config_path.display()
        );
        Ok(Self::default())
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join(CONFIG_FILE);
        Self::create_at(&config_path)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("🔧 Configuration options:");
        println!("   - matcher.window_radius: characters searched on each side of an item");
        println!("   - matcher.entity_max_distance: how far back a cardinal entity may sit");
        println!("   - modifiers.rules: replace the built-in modifier table");
        println!("   - draft.auto_confirm_threshold: confidence above which lines start confirmed");
        println!("   - transcription.max_keyterms: menu names sent to the transcription service");
        println!();
        Ok(())
    }

    /// Write the config template to `path`, refusing to overwrite.
    pub fn create_at(path: &Path) -> anyhow::Result<()> {
        if path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                path.display()
            );
        }

        std::fs::write(path, CONFIG_TEMPLATE)?;
        info!("Wrote config template to {}", path.display());
        Ok(())
    }

    /// An [`ItemMatcher`] using this config's matcher settings and modifier table.
    pub fn build_matcher(&self) -> anyhow::Result<ItemMatcher> {
        let modifiers = match &self.modifiers.rules {
            Some(rules) => {
                info!("Using {} configured modifier rules", rules.len());
                ModifierExtractor::new(rules)?
            }
            None => ModifierExtractor::default(),
        };

        Ok(ItemMatcher::new(self.matcher.clone(), modifiers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_template_parses_to_defaults() {
        let config: Config = serde_json::from_str(CONFIG_TEMPLATE).expect("template is valid");
        assert_eq!(config, Config::default());
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_missing_sections_default() {
        let config: Config =
            serde_json::from_str(r#"{"draft": {"auto_confirm_threshold": 0.5}}"#)
                .expect("partial config parses");

        assert!((config.draft.auto_confirm_threshold - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.matcher, MatcherConfig::default());
        assert_eq!(config.transcription.max_keyterms, 100);
        assert!(config.modifiers.rules.is_none());
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_create_at_refuses_overwrite() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);

        Config::create_at(&path).expect("first write succeeds");
        assert!(Config::create_at(&path).is_err());

        let loaded = Config::load_from(&path).expect("template loads");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_load_from_invalid_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{ not json").expect("write");

        let Err(err) = Config::load_from(&path) else {
            panic!("invalid config should not load");
        };
        assert!(err.to_string().contains("Invalid config"));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_build_matcher_with_custom_rules() {
        let json = r#"{
            "matcher": {"whole_word_confidence": 0.9},
            "modifiers": {"rules": [
                {"id": "gf", "pattern": "gluten[- ]free", "emission": {"kind": "fixed", "value": "GF"}}
            ]}
        }"#;
        let config: Config = serde_json::from_str(json).expect("config parses");
        let matcher = config.build_matcher().expect("rules compile");

        let results = matcher.match_items("one gluten free pizza, no olives", &["Pizza"], &[]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].modifiers, vec!["gf"]);
        assert!((results[0].confidence - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_build_matcher_rejects_bad_pattern() {
        let mut config = Config::default();
        config.modifiers.rules = Some(vec![orderscribe_core::ModifierRule::new("bad", "(")]);
        assert!(config.build_matcher().is_err());
    }
}
