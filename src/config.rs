use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use std::path::Path;
use tokio::fs;

use crate::render::{JsonRenderer, Renderer, TextRenderer};

pub const CONFIG_FILE: &str = "pairwheel_config.json";
pub const CONFIG_ENV: &str = "PAIRWHEEL_CONFIG";
pub const SEED_ENV: &str = "PAIRWHEEL_SEED";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn renderer(self) -> Box<dyn Renderer> {
        match self {
            OutputFormat::Text => Box::new(TextRenderer),
            OutputFormat::Json => Box::new(JsonRenderer),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigData {
    /// Fixed seed for a reproducible session.
    pub seed: Option<u64>,
    /// Names put on the wheel at startup.
    pub participants: Vec<String>,
    pub output: OutputFormat,
}

impl ConfigData {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let content = fs::read_to_string(path).await?;
            serde_json::from_str(&content)
                .with_context(|| format!("invalid config file {}", path.display()))
        } else {
            Ok(ConfigData::default())
        }
    }

    /// Loads the file named by `PAIRWHEEL_CONFIG` (or the default file) and
    /// applies `PAIRWHEEL_SEED` on top.
    pub async fn from_env() -> Result<Self> {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| CONFIG_FILE.to_string());
        let mut config = Self::load(&path).await?;
        if let Ok(seed) = std::env::var(SEED_ENV) {
            config.seed = Some(
                seed.parse()
                    .with_context(|| format!("{SEED_ENV} must be a u64, got {seed}"))?,
            );
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_gives_defaults() {
        let config = ConfigData::load("does/not/exist.json").await.unwrap();
        assert_eq!(config, ConfigData::default());
        assert_eq!(config.output, OutputFormat::Text);
    }

    #[tokio::test]
    async fn reads_partial_file() {
        let path = std::env::temp_dir().join(format!("pairwheel-{}.json", std::process::id()));
        fs::write(&path, r#"{"participants": ["Ana", "Bob"], "output": "json"}"#)
            .await
            .unwrap();

        let config = ConfigData::load(&path).await.unwrap();
        fs::remove_file(&path).await.unwrap();

        assert_eq!(config.seed, None);
        assert_eq!(config.participants, vec!["Ana", "Bob"]);
        assert_eq!(config.output, OutputFormat::Json);
    }

    #[tokio::test]
    async fn rejects_malformed_file() {
        let path = std::env::temp_dir().join(format!("pairwheel-bad-{}.json", std::process::id()));
        fs::write(&path, "{ not json").await.unwrap();

        let result = ConfigData::load(&path).await;
        fs::remove_file(&path).await.unwrap();

        assert!(result.is_err());
    }
}
