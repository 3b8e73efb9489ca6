use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Optional defaults merged beneath the command-line flags.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub ignore: IgnoreConfig,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub color: bool,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnoreConfig {
    pub extensions: Vec<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        match Self::find_config_path() {
            Some(path) => {
                let content = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;
                toml::from_str(&content)
                    .with_context(|| format!("Failed to parse config file: {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }

    fn find_config_path() -> Option<PathBuf> {
        let path = dirs::config_dir()?.join("sfind/config.toml");
        path.exists().then_some(path)
    }
}
