use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "outline.config.json";

/// Outline tool configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Outline index JSON acting as the content store
    #[serde(default = "default_outline_file")]
    pub outline_file: String,

    /// Tracing filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Pretty-print the outline file when writing it back
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_outline_file() -> String {
    "outline.json".to_string()
}

fn default_log_filter() -> String {
    "warn".to_string()
}

fn default_pretty() -> bool {
    true
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Absolute path to the outline file
    pub fn outline_path(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.outline_file)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            outline_file: default_outline_file(),
            log_filter: default_log_filter(),
            pretty: default_pretty(),
        }
    }
}
