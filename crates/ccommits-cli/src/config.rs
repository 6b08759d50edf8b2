use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_true")]
    pub colored: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self { colored: true }
    }
}

impl Config {
    /// Load config from .ccommitsrc (TOML format). The language server
    /// reads the same files and ignores the keys it does not know.
    pub fn load() -> Result<Self> {
        let config_paths = vec![
            PathBuf::from(".ccommitsrc"),
            PathBuf::from(".ccommitsrc.toml"),
            PathBuf::from(".config/ccommitsrc"),
        ];

        for path in config_paths {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Config::default())
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: Config =
            toml::from_str(&content).with_context(|| format!("Invalid config in {:?}", path))?;
        Ok(config)
    }

    /// Merge CLI arguments into config
    pub fn merge_cli_args(&mut self, no_color: bool) {
        if no_color {
            self.colored = false;
        }
    }
}
