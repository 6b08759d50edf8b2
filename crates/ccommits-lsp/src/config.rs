use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tower_lsp::lsp_types::DiagnosticSeverity;

/// Overrides `log_level` when set.
pub const LOG_ENV: &str = "CCOMMITS_LOG";

pub const CONFIG_PATHS: [&str; 3] = [".ccommitsrc", ".ccommitsrc.toml", ".config/ccommitsrc"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Error,
    Warning,
    Information,
    Hint,
}

impl Severity {
    pub fn to_lsp(self) -> DiagnosticSeverity {
        match self {
            Severity::Error => DiagnosticSeverity::ERROR,
            Severity::Warning => DiagnosticSeverity::WARNING,
            Severity::Information => DiagnosticSeverity::INFORMATION,
            Severity::Hint => DiagnosticSeverity::HINT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log to this file instead of stderr.
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Validate as soon as a document is opened, not only after edits.
    #[serde(default)]
    pub diagnose_on_open: bool,

    #[serde(default)]
    pub severity: Severity,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_file: None,
            diagnose_on_open: false,
            severity: Severity::default(),
        }
    }
}

impl Config {
    /// Load config from .ccommitsrc (TOML format)
    pub fn load() -> Result<Self> {
        for path in CONFIG_PATHS.iter().map(PathBuf::from) {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Config::default())
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        Self::from_toml(&content).with_context(|| format!("Invalid config in {:?}", path))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn max_level(&self) -> Result<tracing::Level> {
        let level = std::env::var(LOG_ENV).unwrap_or_else(|_| self.log_level.clone());
        level
            .parse()
            .with_context(|| format!("Invalid log level {:?}", level))
    }

    /// Installs the global tracing subscriber. Stdout carries the protocol,
    /// so logs go to stderr or to `log_file`.
    pub fn init_logging(&self) -> Result<()> {
        let builder = tracing_subscriber::fmt().with_max_level(self.max_level()?);

        match &self.log_file {
            Some(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("Failed to open log file {:?}", path))?;
                builder.with_ansi(false).with_writer(Mutex::new(file)).init();
            }
            None => builder.with_writer(std::io::stderr).init(),
        }

        Ok(())
    }
}
