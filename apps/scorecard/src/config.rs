// apps/scorecard/src/config.rs
use common::*;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config/scorecard.toml";
pub const CONFIG_ENV: &str = "SCORECARD_CONFIG";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data: DataSection,
    #[serde(default)]
    pub report: ReportSection,
    #[serde(default)]
    pub portfolio: Vec<HoldingEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataSection {
    pub stocks_path: PathBuf,
    /// Falls back to the built-in tables when absent
    pub benchmarks_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportSection {
    pub top_n: usize,
    #[serde(default)]
    pub show_breakdown: bool,
    #[serde(default)]
    pub json: bool,
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            top_n: 10,
            show_breakdown: false,
            json: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HoldingEntry {
    pub symbol: String,
    pub value: f64,
}

impl Config {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.report.top_n == 0 {
            return Err(Error::Config("report.top_n must be at least 1".to_string()));
        }
        for holding in &self.portfolio {
            if !holding.value.is_finite() || holding.value < 0.0 {
                return Err(Error::Config(format!(
                    "portfolio holding {} has invalid value {}",
                    holding.symbol, holding.value
                )));
            }
        }
        Ok(())
    }

    /// Resolve relative data paths against the directory holding the config
    pub fn resolve_paths(&mut self, base: &Path) {
        if self.data.stocks_path.is_relative() {
            self.data.stocks_path = base.join(&self.data.stocks_path);
        }
        if let Some(path) = self.data.benchmarks_path.as_mut() {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

pub fn config_path() -> PathBuf {
    std::env::var(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
}

pub fn load_config(path: &Path) -> Result<Config> {
    let config_str = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read config {}: {}", path.display(), e)))?;

    let mut config = Config::from_toml_str(&config_str)?;

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    config.resolve_paths(base);

    Ok(config)
}
