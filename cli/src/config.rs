//! CLI configuration with TOML file support.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use slp_utils::LogFormat;

/// Settings shared by every `slp` subcommand.
///
/// Loaded from a TOML file via [`CliConfig::from_toml_file`]; command-line
/// flags and `SLP_*` environment variables are layered on top with
/// [`CliConfig::apply_overrides`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Directory holding the LMDB environment.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// LMDB map size in MiB.
    #[serde(default = "default_map_size_mb")]
    pub map_size_mb: usize,
}

/// Values given on the command line or through the environment.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub data_dir: Option<PathBuf>,
    pub log_format: Option<LogFormat>,
    pub log_level: Option<String>,
    pub map_size_mb: Option<usize>,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_data_dir() -> PathBuf {
    PathBuf::from("./slp_data")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_map_size_mb() -> usize {
    64
}

// ── Impl ───────────────────────────────────────────────────────────────

impl CliConfig {
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// File settings as the base, flags and env vars win.
    pub fn apply_overrides(self, overrides: ConfigOverrides) -> Self {
        Self {
            data_dir: overrides.data_dir.unwrap_or(self.data_dir),
            log_format: overrides.log_format.unwrap_or(self.log_format),
            log_level: overrides.log_level.unwrap_or(self.log_level),
            map_size_mb: overrides.map_size_mb.unwrap_or(self.map_size_mb),
        }
    }

    /// LMDB map size in bytes.
    pub fn map_size(&self) -> usize {
        self.map_size_mb.saturating_mul(1024 * 1024)
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            map_size_mb: default_map_size_mb(),
        }
    }
}
