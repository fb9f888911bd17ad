use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::args::{AbiRange, CURRENT_ABI_VERSION, OLDEST_SUPPORTED_ABI_VERSION};

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub devtool: DevToolConfig,
    #[serde(default)]
    pub abi: AbiConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

/// Where to look for the dev-tool snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DevToolConfig {
    /// Exact snapshot path, checked before any search directory.
    #[serde(default)]
    pub snapshot: Option<PathBuf>,
    /// SDK `bin/` directories to search (the executable's own directory is
    /// always searched last).
    #[serde(default)]
    pub search_dirs: Vec<PathBuf>,
}

/// ABI versions accepted by `--use_abi_version`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AbiConfig {
    #[serde(default = "default_oldest_supported")]
    pub oldest_supported: u32,
    #[serde(default = "default_current")]
    pub current: u32,
}

/// How the runtime binary itself was built.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// The runtime is an app snapshot; generating another one is refused.
    #[serde(default)]
    pub run_from_app_snapshot: bool,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// `tracing` filter directive used when `VMLAUNCH_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_oldest_supported() -> u32 {
    OLDEST_SUPPORTED_ABI_VERSION
}

fn default_current() -> u32 {
    CURRENT_ABI_VERSION
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for AbiConfig {
    fn default() -> Self {
        Self {
            oldest_supported: default_oldest_supported(),
            current: default_current(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl AbiConfig {
    pub fn range(&self) -> AbiRange {
        AbiRange {
            oldest: self.oldest_supported,
            current: self.current,
        }
    }
}
