mod loader;
mod types;

pub use loader::{ConfigError, CONFIG_PATH_ENV};
pub use types::{AbiConfig, Config, DevToolConfig, LogConfig, RuntimeConfig};
