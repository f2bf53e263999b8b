// CLI-side configuration file, read by the `nes-rs` binary only (not part of
// the `nes_rs` library surface). Mirrors the reference codebase's own
// `EmulatorConfig` pattern: a `serde`-derived struct loaded from a TOML file
// next to the binary's working directory, with every field optional so an
// absent or partial file still produces sensible defaults.

use serde::Deserialize;
use std::path::Path;

const DEFAULT_CONFIG_PATH: &str = "emulator_config.toml";

#[derive(Debug, Deserialize, Default)]
pub struct EmulatorConfig {
    pub log_level: Option<String>,
    pub trace_on_startup: Option<bool>,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "could not read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "could not parse config file: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl EmulatorConfig {
    /// Load `emulator_config.toml` from the current working directory. A
    /// missing file is not an error — it yields `EmulatorConfig::default()`,
    /// matching the "absence of the file is not an error" contract.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        toml::from_str(&contents).map_err(ConfigError::Parse)
    }
}
