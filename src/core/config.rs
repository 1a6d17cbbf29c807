use crate::error::{Result, StatusError};
use crate::ui::gradient::ColorChoice;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that points at an alternative config file
pub const CONFIG_ENV: &str = "ADB_STATUSLINE_CONFIG";

pub const DEFAULT_LOAD_CORE_MULTIPLIER: u32 = 3;
pub const DEFAULT_PLACEHOLDER: &str = "X";

/// Persistent defaults, all optional. CLI flags win over anything here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Default color profile when `-C` is not given
    pub color: Option<ColorChoice>,
    /// Default device serial when `-s` is not given
    pub device: Option<String>,
    /// Explicit adb executable; skips the PATH lookup
    pub adb_path: Option<PathBuf>,
    /// Load is judged against `cores * load_core_multiplier`
    pub load_core_multiplier: u32,
    /// Shown instead of the CPU figure when it cannot be read
    pub unavailable_placeholder: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color: None,
            device: None,
            adb_path: None,
            load_core_multiplier: DEFAULT_LOAD_CORE_MULTIPLIER,
            unavailable_placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

impl Config {
    /// Load from `explicit`, else `$ADB_STATUSLINE_CONFIG`, else the default
    /// location. Only an explicitly named file is required to exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::load_from(Path::new(&path));
        }

        match Self::get_config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Config::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Reading config from {}", path.display());
        let data = fs::read_to_string(path).map_err(|e| {
            StatusError::config(format!("failed to read {}: {}", path.display(), e))
        })?;

        // An empty file behaves like no file.
        if data.trim().is_empty() {
            return Ok(Config::default());
        }

        let config: Config = serde_json::from_str(&data)
            .map_err(|e| StatusError::config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = serde_json::to_string_pretty(self)
            .map_err(|e| StatusError::config(format!("failed to serialize config: {}", e)))?;
        fs::write(path, data)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.load_core_multiplier == 0 {
            return Err(StatusError::config("load_core_multiplier must be at least 1"));
        }
        Ok(())
    }

    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("adb-statusline").join("config.json"))
    }
}
