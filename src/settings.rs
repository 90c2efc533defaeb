//! User settings for the command-line tool.
//!
//! Stored as JSON in the platform config directory. A missing file means
//! defaults; command-line flags override whatever is loaded here.

use crate::core::constants::{
    DEFAULT_CATALOG_FILE, DEFAULT_SIM_RUNS, SETTINGS_DIR_NAME, SETTINGS_FILE_NAME,
};
use crate::error::{PackError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub catalog_path: PathBuf,
    pub default_runs: u32,
    pub default_seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_FILE),
            default_runs: DEFAULT_SIM_RUNS,
            default_seed: None,
        }
    }
}

impl Settings {
    /// Path of the settings file in the user's config directory.
    pub fn settings_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            PackError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine config directory",
            ))
        })?;
        Ok(config_dir.join(SETTINGS_DIR_NAME).join(SETTINGS_FILE_NAME))
    }

    /// Load from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::settings_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
