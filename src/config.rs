use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub default_database: Option<PathBuf>,
    /// Seconds before the clipboard is cleared, 0 leaves it alone
    #[serde(default)]
    pub clipboard_timeout: u64,
    #[serde(default)]
    pub theme: Theme,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub use_colors: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self { use_colors: true }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_database: None,
            clipboard_timeout: 0,
            theme: Theme::default(),
        }
    }
}

impl Config {
    /// Load configuration, writing the defaults on first run
    pub fn load() -> Result<Self> {
        ensure_config_dir()?;
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            let config = Self::default();
            config.save_to(config_path)?;
            return Ok(config);
        }

        let config_data = fs::read_to_string(config_path)?;
        let config: Config = toml::from_str(&config_data)
            .map_err(|e| anyhow!("Invalid config {}: {}", config_path.display(), e))?;
        Ok(config)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        let config_toml = toml::to_string_pretty(self)?;
        fs::write(config_path, config_toml)?;
        Ok(())
    }

    /// Database path from the command line, else from the config file
    pub fn database(&self, flag: Option<PathBuf>) -> Result<PathBuf> {
        flag.or_else(|| self.default_database.clone())
            .ok_or_else(|| anyhow!("No database given. Use --database or set default_database in the config"))
    }

    fn config_path() -> Result<PathBuf> {
        Ok(base_dir()?.join("config.toml"))
    }
}

/// Get base directory for keyclip
pub fn base_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
    Ok(home.join(".keyclip"))
}

/// Ensure configuration directory exists
pub fn ensure_config_dir() -> Result<()> {
    fs::create_dir_all(base_dir()?)?;
    Ok(())
}
