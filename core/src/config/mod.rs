use crate::agent::DuplicateCallPolicy;
use crate::agent::announcer::DEFAULT_MODALITIES;
use crate::agent::dispatcher::DEFAULT_RECENT_CALL_CAPACITY;
use crate::agent::log::DEFAULT_CALL_LOG_CAPACITY;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const NAMECHECK_DIR: &str = ".namecheck";
const HOME_OVERRIDE_VAR: &str = "NAMECHECK_HOME";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: String,
    pub base_url: Option<String>,
    pub model: String,
    pub voice: String,
    pub instructions: Option<String>,
    pub modalities: Vec<String>,
    pub duplicate_calls: DuplicateCallPolicy,
    pub recent_call_capacity: usize,
    pub call_log_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_key: String::new(),
            base_url: None,
            model: "gpt-4o-realtime-preview".to_string(),
            voice: "ash".to_string(),
            instructions: None,
            modalities: DEFAULT_MODALITIES.iter().map(|m| m.to_string()).collect(),
            duplicate_calls: DuplicateCallPolicy::default(),
            recent_call_capacity: DEFAULT_RECENT_CALL_CAPACITY,
            call_log_capacity: DEFAULT_CALL_LOG_CAPACITY,
        }
    }
}

pub fn get_namecheck_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(HOME_OVERRIDE_VAR)
        && !dir.trim().is_empty()
    {
        return PathBuf::from(dir);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(NAMECHECK_DIR)
}

pub fn get_config_path() -> PathBuf {
    get_namecheck_dir().join("config.toml")
}

pub fn ensure_namecheck_dir() -> Result<PathBuf> {
    let dir = get_namecheck_dir();

    if !dir.exists() {
        std::fs::create_dir_all(&dir).with_context(|| {
            format!("Failed to create namecheck directory at {}", dir.display())
        })?;
    }

    Ok(dir)
}

impl Config {
    pub fn load_or_init() -> Result<Self> {
        if config_exists() {
            load_config()
        } else {
            Ok(Config::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config")
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config to TOML")
    }
}

pub fn load_config() -> Result<Config> {
    let config_path = get_config_path();

    let content = std::fs::read_to_string(&config_path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            anyhow::anyhow!(
                "Config file not found. Run 'namecheck onboard' to set up your configuration."
            )
        } else {
            anyhow::anyhow!("Failed to read config from {}: {}", config_path.display(), e)
        }
    })?;

    Config::from_toml(&content)
        .with_context(|| format!("Failed to parse config from {}", config_path.display()))
}

pub fn save_config(config: &Config) -> Result<()> {
    ensure_namecheck_dir()?;

    let config_path = get_config_path();
    let content = config.to_toml()?;

    std::fs::write(&config_path, content)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    Ok(())
}

pub fn config_exists() -> bool {
    get_config_path().exists()
}
