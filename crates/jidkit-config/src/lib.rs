use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use jidkit_core::{BareJidCache, JidPrep, PrepProfile, DEFAULT_CACHE_CAPACITY};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

const APP_DIR: &str = "jidkit";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_PROFILE: PrepProfile = PrepProfile::Basic;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub stringprep: PrepProfile,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    pub enabled: bool,
    pub capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            stringprep: DEFAULT_PROFILE,
            cache: CacheConfig {
                enabled: false,
                capacity: DEFAULT_CACHE_CAPACITY,
            },
        }
    }
}

impl AppConfig {
    /// The strategy every strict constructor in this process should use.
    pub fn prep(&self) -> JidPrep {
        self.stringprep.build()
    }

    pub fn cache(&self, prep: &JidPrep) -> Option<BareJidCache> {
        self.cache
            .enabled
            .then(|| BareJidCache::new(prep.clone(), self.cache.capacity))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("invalid cache capacity: {0}")]
    InvalidCacheCapacity(usize),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    stringprep: Option<PrepProfile>,
    cache: Option<CacheFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CacheFile {
    enabled: Option<bool>,
    capacity: Option<usize>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => {
            debug!(path = %path.display(), "config missing, using defaults");
            Ok(AppConfig::default())
        }
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "config loaded");
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(profile) = parsed.stringprep {
        config.stringprep = profile;
    }

    if let Some(cache) = parsed.cache {
        if let Some(enabled) = cache.enabled {
            config.cache.enabled = enabled;
        }
        if let Some(capacity) = cache.capacity {
            config.cache.capacity = capacity;
        }
    }

    if config.cache.enabled && config.cache.capacity == 0 {
        return Err(ConfigError::InvalidCacheCapacity(config.cache.capacity));
    }

    Ok(config)
}
