// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use log::LevelFilter;

use super::consts::*;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppOptions {
    pub api: ApiOptions,
    pub maps: MapsOptions,
    pub log: LogOptions,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiOptions {
    /// Base URL without trailing slash, e.g. `http://localhost:8000/api`
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiOptions {
    fn default() -> Self {
        Self {
            base_url: s!(DEFAULT_API_URL),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapsOptions {
    /// Google Maps credential. `None` disables the location card's map.
    pub api_key: Option<String>,
    pub geocode_url: String,
    pub static_map_url: String,
}

impl Default for MapsOptions {
    fn default() -> Self {
        Self {
            api_key: None,
            geocode_url: s!(GEOCODE_URL),
            static_map_url: s!(STATIC_MAP_URL),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogOptions {
    pub level: LevelFilter,
    pub file: Option<PathBuf>,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self { level: LevelFilter::Info, file: None }
    }
}

impl LogOptions {
    /// Logging is set up before the rest of the options are read, so it
    /// has its own entry point.
    pub fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut log = Self::default();
        if let Some(raw) = first(lookup, &[ENV_LOG_LEVEL]) {
            match raw.parse::<LevelFilter>() {
                Ok(level) => log.level = level,
                Err(_) => logw!("Config: Unknown log level {:?}", raw),
            }
        }
        log.file = first(lookup, &[ENV_LOG_FILE]).map(PathBuf::from);
        log
    }

    pub fn from_env() -> Self {
        Self::from_lookup(&|key: &str| std::env::var(key).ok())
    }
}

impl AppOptions {
    /// Read options from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build options from any key → value source. Unknown or invalid
    /// values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self {
            log: LogOptions::from_lookup(&lookup),
            ..Self::default()
        };

        if let Some(url) = first(&lookup, ENV_API_URL) {
            opts.api.base_url = normalize_base_url(&url);
        }

        if let Some(raw) = first(&lookup, &[ENV_TIMEOUT]) {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => opts.api.timeout = Duration::from_secs(secs),
                _ => logw!(
                    "Config: Ignoring {}={:?}, using {}s",
                    ENV_TIMEOUT, raw, DEFAULT_TIMEOUT_SECS
                ),
            }
        }

        opts.maps.api_key = first(&lookup, ENV_MAPS_KEY);
        opts
    }

    pub fn has_maps_key(&self) -> bool {
        self.maps.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

/// First non-blank value among `keys`, trimmed.
fn first<F>(lookup: &F, keys: &[&str]) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    keys.iter()
        .filter_map(|k| lookup(k))
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
