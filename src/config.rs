use crate::error::{config_error, env_error, AppResult, Error};
use chrono_tz::Tz;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;

/// Default log filter when neither `COACHBOOK_LOG` nor `RUST_LOG` is set
pub const DEFAULT_LOG_FILTER: &str = "info,redis=warn";

/// Default Redis connection string
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

/// Optional file with overrides for the environment configuration
pub const CONFIG_FILE: &str = "config/coachbook.toml";

/// Which backing store the data service talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    Redis,
}

impl FromStr for StoreBackend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "redis" => Ok(StoreBackend::Redis),
            other => Err(config_error(&format!("Unknown store backend: {}", other))),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Memory => write!(f, "memory"),
            StoreBackend::Redis => write!(f, "redis"),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backing store for users, availability, sessions and messages
    pub store: StoreBackend,
    /// Redis connection string, used when `store` is `redis`
    pub redis_url: String,
    /// Load the demo coaches and athlete into the store on startup
    pub seed_demo_data: bool,
    /// Timezone used to decide what "today" is
    pub timezone: String,
    /// tracing-subscriber filter directive
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreBackend::Memory,
            redis_url: DEFAULT_REDIS_URL.to_string(),
            seed_demo_data: true,
            timezone: "UTC".to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Values from the config file; anything missing keeps its environment value
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileOverrides {
    store: Option<StoreBackend>,
    redis_url: Option<String>,
    seed_demo_data: Option<bool>,
    timezone: Option<String>,
    log_filter: Option<String>,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let mut config = Self::from_env()?;

        if let Some(content) = read_overrides(Path::new(CONFIG_FILE))? {
            config.apply_overrides(&content)?;
        }

        config.timezone()?;
        Ok(config)
    }

    /// Build a configuration from environment variables only
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();

        let store = match env::var("COACHBOOK_STORE") {
            Ok(value) => value.parse::<StoreBackend>()?,
            Err(_) => defaults.store,
        };

        let seed_demo_data = match env::var("COACHBOOK_SEED_DEMO") {
            Ok(value) => parse_flag(&value).ok_or_else(|| env_error("COACHBOOK_SEED_DEMO"))?,
            Err(_) => defaults.seed_demo_data,
        };

        let redis_url = env::var("REDIS_URL").unwrap_or(defaults.redis_url);
        let timezone = env::var("TIMEZONE").unwrap_or(defaults.timezone);
        let log_filter = env::var("COACHBOOK_LOG").unwrap_or(defaults.log_filter);

        Ok(Config {
            store,
            redis_url,
            seed_demo_data,
            timezone,
            log_filter,
        })
    }

    /// Merge TOML overrides on top of the current values
    pub fn apply_overrides(&mut self, content: &str) -> AppResult<()> {
        let overrides: FileOverrides = toml::from_str(content)?;

        if let Some(store) = overrides.store {
            self.store = store;
        }
        if let Some(redis_url) = overrides.redis_url {
            self.redis_url = redis_url;
        }
        if let Some(seed) = overrides.seed_demo_data {
            self.seed_demo_data = seed;
        }
        if let Some(timezone) = overrides.timezone {
            self.timezone = timezone;
        }
        if let Some(log_filter) = overrides.log_filter {
            self.log_filter = log_filter;
        }

        Ok(())
    }

    /// Parsed timezone
    pub fn timezone(&self) -> AppResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| config_error(&format!("Unknown timezone: {}", self.timezone)))
    }
}

/// Contents of the overrides file; a missing file means no overrides
fn read_overrides(path: &Path) -> AppResult<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
