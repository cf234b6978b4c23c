use crate::errors::ConfigError;
use discover_model::Width;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

fn default_threads() -> usize {
    4
}

fn default_expire_after() -> u64 {
    60 * 60 * 24 * 30
}

fn default_number_per_year() -> i64 {
    -1
}

fn default_number_per_page() -> usize {
    100
}

fn default_redis_port() -> u16 {
    6379
}

fn default_redis_db() -> u8 {
    0
}

fn default_statsd_host() -> String {
    "127.0.0.1".to_string()
}

fn default_statsd_port() -> u16 {
    8125
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimhashConfig {
    pub size: u32,
    #[serde(default = "default_expire_after")]
    pub expire_after: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotsConfig {
    #[serde(default = "default_number_per_year")]
    pub number_per_year: i64,
    #[serde(default = "default_number_per_page")]
    pub number_per_page: usize,
}

impl Default for SnapshotsConfig {
    fn default() -> Self {
        SnapshotsConfig { number_per_year: default_number_per_year(), number_per_page: default_number_per_page() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub host: String,
    #[serde(default = "default_redis_port")]
    pub port: u16,
    #[serde(default = "default_redis_db")]
    pub db: u8,
}

impl RedisConfig {
    pub fn url(&self) -> String {
        format!("redis://{}:{}/{}", self.host, self.port, self.db)
    }
}

/// Task queue connection parameters. The original's broker/result-backend
/// URLs have no counterpart here since the queue is in-process (see
/// `discover-queue`); kept so a `conf.yml` written for the original service
/// still parses without complaint.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CeleryConfig {
    pub broker_url: Option<String>,
    pub backend_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatsdConfig {
    #[serde(default = "default_statsd_host")]
    pub host: String,
    #[serde(default = "default_statsd_port")]
    pub port: u16,
}

impl Default for StatsdConfig {
    fn default() -> Self {
        StatsdConfig { host: default_statsd_host(), port: default_statsd_port() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub simhash: SimhashConfig,
    #[serde(default)]
    pub snapshots: SnapshotsConfig,
    #[serde(default = "default_threads")]
    pub threads: usize,
    pub redis: RedisConfig,
    #[serde(default)]
    pub celery: CeleryConfig,
    #[serde(default)]
    pub cors: Vec<String>,
    #[serde(default)]
    pub cdx_auth_token: Option<String>,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub statsd: StatsdConfig,
}

impl Config {
    /// Loads from `WAYBACK_DISCOVER_DIFF_CONF` if set, otherwise `./conf.yml`.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("WAYBACK_DISCOVER_DIFF_CONF").unwrap_or_else(|_| "conf.yml".to_string());
        Self::load_from_file(Path::new(&path))
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.display().to_string(), source })?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        Width::from_bits(self.simhash.size)?;
        if self.threads == 0 {
            return Err(ConfigError::ZeroThreads);
        }
        if self.snapshots.number_per_page == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        Ok(())
    }

    pub fn fingerprint_width(&self) -> Width {
        Width::from_bits(self.simhash.size).expect("validated at load time")
    }

    pub fn simhash_expire_after(&self) -> Duration {
        Duration::from_secs(self.simhash.expire_after)
    }

    pub fn snapshots_per_year(&self) -> Option<u32> {
        if self.snapshots.number_per_year < 0 {
            None
        } else {
            Some(self.snapshots.number_per_year as u32)
        }
    }
}
