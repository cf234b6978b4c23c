//! YAML-backed service configuration, loaded once at startup and passed by
//! reference into the cache, runner, queue and telemetry layers.

mod config;
mod errors;

pub use config::{CeleryConfig, Config, LoggingConfig, RedisConfig, SimhashConfig, SnapshotsConfig, StatsdConfig};
pub use errors::ConfigError;

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_yaml() -> &'static str {
        r#"
simhash:
  size: 64
  expire_after: 2592000
snapshots:
  number_per_year: -1
  number_per_page: 100
threads: 4
redis:
  host: 127.0.0.1
  port: 6379
  db: 0
cors:
  - "https://web.archive.org"
statsd:
  host: 127.0.0.1
  port: 8125
"#
    }

    #[test]
    fn loads_a_complete_config() {
        let config = Config::parse(sample_yaml()).unwrap();
        assert_eq!(config.threads, 4);
        assert_eq!(config.redis.url(), "redis://127.0.0.1:6379/0");
        assert_eq!(config.snapshots_per_year(), None);
        assert_eq!(config.cors, vec!["https://web.archive.org".to_string()]);
    }

    #[test]
    fn fills_in_defaults_for_omitted_blocks() {
        let yaml = r#"
simhash:
  size: 128
redis:
  host: cache.internal
"#;
        let config = Config::parse(yaml).unwrap();
        assert_eq!(config.threads, 4);
        assert_eq!(config.snapshots.number_per_page, 100);
        assert_eq!(config.statsd.port, 8125);
    }

    #[test]
    fn rejects_an_invalid_simhash_width() {
        let yaml = r#"
simhash:
  size: 100
redis:
  host: 127.0.0.1
"#;
        let err = Config::parse(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWidth(_)));
    }

    #[test]
    fn rejects_zero_threads() {
        let yaml = r#"
simhash:
  size: 64
threads: 0
redis:
  host: 127.0.0.1
"#;
        let err = Config::parse(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroThreads));
    }

    #[test]
    fn rejects_malformed_yaml() {
        let err = Config::parse("not: [valid").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_from_file_reads_a_real_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf.yml");
        std::fs::write(&path, sample_yaml()).unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.simhash.size, 64);
    }

    #[test]
    fn load_from_file_reports_a_missing_path() {
        let err = Config::load_from_file(std::path::Path::new("/nonexistent/conf.yml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
