use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read { path: String, #[source] source: std::io::Error },

    #[error("failed to parse config YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid simhash.size: {0}")]
    InvalidWidth(#[from] discover_model::ModelError),

    #[error("threads must be at least 1")]
    ZeroThreads,

    #[error("snapshots.number_per_page must be at least 1")]
    ZeroPageSize,
}
