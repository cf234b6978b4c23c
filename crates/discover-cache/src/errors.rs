use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("cache connection failed: {0}")]
    Connection(#[source] redis::RedisError),

    #[error("cache command failed: {0}")]
    Command(#[from] redis::RedisError),
}
