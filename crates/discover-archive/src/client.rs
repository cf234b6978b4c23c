use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use std::time::Duration;

const USER_AGENT: &str = "wayback-discover-diff/1.0";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

pub const DEFAULT_TIMEMAP_BASE: &str = "http://web.archive.org/cdx/search/cdx";
pub const DEFAULT_CAPTURE_BASE: &str = "http://web.archive.org/web";

/// Shared, thread-safe HTTP pool used for both timemap queries and capture
/// downloads. A single pool keeps connections warm across an entire job.
#[derive(Clone)]
pub struct ArchivePool {
    pub(crate) http: reqwest::Client,
    pub(crate) timemap_base: String,
    pub(crate) capture_base: String,
}

impl ArchivePool {
    pub fn new(max_pool_size: usize, cdx_auth_token: Option<&str>) -> Self {
        Self::with_bases(max_pool_size, cdx_auth_token, DEFAULT_TIMEMAP_BASE, DEFAULT_CAPTURE_BASE)
    }

    /// Like [`ArchivePool::new`] but pointed at arbitrary base URLs, so
    /// integration tests can substitute a local mock server.
    pub fn with_bases(
        max_pool_size: usize,
        cdx_auth_token: Option<&str>,
        timemap_base: impl Into<String>,
        capture_base: impl Into<String>,
    ) -> Self {
        let mut headers = HeaderMap::new();
        if let Some(token) = cdx_auth_token {
            if let Ok(value) = HeaderValue::from_str(&format!("cdx_auth_token={token}")) {
                headers.insert(COOKIE, value);
            }
        }

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .pool_max_idle_per_host(max_pool_size)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("archive HTTP client configuration is always valid");

        ArchivePool {
            http,
            timemap_base: timemap_base.into(),
            capture_base: capture_base.into(),
        }
    }
}

/// Retries a transport-level request up to `max_retries` additional times.
/// Only transport failures are retried; HTTP error statuses are returned to
/// the caller to interpret (some are meaningful, e.g. a 404 capture).
pub(crate) async fn send_with_retries<F, Fut>(
    max_retries: u32,
    mut request: F,
) -> Result<reqwest::Response, reqwest::Error>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
{
    let mut attempt = 0;
    loop {
        match request().await {
            Ok(response) => return Ok(response),
            Err(err) => {
                if attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
            }
        }
    }
}
