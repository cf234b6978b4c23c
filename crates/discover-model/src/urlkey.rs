use crate::error::ModelError;
use std::fmt;
use url::Url;

/// Deterministic canonicalization of a URL, used as the outer cache key.
///
/// Loosely follows SURT (Sort-friendly URI Reordering Transform): the host is
/// reversed into dotted-label order and the scheme is dropped, so that
/// `http://Example.com/a/` and `example.com/a` collapse onto the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UrlKey(String);

impl UrlKey {
    pub fn from_url(raw: &str) -> Result<Self, ModelError> {
        let parsed = parse_lenient(raw)?;
        let host = parsed
            .host_str()
            .ok_or_else(|| ModelError::InvalidUrl(raw.to_string()))?
            .to_ascii_lowercase();

        let mut reversed_host: Vec<&str> = host.split('.').collect();
        reversed_host.reverse();
        let mut key = reversed_host.join(",");
        key.push(')');

        if let Some(port) = parsed.port() {
            key.push_str(&format!(":{port}"));
        }

        let mut path = parsed.path().to_string();
        if path.len() > 1 && path.ends_with('/') {
            path.pop();
        }
        key.push_str(&path);

        if let Some(query) = parsed.query() {
            if !query.is_empty() {
                key.push('?');
                key.push_str(query);
            }
        }

        Ok(UrlKey(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UrlKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parses a URL the way the rest of the system expects callers to supply
/// one: a bare `example.com/path` is just as valid as a fully qualified
/// `https://example.com/path`.
pub fn parse_lenient(raw: &str) -> Result<Url, ModelError> {
    if raw.trim().is_empty() {
        return Err(ModelError::InvalidUrl(raw.to_string()));
    }
    match Url::parse(raw) {
        Ok(url) => Ok(url),
        Err(_) => Url::parse(&format!("http://{raw}"))
            .map_err(|_| ModelError::InvalidUrl(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_and_trailing_slash_collapse() {
        let a = UrlKey::from_url("http://Example.com/Path/").unwrap();
        let b = UrlKey::from_url("example.com/Path").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn scheme_is_insensitive() {
        let a = UrlKey::from_url("https://example.com/x").unwrap();
        let b = UrlKey::from_url("HTTP://example.com/x").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn host_is_reversed() {
        let key = UrlKey::from_url("http://www.example.com/").unwrap();
        assert_eq!(key.as_str(), "com,example,www)");
    }

    #[test]
    fn rejects_empty() {
        assert!(UrlKey::from_url("").is_err());
    }
}
