use regex::Regex;
use std::sync::OnceLock;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_.+-]+@[A-Za-z0-9-]+\.[A-Za-z0-9-.]+$").expect("static pattern is valid")
    })
}

/// Rejects empty strings, email addresses, and anything whose host has no
/// non-empty registered domain and public suffix (spec §6 URL validation).
pub fn url_is_valid(url: &str) -> bool {
    if url.trim().is_empty() {
        return false;
    }
    if email_pattern().is_match(url) {
        return false;
    }
    let host = match discover_model::parse_lenient(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => host.to_string(),
            None => return false,
        },
        Err(_) => return false,
    };
    has_registered_domain_and_suffix(&host)
}

fn has_registered_domain_and_suffix(host: &str) -> bool {
    match addr::parse_domain_name(host) {
        Ok(name) => {
            let suffix = name.suffix();
            match name.root() {
                Some(root) => !suffix.is_empty() && root.len() > suffix.len() + 1,
                None => false,
            }
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_bare_host() {
        assert!(url_is_valid("example.com"));
    }

    #[test]
    fn accepts_a_full_url() {
        assert!(url_is_valid("https://www.example.com/some/path"));
    }

    #[test]
    fn rejects_empty() {
        assert!(!url_is_valid(""));
    }

    #[test]
    fn rejects_an_email_address() {
        assert!(!url_is_valid("person@example.com"));
    }

    #[test]
    fn rejects_a_bare_public_suffix() {
        assert!(!url_is_valid("co.uk"));
    }
}
