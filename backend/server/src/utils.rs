use std::sync::LazyLock;

use regex::Regex;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Prefixes `https://` unless the url already names an http scheme.
pub fn normalize_website(website: &str) -> String {
    if website.starts_with("http://") || website.starts_with("https://") {
        website.to_string()
    } else {
        format!("https://{website}")
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adds_scheme() {
        assert_eq!(normalize_website("foo.com"), "https://foo.com");
        assert_eq!(normalize_website("www.foo.com/path"), "https://www.foo.com/path");
    }

    #[test]
    fn test_keeps_scheme() {
        assert_eq!(normalize_website("http://foo.com"), "http://foo.com");
        assert_eq!(normalize_website("https://foo.com"), "https://foo.com");
    }

    #[test]
    fn test_scheme_check_is_exact() {
        assert_eq!(normalize_website("HTTPS://foo.com"), "https://HTTPS://foo.com");
        assert_eq!(normalize_website("ftp://foo.com"), "https://ftp://foo.com");
    }

    #[test]
    fn test_email() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last+tag@example.co.uk"));

        assert!(!is_valid_email(""));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("@b.com"));
    }
}
