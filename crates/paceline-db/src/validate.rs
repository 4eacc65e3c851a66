//! Validation helpers for request inputs.

use std::sync::OnceLock;

/// Best-effort email validation.
///
/// This is intentionally not fully RFC-compliant; it rejects the obviously
/// malformed without chasing the grammar's corner cases.
pub fn is_email(s: &str) -> bool {
    static EMAIL_RE: OnceLock<regex::Regex> = OnceLock::new();
    EMAIL_RE
        .get_or_init(|| {
            regex::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid built-in email regex")
        })
        .is_match(s)
}

/// Strict ISO-8601 date-time with mandatory timezone.
///
/// Accepts `YYYY-MM-DDTHH:MM:SS[.f]Z` or a `±HH:MM` offset, and validates
/// calendar rules including leap-day handling. Used for filter values, where
/// a non-matching string means "no constraint" rather than an error.
pub fn is_strict_iso8601(s: &str) -> bool {
    static ISO8601_RE: OnceLock<regex::Regex> = OnceLock::new();
    ISO8601_RE
        .get_or_init(|| {
            regex::Regex::new(
                r"^(?:[1-9]\d{3}-(?:(?:0[1-9]|1[0-2])-(?:0[1-9]|1\d|2[0-8])|(?:0[13-9]|1[0-2])-(?:29|30)|(?:0[13578]|1[02])-31)|(?:[1-9]\d(?:0[48]|[2468][048]|[13579][26])|(?:[2468][048]|[13579][26])00)-02-29)T(?:[01]\d|2[0-3]):[0-5]\d:[0-5]\d(?:\.\d{1,9})?(?:Z|[+-][01]\d:[0-5]\d)$",
            )
            .expect("invalid built-in iso8601 regex")
        })
        .is_match(s)
}

/// URI validation for profile image links: must parse and carry a dotted
/// hostname.
pub fn is_uri_with_host(s: &str) -> bool {
    match url::Url::parse(s) {
        Ok(parsed) => parsed.host_str().is_some_and(|h| h.contains('.')),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_accepts_plain_addresses() {
        assert!(is_email("ada@example.com"));
        assert!(is_email("a.b+c@sub.domain.org"));
    }

    #[test]
    fn email_rejects_malformed_addresses() {
        assert!(!is_email("not-an-email"));
        assert!(!is_email("missing@tld"));
        assert!(!is_email("two@@example.com"));
        assert!(!is_email("spaced @example.com"));
    }

    #[test]
    fn iso8601_requires_timezone() {
        assert!(is_strict_iso8601("2024-03-10T08:30:00Z"));
        assert!(is_strict_iso8601("2024-03-10T08:30:00.123+07:00"));
        assert!(!is_strict_iso8601("2024-03-10T08:30:00"));
        assert!(!is_strict_iso8601("2024-03-10"));
    }

    #[test]
    fn iso8601_validates_calendar_rules() {
        assert!(is_strict_iso8601("2024-02-29T00:00:00Z"));
        assert!(!is_strict_iso8601("2023-02-29T00:00:00Z"));
        assert!(!is_strict_iso8601("2024-13-01T00:00:00Z"));
        assert!(!is_strict_iso8601("2024-04-31T00:00:00Z"));
        assert!(!is_strict_iso8601("2024-03-10T24:00:00Z"));
    }

    #[test]
    fn uri_needs_a_dotted_host() {
        assert!(is_uri_with_host("https://cdn.example.com/avatar.png"));
        assert!(is_uri_with_host("http://example.com"));
        assert!(!is_uri_with_host("https://localhost/avatar.png"));
        assert!(!is_uri_with_host("notaurl"));
        assert!(!is_uri_with_host("mailto:someone"));
    }
}
