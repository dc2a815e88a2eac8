//! Conditional request support: entity tags and HTTP dates.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::SystemTime;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// IMF-fixdate layout from RFC 9110, the only date format we emit.
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Compute a strong entity tag for a response body.
///
/// The tag is a hash of the content, so it changes whenever the bytes
/// change and stays stable across requests for the same bytes.
pub fn compute_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("\"{:x}\"", hasher.finish())
}

/// Check an `If-None-Match` header against the current entity tag.
///
/// Handles the wildcard form and comma separated tag lists.
pub fn etag_matches(if_none_match: Option<&str>, etag: &str) -> bool {
    let Some(header) = if_none_match else {
        return false;
    };
    if header.trim() == "*" {
        return true;
    }
    header.split(',').any(|candidate| candidate.trim() == etag)
}

/// Format a filesystem timestamp for `Last-Modified`.
pub fn format_http_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).format(HTTP_DATE_FORMAT).to_string()
}

/// Parse an IMF-fixdate string such as `Sun, 06 Nov 1994 08:49:37 GMT`.
///
/// The two obsolete date formats HTTP clients may still send are treated
/// as unparseable, which turns the conditional into a plain request.
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value.trim(), HTTP_DATE_FORMAT)
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Check an `If-Modified-Since` header against a file modification time.
///
/// HTTP dates carry second precision, so the comparison truncates the
/// filesystem timestamp before comparing.
pub fn not_modified_since(if_modified_since: Option<&str>, modified: SystemTime) -> bool {
    let Some(header) = if_modified_since else {
        return false;
    };
    let Some(since) = parse_http_date(header) else {
        return false;
    };
    DateTime::<Utc>::from(modified).timestamp() <= since.timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_etag_is_stable_for_same_content() {
        assert_eq!(compute_etag(b"hello world"), compute_etag(b"hello world"));
    }

    #[test]
    fn test_etag_differs_for_different_content() {
        assert_ne!(compute_etag(b"hello"), compute_etag(b"world"));
    }

    #[test]
    fn test_etag_is_quoted() {
        let etag = compute_etag(b"content");
        assert!(etag.starts_with('"'));
        assert!(etag.ends_with('"'));
    }

    #[test]
    fn test_etag_match_exact() {
        let etag = compute_etag(b"data");
        assert!(etag_matches(Some(&etag), &etag));
    }

    #[test]
    fn test_etag_match_wildcard() {
        assert!(etag_matches(Some("*"), "\"abc\""));
    }

    #[test]
    fn test_etag_match_in_list() {
        assert!(etag_matches(Some("\"aaa\", \"bbb\", \"ccc\""), "\"bbb\""));
        assert!(!etag_matches(Some("\"aaa\", \"bbb\""), "\"zzz\""));
    }

    #[test]
    fn test_etag_no_header_never_matches() {
        assert!(!etag_matches(None, "\"abc\""));
    }

    #[test]
    fn test_http_date_round_trip() {
        let time = SystemTime::UNIX_EPOCH + Duration::from_secs(784_111_777);
        let formatted = format_http_date(time);
        assert_eq!(formatted, "Sun, 06 Nov 1994 08:49:37 GMT");
        let parsed = parse_http_date(&formatted).unwrap();
        assert_eq!(parsed.timestamp(), 784_111_777);
    }

    #[test]
    fn test_obsolete_date_formats_are_rejected() {
        assert!(parse_http_date("Sunday, 06-Nov-94 08:49:37 GMT").is_none());
        assert!(parse_http_date("Sun Nov  6 08:49:37 1994").is_none());
        assert!(parse_http_date("not a date").is_none());
    }

    #[test]
    fn test_not_modified_when_file_is_older() {
        let modified = SystemTime::UNIX_EPOCH + Duration::from_secs(784_111_777);
        assert!(not_modified_since(Some("Sun, 06 Nov 1994 08:49:37 GMT"), modified));
        assert!(not_modified_since(Some("Mon, 07 Nov 1994 00:00:00 GMT"), modified));
    }

    #[test]
    fn test_modified_when_file_is_newer() {
        let modified = SystemTime::UNIX_EPOCH + Duration::from_secs(784_111_778);
        assert!(!not_modified_since(Some("Sun, 06 Nov 1994 08:49:37 GMT"), modified));
    }

    #[test]
    fn test_unparseable_condition_is_ignored() {
        let modified = SystemTime::UNIX_EPOCH;
        assert!(!not_modified_since(Some("garbage"), modified));
        assert!(!not_modified_since(None, modified));
    }
}
