//! Access log line formatting.
//!
//! Supports the classic `combined` and `common` layouts, structured
//! `json` lines, and free-form patterns with `$variable` placeholders.

use chrono::{DateTime, Local};

/// One completed request, collected by the handler for the access log.
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    pub remote_addr: String,
    pub time: DateTime<Local>,
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub http_version: String,
    pub status: u16,
    pub body_bytes: usize,
    pub referer: Option<String>,
    pub user_agent: Option<String>,
    pub request_time_us: u64,
}

impl AccessLogEntry {
    pub fn new(remote_addr: String, method: String, path: String) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            method,
            path,
            query: None,
            http_version: "1.1".to_string(),
            status: 0,
            body_bytes: 0,
            referer: None,
            user_agent: None,
            request_time_us: 0,
        }
    }

    /// Render the entry in the named format. Anything that is not a
    /// built-in format name is treated as a `$variable` pattern.
    pub fn format(&self, format_name: &str) -> String {
        match format_name {
            "common" => self.format_common(),
            "json" => self.format_json(),
            "combined" => self.format_combined(),
            pattern => self.format_custom(pattern),
        }
    }

    fn time_local(&self) -> String {
        self.time.format("%d/%b/%Y:%H:%M:%S %z").to_string()
    }

    fn request_line(&self) -> String {
        let query = self
            .query
            .as_ref()
            .map(|q| format!("?{q}"))
            .unwrap_or_default();
        format!("{} {}{} HTTP/{}", self.method, self.path, query, self.http_version)
    }

    fn format_combined(&self) -> String {
        format!(
            "{} - - [{}] \"{}\" {} {} \"{}\" \"{}\"",
            self.remote_addr,
            self.time_local(),
            self.request_line(),
            self.status,
            self.body_bytes,
            self.referer.as_deref().unwrap_or("-"),
            self.user_agent.as_deref().unwrap_or("-"),
        )
    }

    fn format_common(&self) -> String {
        format!(
            "{} - - [{}] \"{}\" {} {}",
            self.remote_addr,
            self.time_local(),
            self.request_line(),
            self.status,
            self.body_bytes,
        )
    }

    fn format_json(&self) -> String {
        serde_json::json!({
            "remote_addr": self.remote_addr,
            "time": self.time.to_rfc3339(),
            "method": self.method,
            "path": self.path,
            "query": self.query,
            "http_version": self.http_version,
            "status": self.status,
            "body_bytes": self.body_bytes,
            "referer": self.referer,
            "user_agent": self.user_agent,
            "request_time_us": self.request_time_us,
        })
        .to_string()
    }

    // Longer names must be substituted before their prefixes, e.g.
    // $request_time_us before $request.
    fn format_custom(&self, pattern: &str) -> String {
        pattern
            .replace("$request_time_us", &self.request_time_us.to_string())
            .replace("$request", &self.request_line())
            .replace("$remote_addr", &self.remote_addr)
            .replace("$time_local", &self.time_local())
            .replace("$method", &self.method)
            .replace("$path", &self.path)
            .replace("$query", self.query.as_deref().unwrap_or(""))
            .replace("$http_version", &self.http_version)
            .replace("$status", &self.status.to_string())
            .replace("$body_bytes", &self.body_bytes.to_string())
            .replace("$http_referer", self.referer.as_deref().unwrap_or("-"))
            .replace("$http_user_agent", self.user_agent.as_deref().unwrap_or("-"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> AccessLogEntry {
        let mut entry = AccessLogEntry::new(
            "192.168.1.10".to_string(),
            "GET".to_string(),
            "/app.js".to_string(),
        );
        entry.query = Some("v=3".to_string());
        entry.status = 200;
        entry.body_bytes = 1423;
        entry.referer = Some("https://example.com/".to_string());
        entry.user_agent = Some("Mozilla/5.0 (X11; Linux x86_64)".to_string());
        entry.request_time_us = 187;
        entry
    }

    #[test]
    fn test_combined_format() {
        let line = sample_entry().format("combined");
        assert!(line.starts_with("192.168.1.10 - - ["));
        assert!(line.contains("\"GET /app.js?v=3 HTTP/1.1\" 200 1423"));
        assert!(line.ends_with("\"https://example.com/\" \"Mozilla/5.0 (X11; Linux x86_64)\""));
    }

    #[test]
    fn test_common_format_omits_headers() {
        let line = sample_entry().format("common");
        assert!(line.ends_with("\"GET /app.js?v=3 HTTP/1.1\" 200 1423"));
        assert!(!line.contains("Mozilla"));
    }

    #[test]
    fn test_missing_headers_render_as_dash() {
        let mut entry = sample_entry();
        entry.referer = None;
        entry.user_agent = None;
        let line = entry.format("combined");
        assert!(line.ends_with("\"-\" \"-\""));
    }

    #[test]
    fn test_json_format_is_valid_json() {
        let line = sample_entry().format("json");
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["remote_addr"], "192.168.1.10");
        assert_eq!(value["status"], 200);
        assert_eq!(value["body_bytes"], 1423);
        assert_eq!(value["query"], "v=3");
    }

    #[test]
    fn test_json_format_escapes_header_values() {
        let mut entry = sample_entry();
        entry.user_agent = Some("quoted \"agent\"".to_string());
        let value: serde_json::Value = serde_json::from_str(&entry.format("json")).unwrap();
        assert_eq!(value["user_agent"], "quoted \"agent\"");
    }

    #[test]
    fn test_custom_pattern_substitution() {
        let line = sample_entry().format("$method $path -> $status in $request_time_us us");
        assert_eq!(line, "GET /app.js -> 200 in 187 us");
    }

    #[test]
    fn test_custom_pattern_full_request_line() {
        let line = sample_entry().format("$request");
        assert_eq!(line, "GET /app.js?v=3 HTTP/1.1");
    }

    #[test]
    fn test_request_line_without_query() {
        let mut entry = sample_entry();
        entry.query = None;
        assert_eq!(entry.format("$request"), "GET /app.js HTTP/1.1");
    }
}
