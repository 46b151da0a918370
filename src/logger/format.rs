//! Access log format module
//!
//! Supports:
//! - `combined` (Apache/Nginx combined format)
//! - `common` (Common Log Format)
//! - `json` (one JSON object per line)
//!
//! Unknown format names fall back to `combined`.

use chrono::{DateTime, Local};

/// One served request
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    pub remote_addr: String,
    pub time: DateTime<Local>,
    pub method: String,
    pub path: String,
    /// Query string without the leading `?`
    pub query: Option<String>,
    pub http_version: String,
    pub status: u16,
    /// `Content-Length` of the response, if known
    pub body_bytes: Option<u64>,
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
            status: 200,
            body_bytes: None,
            referer: None,
            user_agent: None,
            request_time_us: 0,
        }
    }

    pub fn format(&self, format: &str) -> String {
        match format {
            "common" => self.format_common(),
            "json" => self.format_json(),
            _ => self.format_combined(),
        }
    }

    fn request_uri(&self) -> String {
        match &self.query {
            Some(q) => format!("{}?{q}", self.path),
            None => self.path.clone(),
        }
    }

    fn bytes_field(&self) -> String {
        self.body_bytes
            .map_or_else(|| "-".to_string(), |b| b.to_string())
    }

    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent`
    fn format_common(&self) -> String {
        format!(
            "{} - - [{}] \"{} {} HTTP/{}\" {} {}",
            self.remote_addr,
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.method,
            self.request_uri(),
            self.http_version,
            self.status,
            self.bytes_field(),
        )
    }

    /// Common format plus `"$http_referer" "$http_user_agent"`
    fn format_combined(&self) -> String {
        format!(
            "{} \"{}\" \"{}\"",
            self.format_common(),
            self.referer.as_deref().unwrap_or("-"),
            self.user_agent.as_deref().unwrap_or("-"),
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
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_entry() -> AccessLogEntry {
        let mut entry = AccessLogEntry::new(
            "192.168.1.1".to_string(),
            "POST".to_string(),
            "/echo".to_string(),
        );
        entry.query = Some("page=1".to_string());
        entry.status = 201;
        entry.body_bytes = Some(7);
        entry.referer = Some("https://example.com".to_string());
        entry.user_agent = Some("curl/8.0".to_string());
        entry.request_time_us = 1500;
        entry
    }

    #[test]
    fn test_format_combined() {
        let log = create_test_entry().format("combined");
        assert!(log.starts_with("192.168.1.1 - - ["));
        assert!(log.contains("\"POST /echo?page=1 HTTP/1.1\" 201 7"));
        assert!(log.ends_with("\"https://example.com\" \"curl/8.0\""));
    }

    #[test]
    fn test_format_common() {
        let mut entry = create_test_entry();
        entry.body_bytes = None;
        let log = entry.format("common");
        assert!(log.ends_with("\"POST /echo?page=1 HTTP/1.1\" 201 -"));
        assert!(!log.contains("curl/8.0"));
    }

    #[test]
    fn test_format_json() {
        let log = create_test_entry().format("json");
        let value: serde_json::Value = serde_json::from_str(&log).unwrap();
        assert_eq!(value["method"], "POST");
        assert_eq!(value["status"], 201);
        assert_eq!(value["body_bytes"], 7);
        assert_eq!(value["query"], "page=1");
    }

    #[test]
    fn test_unknown_format_is_combined() {
        let entry = create_test_entry();
        assert_eq!(entry.format("fancy"), entry.format("combined"));
    }
}
