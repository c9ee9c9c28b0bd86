//! Access log lines
//!
//! The format is chosen once from configuration: `combined`, `common`, `json`,
//! or any other string treated as a `$variable` template.

use chrono::{DateTime, Local};

/// Parsed `logging.access_log_format`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessLogFormat {
    Combined,
    Common,
    Json,
    Template(String),
}

impl From<&str> for AccessLogFormat {
    fn from(name: &str) -> Self {
        match name {
            "combined" => Self::Combined,
            "common" => Self::Common,
            "json" => Self::Json,
            template => Self::Template(template.to_string()),
        }
    }
}

/// One served request
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    pub remote_addr: String,
    pub time: DateTime<Local>,
    pub method: String,
    pub path: String,
    /// Raw query, ignored by routing but kept for the log
    pub query: Option<String>,
    pub http_version: String,
    pub status: u16,
    pub body_bytes: usize,
    /// `asset`, `page`, `fallback` or `not-found`
    pub resolution: &'static str,
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
            body_bytes: 0,
            resolution: "-",
            referer: None,
            user_agent: None,
            request_time_us: 0,
        }
    }

    pub fn render(&self, format: &AccessLogFormat) -> String {
        match format {
            AccessLogFormat::Common => self.clf(),
            AccessLogFormat::Combined => format!(
                "{} \"{}\" \"{}\"",
                self.clf(),
                or_dash(self.referer.as_deref()),
                or_dash(self.user_agent.as_deref()),
            ),
            AccessLogFormat::Json => self.json(),
            AccessLogFormat::Template(template) => self.expand(template),
        }
    }

    fn uri(&self) -> String {
        match &self.query {
            Some(query) => format!("{}?{query}", self.path),
            None => self.path.clone(),
        }
    }

    fn request_line(&self) -> String {
        format!("{} {} HTTP/{}", self.method, self.uri(), self.http_version)
    }

    /// `addr - - [time] "request" status bytes`
    fn clf(&self) -> String {
        format!(
            "{} - - [{}] \"{}\" {} {}",
            self.remote_addr,
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.request_line(),
            self.status,
            self.body_bytes,
        )
    }

    fn json(&self) -> String {
        serde_json::json!({
            "remote_addr": self.remote_addr,
            "time": self.time.to_rfc3339(),
            "method": self.method,
            "path": self.path,
            "query": self.query,
            "http_version": self.http_version,
            "status": self.status,
            "body_bytes": self.body_bytes,
            "resolution": self.resolution,
            "referer": self.referer,
            "user_agent": self.user_agent,
            "request_time_us": self.request_time_us,
        })
        .to_string()
    }

    /// Substitute `$remote_addr`, `$time_local`, `$time_iso8601`, `$request`,
    /// `$request_method`, `$request_uri`, `$request_time` (seconds),
    /// `$resolution`, `$status`, `$body_bytes_sent`, `$http_referer` and
    /// `$http_user_agent`.
    fn expand(&self, template: &str) -> String {
        #[allow(clippy::cast_precision_loss)]
        let seconds = self.request_time_us as f64 / 1_000_000.0;
        // Longer names sharing a prefix go first
        let vars: [(&str, String); 12] = [
            ("$remote_addr", self.remote_addr.clone()),
            ("$time_local", self.time.format("%d/%b/%Y:%H:%M:%S %z").to_string()),
            ("$time_iso8601", self.time.to_rfc3339()),
            ("$request_time", format!("{seconds:.3}")),
            ("$request_method", self.method.clone()),
            ("$request_uri", self.uri()),
            ("$request", self.request_line()),
            ("$resolution", self.resolution.to_string()),
            ("$status", self.status.to_string()),
            ("$body_bytes_sent", self.body_bytes.to_string()),
            ("$http_referer", or_dash(self.referer.as_deref()).to_string()),
            ("$http_user_agent", or_dash(self.user_agent.as_deref()).to_string()),
        ];
        vars.iter()
            .fold(template.to_string(), |line, (name, value)| line.replace(name, value))
    }
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}
