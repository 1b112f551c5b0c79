//! Google integration settings loaded from environment variables.

pub const DEFAULT_MAPS_BASE_URL: &str = "https://maps.googleapis.com/maps/api";
pub const DEFAULT_CALENDAR_BASE_URL: &str = "https://www.googleapis.com/calendar/v3";
pub const DEFAULT_DOCS_BASE_URL: &str = "https://docs.googleapis.com/v1";

/// Outbound request timeout when `GOOGLE_HTTP_TIMEOUT_SECS` is unset.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    /// Server-side key for the Maps web services. Maps endpoints answer
    /// 503 when unset.
    pub maps_api_key: Option<String>,
    pub maps_base_url: String,
    pub calendar_base_url: String,
    pub docs_base_url: String,
    pub http_timeout_secs: u64,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            maps_api_key: None,
            maps_base_url: DEFAULT_MAPS_BASE_URL.to_string(),
            calendar_base_url: DEFAULT_CALENDAR_BASE_URL.to_string(),
            docs_base_url: DEFAULT_DOCS_BASE_URL.to_string(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl GoogleConfig {
    /// Load from environment variables.
    ///
    /// | Env var                     | Default                                  |
    /// |-----------------------------|------------------------------------------|
    /// | `GOOGLE_MAPS_API_KEY`       | unset (maps disabled)                    |
    /// | `GOOGLE_MAPS_BASE_URL`      | `https://maps.googleapis.com/maps/api`   |
    /// | `GOOGLE_CALENDAR_BASE_URL`  | `https://www.googleapis.com/calendar/v3` |
    /// | `GOOGLE_DOCS_BASE_URL`      | `https://docs.googleapis.com/v1`         |
    /// | `GOOGLE_HTTP_TIMEOUT_SECS`  | `10`                                     |
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let var = |name: &str, default: String| {
            std::env::var(name)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(default)
        };

        Self {
            maps_api_key: std::env::var("GOOGLE_MAPS_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            maps_base_url: var("GOOGLE_MAPS_BASE_URL", defaults.maps_base_url),
            calendar_base_url: var("GOOGLE_CALENDAR_BASE_URL", defaults.calendar_base_url),
            docs_base_url: var("GOOGLE_DOCS_BASE_URL", defaults.docs_base_url),
            http_timeout_secs: std::env::var("GOOGLE_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.http_timeout_secs),
        }
    }

    /// Build the shared HTTP client with the configured timeout.
    pub fn http_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(self.http_timeout_secs))
            .build()
    }
}
