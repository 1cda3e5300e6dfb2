//! Build-time configuration of the browser bundle.
//!
//! A static bundle has no process environment at runtime, so values are
//! captured when the crate is compiled (`FORGEPOS_API_URL=... trunk build`).

/// Front-end configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebConfig {
    /// Base URL of the point-of-sale API (no trailing slash).
    pub api_url: String,
    /// Tracing filter directives for the console logger.
    pub log_filter: String,
}

impl WebConfig {
    pub const DEFAULT_API_URL: &'static str = "http://localhost:8080";

    /// Configuration captured from `FORGEPOS_API_URL` and `FORGEPOS_LOG`.
    pub fn from_env() -> Self {
        Self::from_values(option_env!("FORGEPOS_API_URL"), option_env!("FORGEPOS_LOG"))
    }

    pub fn from_values(api_url: Option<&str>, log_filter: Option<&str>) -> Self {
        let api_url = api_url
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .unwrap_or(Self::DEFAULT_API_URL);
        let log_filter = log_filter
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .unwrap_or(forgepos_observability::DEFAULT_FILTER);

        Self {
            api_url: api_url.to_string(),
            log_filter: log_filter.to_string(),
        }
    }

    pub fn login_url(&self) -> String {
        format!("{}/login", self.api_url)
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self::from_values(None, None)
    }
}
