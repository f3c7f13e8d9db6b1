/// Backend route configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiConfig {
    base_url: String,
    /// Serve requests from the local mock database when the backend cannot
    /// be reached at all.
    offline_fallback: bool,
    mock_latency_ms: u32,
}

pub const DEFAULT_API_URL: &str = "http://localhost:3001";
pub const DEFAULT_MOCK_LATENCY_MS: u32 = 600;

impl Default for ApiConfig {
    /// Local development backend with the offline fallback on.  Used by tests
    /// and by early start-up code that runs before `init_api_config()`.
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            offline_fallback: true,
            mock_latency_ms: DEFAULT_MOCK_LATENCY_MS,
        }
    }
}

impl ApiConfig {
    /// Build-time configuration from `FLOW_API_URL` and
    /// `FLOW_OFFLINE_FALLBACK`.  Both are optional.
    pub fn new() -> Self {
        Self::from_parts(option_env!("FLOW_API_URL"), option_env!("FLOW_OFFLINE_FALLBACK"))
    }

    pub fn from_parts(url: Option<&str>, offline_fallback: Option<&str>) -> Self {
        let base = url
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or(DEFAULT_API_URL);
        let fallback = match offline_fallback.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) => !(v == "0" || v == "false"),
            None => true,
        };
        Self {
            base_url: base.trim_end_matches('/').to_string(),
            offline_fallback: fallback,
            mock_latency_ms: DEFAULT_MOCK_LATENCY_MS,
        }
    }

    /// Keeps the fallback settings of `self` and only swaps the URL.
    pub fn with_url(&self, url: &str) -> Self {
        Self {
            base_url: url.trim().trim_end_matches('/').to_string(),
            ..self.clone()
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn offline_fallback(&self) -> bool {
        self.offline_fallback
    }

    pub fn mock_latency_ms(&self) -> u32 {
        self.mock_latency_ms
    }

    /// Full URL for an endpoint path such as `/bots/b1/flow`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_backend_with_fallback() {
        let cfg = ApiConfig::from_parts(None, None);
        assert_eq!(cfg.base_url(), "http://localhost:3001");
        assert!(cfg.offline_fallback());
        assert_eq!(cfg.mock_latency_ms(), 600);
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let cfg = ApiConfig::from_parts(Some("https://api.example.com/"), None);
        assert_eq!(cfg.url("/bots"), "https://api.example.com/bots");
    }

    #[test]
    fn fallback_can_be_disabled() {
        assert!(!ApiConfig::from_parts(None, Some("0")).offline_fallback());
        assert!(!ApiConfig::from_parts(None, Some("FALSE")).offline_fallback());
        assert!(ApiConfig::from_parts(None, Some("yes")).offline_fallback());
    }

    #[test]
    fn with_url_keeps_fallback_setting() {
        let cfg = ApiConfig::from_parts(None, Some("false")).with_url("http://10.0.0.2:3001/");
        assert_eq!(cfg.base_url(), "http://10.0.0.2:3001");
        assert!(!cfg.offline_fallback());
    }
}
