use serde::{Deserialize, Serialize};

/// Client configuration for a Lodestone deployment
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Base URL of the service, e.g. "https://search.example.com"
    pub api_endpoint: String,
    /// Private API key sent as a bearer token
    pub api_key: String,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    #[serde(default)]
    pub insecure_skip_verify: bool,
    #[serde(default)]
    pub ca_cert_path: String,
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_connect_timeout_ms() -> u64 {
    3_000
}

impl ClientConfig {
    pub fn new(api_endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_endpoint: api_endpoint.into(),
            api_key: api_key.into(),
            request_timeout_ms: default_request_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            insecure_skip_verify: false,
            ca_cert_path: String::new(),
        }
    }

    pub fn load(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: ClientConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Endpoint with any trailing slash removed, ready for path concatenation
    pub fn base_url(&self) -> &str {
        self.api_endpoint.trim_end_matches('/')
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:3002", "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: ClientConfig = serde_json::from_str(
            r#"{"api_endpoint":"https://search.example.com/","api_key":"private-key"}"#,
        )
        .unwrap();
        assert_eq!(config.request_timeout_ms, 10_000);
        assert_eq!(config.connect_timeout_ms, 3_000);
        assert!(!config.insecure_skip_verify);
        assert_eq!(config.base_url(), "https://search.example.com");
    }
}
