//! Configuration model loaded from external sources.

use std::time::Duration;

use serde::Deserialize;

use crate::domain::query::DEFAULT_PAGE_SIZE;

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_search_debounce_ms() -> u64 {
    300
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

#[derive(Clone, Debug, Deserialize)]
/// Settings for talking to the employee service.
pub struct DirectoryConfig {
    /// Base URL of the employee API, e.g. `http://localhost:8080/api`.
    pub api_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Quiet period before a name search is sent.
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
}

impl DirectoryConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            request_timeout_secs: default_request_timeout_secs(),
            search_debounce_ms: default_search_debounce_ms(),
            default_page_size: default_page_size(),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Checks values serde cannot: the API URL must be an absolute http(s)
    /// URL and the page size must be positive.
    pub fn validate(&self) -> Result<(), String> {
        let url = reqwest::Url::parse(self.api_url.trim())
            .map_err(|err| format!("invalid api_url {:?}: {err}", self.api_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!("api_url must use http or https, got {}", url.scheme()));
        }
        if self.default_page_size == 0 {
            return Err("default_page_size must be greater than zero".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_defaults() {
        let config: DirectoryConfig =
            serde_json::from_str(r#"{"api_url":"http://localhost:8080/api"}"#).unwrap();

        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.search_debounce(), Duration::from_millis(300));
        assert_eq!(config.default_page_size, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn api_url_is_required() {
        let result = serde_json::from_str::<DirectoryConfig>(r#"{"request_timeout_secs":5}"#);
        assert!(result.is_err());
    }

    #[cfg(feature = "console")]
    #[test]
    fn shipped_defaults_require_an_api_url() {
        let defaults = || {
            config::Config::builder()
                .add_source(config::File::with_name("config/default"))
        };

        let missing = defaults().build().unwrap();
        assert!(missing.try_deserialize::<DirectoryConfig>().is_err());

        let provided = defaults()
            .set_override("api_url", "https://example.com/api")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize::<DirectoryConfig>()
            .unwrap();
        assert_eq!(provided.default_page_size, 5);
        assert!(provided.validate().is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(DirectoryConfig::new("not a url").validate().is_err());
        assert!(DirectoryConfig::new("ftp://example.com").validate().is_err());

        let mut config = DirectoryConfig::new("https://example.com/api");
        config.default_page_size = 0;
        assert!(config.validate().is_err());
    }
}
