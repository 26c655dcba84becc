use std::fmt;
use std::time::Duration;
use url::Url;
use crate::{Error, Result};

pub const DEFAULT_NEWSAPI_URL: &str = "https://newsapi.org";
pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TTS_URL: &str = "https://translate.google.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Settings shared by every collaborator, built once at startup.
#[derive(Clone)]
pub struct Config {
    pub newsapi_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub newsapi_base_url: String,
    pub gemini_base_url: String,
    pub tts_base_url: String,
    /// Language of the spoken summary
    pub language: String,
    pub max_articles: usize,
    /// Scraped content is cut to this many characters
    pub content_limit: usize,
    pub user_agent: String,
    pub request_timeout: Duration,
    pub analysis_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            newsapi_key: None,
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            newsapi_base_url: DEFAULT_NEWSAPI_URL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_URL.to_string(),
            tts_base_url: DEFAULT_TTS_URL.to_string(),
            language: "hi".to_string(),
            max_articles: 10,
            content_limit: 1000,
            user_agent: "Mozilla/5.0".to_string(),
            request_timeout: Duration::from_secs(10),
            analysis_timeout: Duration::from_secs(120),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("newsapi_key", &self.newsapi_key.as_deref().map(|_| "<redacted>"))
            .field("gemini_api_key", &self.gemini_api_key.as_deref().map(|_| "<redacted>"))
            .field("gemini_model", &self.gemini_model)
            .field("newsapi_base_url", &self.newsapi_base_url)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("tts_base_url", &self.tts_base_url)
            .field("language", &self.language)
            .field("max_articles", &self.max_articles)
            .field("content_limit", &self.content_limit)
            .field("user_agent", &self.user_agent)
            .field("request_timeout", &self.request_timeout)
            .field("analysis_timeout", &self.analysis_timeout)
            .finish()
    }
}

impl Config {
    pub fn newsapi_key(&self) -> Result<&str> {
        self.newsapi_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::Config("NEWSAPI_KEY is required".to_string()))
    }

    pub fn gemini_api_key(&self) -> Result<&str> {
        self.gemini_api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::Config("GEMINI_API_KEY is required".to_string()))
    }

    /// Checks the settings that would otherwise only fail on first request.
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("news search", &self.newsapi_base_url),
            ("gemini", &self.gemini_base_url),
            ("tts", &self.tts_base_url),
        ] {
            Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{} base url {}: {}", name, url, e)))?;
        }
        if self.max_articles == 0 {
            return Err(Error::Config("max_articles must be at least 1".to_string()));
        }
        if self.content_limit == 0 {
            return Err(Error::Config("content_limit must be at least 1".to_string()));
        }
        if self.language.trim().is_empty() {
            return Err(Error::Config("language must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_articles, 10);
        assert_eq!(config.content_limit, 1000);
        assert_eq!(config.language, "hi");
    }

    #[test]
    fn test_missing_keys() {
        let config = Config::default();
        assert!(matches!(config.newsapi_key(), Err(Error::Config(_))));

        let config = Config {
            gemini_api_key: Some(String::new()),
            ..Config::default()
        };
        assert!(config.gemini_api_key().is_err());
    }

    #[test]
    fn test_invalid_base_url() {
        let config = Config {
            gemini_base_url: "not a url".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_debug_redacts_keys() {
        let config = Config {
            newsapi_key: Some("secret-news".to_string()),
            gemini_api_key: Some("secret-gemini".to_string()),
            ..Config::default()
        };
        let printed = format!("{:?}", config);
        assert!(!printed.contains("secret"));
        assert!(printed.contains("<redacted>"));
    }
}
