use std::fmt;
use async_trait::async_trait;
use nt_core::types::NO_TITLE;
use nt_core::{ArticleRef, Config, Error, NewsSearch, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    status: Option<String>,
    code: Option<String>,
    message: Option<String>,
    /// Kept loose so one bad entry cannot sink the whole page of results
    #[serde(default)]
    articles: Value,
}

fn article_ref(raw: &Value) -> ArticleRef {
    ArticleRef {
        title: raw
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or(NO_TITLE)
            .to_string(),
        url: raw.get("url").and_then(Value::as_str).unwrap_or_default().to_string(),
    }
}

/// Client for the NewsAPI `everything` endpoint.
pub struct NewsApiClient {
    client: Client,
    api_key: String,
    base_url: String,
    max_articles: usize,
}

impl fmt::Debug for NewsApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiClient")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("max_articles", &self.max_articles)
            .finish()
    }
}

impl NewsApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config.newsapi_key()?.to_string();
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            client,
            api_key,
            base_url: config.newsapi_base_url.trim_end_matches('/').to_string(),
            max_articles: config.max_articles,
        })
    }
}

#[async_trait]
impl NewsSearch for NewsApiClient {
    async fn search(&self, company: &str) -> Result<Vec<ArticleRef>> {
        tracing::debug!("🔍 Searching news for {}", company);
        let response = self
            .client
            .get(format!("{}/v2/everything", self.base_url))
            .query(&[("q", company), ("apiKey", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let parsed: EverythingResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                return Err(Error::Search(format!("News search returned HTTP {}", status)));
            }
            Err(e) => return Err(e.into()),
        };

        if parsed.status.as_deref() == Some("error") {
            return Err(Error::Search(format!(
                "{}: {}",
                parsed.code.as_deref().unwrap_or("unknown"),
                parsed.message.as_deref().unwrap_or("no message")
            )));
        }

        let articles: Vec<ArticleRef> = parsed
            .articles
            .as_array()
            .map(|raw| raw.iter().take(self.max_articles).map(article_ref).collect())
            .unwrap_or_default();
        tracing::info!("📰 Found {} articles for {}", articles.len(), company);
        Ok(articles)
    }
}
