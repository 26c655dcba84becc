use async_trait::async_trait;
use nt_core::{ArticleScraper, Config, Error, Result, CONTENT_NOT_AVAILABLE};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

/// Scrapes the paragraph text of arbitrary article pages.
#[derive(Debug, Clone)]
pub struct ParagraphScraper {
    client: Client,
    content_limit: usize,
}

impl ParagraphScraper {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            content_limit: config.content_limit,
        })
    }

    /// Fetches a page and extracts its paragraph text, surfacing every failure.
    pub async fn fetch_content(&self, url: &str) -> Result<String> {
        let url = utils::parse_url(url)?;
        let response = self.client.get(url).send().await?.error_for_status()?;

        if let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !utils::is_markup(content_type) {
                return Err(Error::Scraping(format!("Unsupported content type: {}", content_type)));
            }
        }

        let html = response.text().await?;
        extract_content(&html, self.content_limit)
    }
}

#[async_trait]
impl ArticleScraper for ParagraphScraper {
    async fn scrape(&self, url: &str) -> String {
        match self.fetch_content(url).await {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("⚠️ Failed to scrape {}: {}", url, e);
                CONTENT_NOT_AVAILABLE.to_string()
            }
        }
    }
}

/// Joins the text of every `<p>` element with single spaces, cut to `limit` characters.
pub fn extract_content(html: &str, limit: usize) -> Result<String> {
    let document = Html::parse_document(html);
    let paragraphs = utils::extract_texts(&document, "p")?;
    Ok(utils::truncate_chars(&paragraphs.join(" "), limit))
}

/// Common utilities for scrapers
pub(crate) mod utils {
    use super::*;

    pub fn parse_url(url: &str) -> Result<Url> {
        Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))
    }

    pub fn extract_texts(document: &Html, selector: &str) -> Result<Vec<String>> {
        let selector = Selector::parse(selector)
            .map_err(|e| Error::Scraping(format!("Invalid selector: {}", e)))?;

        Ok(document
            .select(&selector)
            .map(|el| el.text().collect::<String>())
            .collect())
    }

    pub fn is_markup(content_type: &str) -> bool {
        let content_type = content_type.to_ascii_lowercase();
        content_type.contains("html") || content_type.contains("xml")
    }

    pub fn truncate_chars(text: &str, limit: usize) -> String {
        match text.char_indices().nth(limit) {
            Some((idx, _)) => text[..idx].to_string(),
            None => text.to_string(),
        }
    }
}
