use async_trait::async_trait;
use crate::types::ArticleRef;
use crate::Result;

#[async_trait]
pub trait NewsSearch: Send + Sync {
    /// Returns article references for a free-text company query, in upstream order
    async fn search(&self, company: &str) -> Result<Vec<ArticleRef>>;
}

#[async_trait]
pub trait ArticleScraper: Send + Sync {
    /// Returns the text of an article page.
    ///
    /// Never fails: unreachable or unusable pages yield
    /// [`CONTENT_NOT_AVAILABLE`](crate::CONTENT_NOT_AVAILABLE).
    async fn scrape(&self, url: &str) -> String;
}
