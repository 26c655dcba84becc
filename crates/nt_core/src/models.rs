use async_trait::async_trait;
use serde_json::Value;
use crate::types::ScrapedArticle;
use crate::Result;

#[async_trait]
pub trait AnalysisModel: Send + Sync {
    fn name(&self) -> &str;

    /// Analyze the scraped articles of a company.
    ///
    /// Returns the model's JSON payload as parsed, or
    /// [`Error::MalformedReply`](crate::Error::MalformedReply) when the reply
    /// is not JSON.
    async fn analyze(&self, company: &str, articles: &[ScrapedArticle]) -> Result<Value>;
}

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Render `text` spoken in `language` as MP3 bytes.
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>>;
}
