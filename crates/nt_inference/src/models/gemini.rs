use std::fmt;
use async_trait::async_trait;
use nt_core::{AnalysisModel, Config, Error, Result, ScrapedArticle};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::prompt::build_prompt;
use super::parse_reply;

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Analysis backed by the Gemini `generateContent` API.
pub struct GeminiModel {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl fmt::Debug for GeminiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

impl GeminiModel {
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config.gemini_api_key()?.to_string();
        let client = Client::builder()
            .timeout(config.analysis_timeout)
            .connect_timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            api_key,
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            model: config.gemini_model.clone(),
        })
    }

    /// Sends one prompt and returns the reply text.
    pub async fn generate(&self, prompt: String) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text: Some(prompt) }],
            }],
        };

        tracing::debug!("Sending generateContent request to {}", self.model);
        let response = self
            .client
            .post(format!("{}/models/{}:generateContent", self.base_url, self.model))
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(200).collect();
            return Err(Error::Inference(format!("Gemini returned HTTP {}: {}", status, snippet)));
        }

        let response = response.json::<GenerateResponse>().await?;
        let content = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .ok_or_else(|| Error::Inference("Gemini response has no candidates".to_string()))?;

        Ok(content
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect::<String>())
    }
}

#[async_trait]
impl AnalysisModel for GeminiModel {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn analyze(&self, company: &str, articles: &[ScrapedArticle]) -> Result<Value> {
        let prompt = build_prompt(company, articles)?;
        let reply = self.generate(prompt).await?;
        tracing::debug!("Gemini replied with {} characters", reply.len());
        parse_reply(&reply)
    }
}
