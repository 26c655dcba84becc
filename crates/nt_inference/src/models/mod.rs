use std::sync::Arc;
use nt_core::{AnalysisModel, AnalysisResult, Config, Error, Result};
use serde_json::Value;

pub mod dummy;
pub mod gemini;

pub use dummy::DummyModel;
pub use gemini::GeminiModel;

pub const AVAILABLE_MODELS: &[&str] = &["gemini", "dummy"];

/// Creates the analysis model registered under `name`.
pub fn create_model(name: &str, config: &Config) -> Result<Arc<dyn AnalysisModel>> {
    match name.to_lowercase().as_str() {
        "gemini" => Ok(Arc::new(GeminiModel::new(config)?)),
        "dummy" | "offline" => Ok(Arc::new(DummyModel::new())),
        other => Err(Error::Config(format!(
            "Unknown model: {}. Available models: {}",
            other,
            AVAILABLE_MODELS.join(", ")
        ))),
    }
}

/// Removes a surrounding markdown code fence, with or without a language tag.
pub fn strip_code_fences(reply: &str) -> &str {
    let mut text = reply.trim();
    if let Some(rest) = text.strip_prefix("```") {
        text = match rest.find('\n') {
            Some(end) if rest[..end].trim().chars().all(|c| c.is_ascii_alphanumeric()) => &rest[end + 1..],
            _ => rest.strip_prefix("json").unwrap_or(rest),
        };
    }
    let text = text.trim();
    text.strip_suffix("```").unwrap_or(text).trim()
}

/// Parses a model reply into JSON.
///
/// Any valid JSON is returned as is. A payload that does not match
/// [`AnalysisResult`] is only logged.
pub fn parse_reply(reply: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(strip_code_fences(reply)).map_err(|e| {
        tracing::warn!("Model reply is not valid JSON: {}", e);
        Error::MalformedReply
    })?;

    if let Err(e) = AnalysisResult::from_value(&value) {
        tracing::warn!("Model reply does not match the analysis schema: {}", e);
    }
    Ok(value)
}
