use std::sync::Arc;
use nt_core::{Config, Result, SpeechSynthesizer};
use nt_inference::{create_model, GoogleTranslateTts};
use nt_scrappers::NewsPipeline;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: NewsPipeline,
    pub speech: Arc<dyn SpeechSynthesizer>,
    /// Language used for `/tts` when the request does not name one
    pub language: String,
}

impl AppState {
    pub fn new(pipeline: NewsPipeline, speech: Arc<dyn SpeechSynthesizer>, language: impl Into<String>) -> Self {
        Self {
            pipeline,
            speech,
            language: language.into(),
        }
    }

    /// Wires the production clients described by `config`.
    pub fn from_config(config: &Config, model: &str) -> Result<Self> {
        let pipeline = NewsPipeline::from_config(config, create_model(model, config)?)?;
        let speech = Arc::new(GoogleTranslateTts::new(config)?);
        Ok(Self::new(pipeline, speech, config.language.clone()))
    }
}
