use thiserror::Error;

/// Message returned to callers when the model reply is not valid JSON.
pub const MALFORMED_REPLY_MESSAGE: &str = "Failed to parse Gemini response";

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Scraping error: {0}")]
    Scraping(String),

    #[error("News search error: {0}")]
    Search(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Failed to parse Gemini response")]
    MalformedReply,

    #[error("Speech synthesis error: {0}")]
    Synthesis(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    /// True for failures of a remote collaborator (search, model, network).
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Error::Search(_) | Error::Inference(_) | Error::Http(_) | Error::External(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
