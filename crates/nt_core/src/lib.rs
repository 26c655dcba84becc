pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod sources;
pub mod types;

pub use config::Config;
pub use error::Error;
pub use models::{AnalysisModel, SpeechSynthesizer};
pub use sources::{ArticleScraper, NewsSearch};
pub use types::{AnalysisResult, ArticleRef, ScrapedArticle, Sentiment, CONTENT_NOT_AVAILABLE};

pub type Result<T> = std::result::Result<T, Error>;
