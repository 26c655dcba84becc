pub mod models;
pub mod prompt;
pub mod speech;

pub use models::create_model;
pub use models::dummy::DummyModel;
pub use models::gemini::GeminiModel;
pub use speech::GoogleTranslateTts;

pub mod prelude {
    pub use super::models::create_model;
    pub use super::speech::GoogleTranslateTts;
    pub use nt_core::{AnalysisModel, Config, Error, Result, ScrapedArticle, SpeechSynthesizer};
}
