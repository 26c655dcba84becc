pub mod cli;
pub mod manager;
pub mod scrapers;
pub mod search;

pub use cli::{handle_command, ScraperArgs, ScraperCommands};
pub use manager::{NewsPipeline, NewsReport};
pub use scrapers::ParagraphScraper;
pub use search::NewsApiClient;

pub mod prelude {
    pub use super::scrapers::ParagraphScraper;
    pub use super::search::NewsApiClient;
    pub use nt_core::{ArticleRef, ArticleScraper, NewsSearch, Result, Error, ScrapedArticle};
}
