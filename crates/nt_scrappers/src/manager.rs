use std::sync::Arc;
use nt_core::{AnalysisModel, ArticleRef, ArticleScraper, Config, NewsSearch, Result, ScrapedArticle};
use crate::{NewsApiClient, ParagraphScraper};
use serde_json::Value;
use tracing::info;

/// Outcome of a company news run.
#[derive(Debug, Clone, PartialEq)]
pub enum NewsReport {
    /// The search returned nothing; the model was not consulted.
    NotFound,
    Analysis(Value),
}

/// Search, scrape and analyze the news of one company.
#[derive(Clone)]
pub struct NewsPipeline {
    search: Arc<dyn NewsSearch>,
    scraper: Arc<dyn ArticleScraper>,
    model: Arc<dyn AnalysisModel>,
    max_articles: usize,
}

impl NewsPipeline {
    pub fn new(
        search: Arc<dyn NewsSearch>,
        scraper: Arc<dyn ArticleScraper>,
        model: Arc<dyn AnalysisModel>,
        max_articles: usize,
    ) -> Self {
        Self {
            search,
            scraper,
            model,
            max_articles,
        }
    }

    /// Pipeline over NewsAPI search and paragraph scraping, analyzed by `model`.
    pub fn from_config(config: &Config, model: Arc<dyn AnalysisModel>) -> Result<Self> {
        Ok(Self::new(
            Arc::new(NewsApiClient::new(config)?),
            Arc::new(ParagraphScraper::new(config)?),
            model,
            config.max_articles,
        ))
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Scrapes each article in order, one at a time.
    pub async fn scrape_articles(&self, articles: Vec<ArticleRef>) -> Vec<ScrapedArticle> {
        let total = articles.len();
        let mut scraped = Vec::with_capacity(total);
        for (i, article) in articles.into_iter().enumerate() {
            info!("📝 Scraping article {}/{}: {}", i + 1, total, article.title);
            let content = self.scraper.scrape(&article.url).await;
            scraped.push(ScrapedArticle::new(article, content));
        }
        scraped
    }

    pub async fn run(&self, company: &str) -> Result<NewsReport> {
        let mut articles = self.search.search(company).await?;
        articles.truncate(self.max_articles);

        if articles.is_empty() {
            info!("🫙 No articles found for {}", company);
            return Ok(NewsReport::NotFound);
        }

        let scraped = self.scrape_articles(articles).await;
        let available = scraped.iter().filter(|a| a.is_available()).count();
        info!("🤖 Analyzing {} articles ({} with content) using {}", scraped.len(), available, self.model.name());

        let payload = self.model.analyze(company, &scraped).await?;
        info!("✨ Analysis complete for {}", company);
        Ok(NewsReport::Analysis(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use nt_core::{Error, CONTENT_NOT_AVAILABLE};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct MockSearch(usize);
    struct MockScraper(Mutex<Vec<String>>);
    struct MockModel {
        calls: AtomicUsize,
        seen: Mutex<Vec<ScrapedArticle>>,
    }

    #[async_trait]
    impl NewsSearch for MockSearch {
        async fn search(&self, _company: &str) -> Result<Vec<ArticleRef>> {
            Ok((0..self.0)
                .map(|i| ArticleRef {
                    title: format!("Story {}", i),
                    url: format!("https://news.test/{}", i),
                })
                .collect())
        }
    }

    #[async_trait]
    impl ArticleScraper for MockScraper {
        async fn scrape(&self, url: &str) -> String {
            self.0.lock().unwrap().push(url.to_string());
            if url.ends_with('1') {
                CONTENT_NOT_AVAILABLE.to_string()
            } else {
                format!("Body of {}", url)
            }
        }
    }

    #[async_trait]
    impl AnalysisModel for MockModel {
        fn name(&self) -> &str {
            "mock"
        }

        async fn analyze(&self, company: &str, articles: &[ScrapedArticle]) -> Result<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.seen.lock().unwrap() = articles.to_vec();
            Ok(json!({"Company": company, "Audio": "नमस्ते"}))
        }
    }

    fn pipeline(results: usize) -> (NewsPipeline, Arc<MockScraper>, Arc<MockModel>) {
        let scraper = Arc::new(MockScraper(Mutex::new(Vec::new())));
        let model = Arc::new(MockModel {
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        });
        let pipeline = NewsPipeline::new(Arc::new(MockSearch(results)), scraper.clone(), model.clone(), 10);
        (pipeline, scraper, model)
    }

    #[tokio::test]
    async fn test_no_articles_skips_analysis() {
        let (pipeline, scraper, model) = pipeline(0);
        let report = pipeline.run("Zzzznonexistent").await.unwrap();
        assert_eq!(report, NewsReport::NotFound);
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
        assert!(scraper.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_scrapes_in_order_and_caps_articles() {
        let (pipeline, scraper, model) = pipeline(14);
        let report = pipeline.run("Acme").await.unwrap();
        assert_eq!(report, NewsReport::Analysis(json!({"Company": "Acme", "Audio": "नमस्ते"})));

        let visited = scraper.0.lock().unwrap().clone();
        let expected: Vec<String> = (0..10).map(|i| format!("https://news.test/{}", i)).collect();
        assert_eq!(visited, expected);

        let seen = model.seen.lock().unwrap().clone();
        assert_eq!(seen.len(), 10);
        assert_eq!(seen[0].content, "Body of https://news.test/0");
        assert_eq!(seen[1].content, CONTENT_NOT_AVAILABLE);
        assert_eq!(seen[2].title, "Story 2");
    }

    #[test]
    fn test_from_config() {
        let model = Arc::new(MockModel {
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        });
        let result = NewsPipeline::from_config(&Config::default(), model.clone());
        assert!(matches!(result, Err(Error::Config(_))));

        let config = Config {
            newsapi_key: Some("test-key".to_string()),
            max_articles: 3,
            ..Config::default()
        };
        let pipeline = NewsPipeline::from_config(&config, model).unwrap();
        assert_eq!(pipeline.model_name(), "mock");
        assert_eq!(pipeline.max_articles, 3);
    }

    #[tokio::test]
    async fn test_analysis_errors_propagate() {
        struct FailingModel;

        #[async_trait]
        impl AnalysisModel for FailingModel {
            fn name(&self) -> &str {
                "failing"
            }

            async fn analyze(&self, _company: &str, _articles: &[ScrapedArticle]) -> Result<Value> {
                Err(Error::MalformedReply)
            }
        }

        let scraper = Arc::new(MockScraper(Mutex::new(Vec::new())));
        let pipeline = NewsPipeline::new(Arc::new(MockSearch(2)), scraper, Arc::new(FailingModel), 10);
        assert!(matches!(pipeline.run("Acme").await, Err(Error::MalformedReply)));
    }
}
