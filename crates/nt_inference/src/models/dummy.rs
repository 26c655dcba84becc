use std::fmt;
use async_trait::async_trait;
use nt_core::types::{ArticleAnalysis, ComparativeScore, SentimentDistribution, TopicOverlap};
use nt_core::{AnalysisModel, AnalysisResult, Result, ScrapedArticle, Sentiment};
use serde_json::Value;

const POSITIVE_WORDS: &[&str] = &[
    "beat", "boost", "gain", "gains", "growth", "grows", "profit", "record", "rise", "rises", "strong", "surge",
];
const NEGATIVE_WORDS: &[&str] = &[
    "cut", "cuts", "decline", "drop", "fall", "falls", "fraud", "lawsuit", "loss", "losses", "sued", "weak",
];

/// Offline analysis that needs no API key.
///
/// Summaries are the first 20 words of each article and sentiment comes from
/// a small word list.
pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::new()
    }
}

impl DummyModel {
    pub fn new() -> Self {
        Self
    }

    fn classify(text: &str) -> Sentiment {
        let (mut positive, mut negative) = (0, 0);
        for word in text.split(|c: char| !c.is_alphanumeric()) {
            let word = word.to_lowercase();
            if POSITIVE_WORDS.contains(&word.as_str()) {
                positive += 1;
            } else if NEGATIVE_WORDS.contains(&word.as_str()) {
                negative += 1;
            }
        }
        match positive.cmp(&negative) {
            std::cmp::Ordering::Greater => Sentiment::Positive,
            std::cmp::Ordering::Less => Sentiment::Negative,
            std::cmp::Ordering::Equal => Sentiment::Neutral,
        }
    }

    fn summarize(article: &ScrapedArticle) -> String {
        let source = if article.is_available() { &article.content } else { &article.title };
        let words: Vec<&str> = source.split_whitespace().take(20).collect();
        words.join(" ")
    }
}

#[async_trait]
impl AnalysisModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn analyze(&self, company: &str, articles: &[ScrapedArticle]) -> Result<Value> {
        let mut distribution = SentimentDistribution::default();
        let analyses: Vec<ArticleAnalysis> = articles
            .iter()
            .map(|article| {
                let sentiment = Self::classify(&format!("{} {}", article.title, article.content));
                distribution.record(sentiment);
                ArticleAnalysis {
                    title: article.title.clone(),
                    summary: Self::summarize(article),
                    sentiment,
                    topics: Vec::new(),
                }
            })
            .collect();

        let result = AnalysisResult {
            company: company.to_string(),
            articles: analyses,
            comparative: ComparativeScore {
                distribution,
                coverage_differences: Vec::new(),
                topic_overlap: TopicOverlap::default(),
            },
            final_sentiment: format!(
                "{} articles about {}: {} positive, {} negative, {} neutral.",
                distribution.total(),
                company,
                distribution.positive,
                distribution.negative,
                distribution.neutral
            ),
            audio: format!(
                "{} के बारे में {} समाचार लेख मिले। सकारात्मक: {}, नकारात्मक: {}, तटस्थ: {}।",
                company,
                distribution.total(),
                distribution.positive,
                distribution.negative,
                distribution.neutral
            ),
        };
        Ok(serde_json::to_value(result)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nt_core::{ArticleRef, CONTENT_NOT_AVAILABLE};

    fn article(title: &str, content: &str) -> ScrapedArticle {
        ScrapedArticle::new(
            ArticleRef { title: title.into(), url: "https://news.test".into() },
            content.into(),
        )
    }

    #[tokio::test]
    async fn test_dummy_model() {
        let model = DummyModel::new();
        let articles = vec![
            article("Acme posts record profit", "Shares rise after strong growth in every region."),
            article("Acme sued", CONTENT_NOT_AVAILABLE),
            article("Acme opens office", "The office is in Pune."),
        ];

        let value = model.analyze("Acme", &articles).await.unwrap();
        let result = AnalysisResult::from_value(&value).unwrap();

        assert_eq!(result.company, "Acme");
        assert_eq!(result.articles.len(), 3);
        assert_eq!(result.articles[0].sentiment, Sentiment::Positive);
        assert_eq!(result.articles[1].sentiment, Sentiment::Negative);
        assert_eq!(result.articles[1].summary, "Acme sued");
        assert_eq!(result.articles[2].sentiment, Sentiment::Neutral);
        assert_eq!(result.comparative.distribution, SentimentDistribution { positive: 1, negative: 1, neutral: 1 });
        assert!(result.audio.starts_with("Acme के बारे में 3"));
    }

    #[test]
    fn test_summary_takes_twenty_words() {
        let content = (1..=30).map(|i| i.to_string()).collect::<Vec<_>>().join(" ");
        let summary = DummyModel::summarize(&article("t", &content));
        assert_eq!(summary.split_whitespace().count(), 20);
        assert!(summary.ends_with("20"));
    }
}
