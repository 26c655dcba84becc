use serde::{Deserialize, Serialize};

/// Content used when an article page cannot be fetched or parsed.
pub const CONTENT_NOT_AVAILABLE: &str = "Content not available";

/// Title used when the search service omits one.
pub const NO_TITLE: &str = "No Title";

/// An article reference returned by the news search service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRef {
    pub title: String,
    pub url: String,
}

/// An article reference together with the text scraped from its page.
///
/// Serialized with the field names used in the analysis prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedArticle {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Content")]
    pub content: String,
}

impl ScrapedArticle {
    pub fn new(article: ArticleRef, content: String) -> Self {
        Self {
            title: article.title,
            url: article.url,
            content,
        }
    }

    pub fn is_available(&self) -> bool {
        self.content != CONTENT_NOT_AVAILABLE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed view of the analysis payload.
///
/// The service returns the model's JSON untouched; this view is only used to
/// check its shape and to render it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Articles")]
    pub articles: Vec<ArticleAnalysis>,
    #[serde(rename = "Comparative Sentiment Score")]
    pub comparative: ComparativeScore,
    #[serde(rename = "Final Sentiment Analysis")]
    pub final_sentiment: String,
    #[serde(rename = "Audio", default)]
    pub audio: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleAnalysis {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Summary")]
    pub summary: String,
    #[serde(rename = "Sentiment")]
    pub sentiment: Sentiment,
    #[serde(rename = "Topics", default)]
    pub topics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparativeScore {
    #[serde(rename = "Sentiment Distribution")]
    pub distribution: SentimentDistribution,
    #[serde(rename = "Coverage Differences", default)]
    pub coverage_differences: Vec<CoverageDifference>,
    #[serde(rename = "Topic Overlap")]
    pub topic_overlap: TopicOverlap,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    #[serde(rename = "Positive")]
    pub positive: u32,
    #[serde(rename = "Negative")]
    pub negative: u32,
    #[serde(rename = "Neutral")]
    pub neutral: u32,
}

impl SentimentDistribution {
    pub fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Neutral => self.neutral += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.positive + self.negative + self.neutral
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageDifference {
    #[serde(rename = "Comparison")]
    pub comparison: String,
    #[serde(rename = "Impact")]
    pub impact: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicOverlap {
    #[serde(rename = "Common Topics", default)]
    pub common_topics: Vec<String>,
    #[serde(rename = "Unique Topics", default)]
    pub unique_topics: Vec<String>,
}

impl AnalysisResult {
    /// Reads the typed view out of a raw payload.
    pub fn from_value(value: &serde_json::Value) -> crate::Result<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }
}
