use nt_core::{Result, ScrapedArticle};

/// Builds the single analysis prompt sent to the model.
pub fn build_prompt(company: &str, articles: &[ScrapedArticle]) -> Result<String> {
    let company_json = serde_json::to_string(company)?;
    let articles_json = serde_json::to_string_pretty(articles)?;

    Ok(format!(
        r#"Analyze the following news articles related to {company}. Extract:
- Summary
- Sentiment (Positive, Negative, Neutral)
- Key Topics
- Comparative Analysis
- Final Sentiment Conclusion
- Hindi Text-to-Speech summary

Return the result in the following JSON format:
{{
    "Company": {company_json},
    "Articles": [
        {{"Title": "Title 1", "Summary": "...", "Sentiment": "...", "Topics": ["..."]}},
        {{"Title": "Title 2", "Summary": "...", "Sentiment": "...", "Topics": ["..."]}}
    ],
    "Comparative Sentiment Score": {{
        "Sentiment Distribution": {{"Positive": X, "Negative": Y, "Neutral": Z}},
        "Coverage Differences": [{{"Comparison": "...", "Impact": "..."}}],
        "Topic Overlap": {{"Common Topics": [...], "Unique Topics": [...]}}
    }},
    "Final Sentiment Analysis": "Overall sentiment summary",
    "Audio": "Hindi summary in short 2-3 paragraphs"
}}

Articles:
{articles_json}"#
    ))
}
