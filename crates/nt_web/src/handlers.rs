use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use nt_core::error::MALFORMED_REPLY_MESSAGE;
use nt_core::Error;
use nt_scrappers::NewsReport;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info, warn};
use crate::AppState;

pub const NO_ARTICLES_MESSAGE: &str = "No articles found for this company.";
pub const ROOT_MESSAGE: &str = "FastAPI is running";

const INTERACTIVE_PAGE: &str = include_str!("../static/index.html");

#[derive(Debug, Deserialize)]
pub struct NewsParams {
    pub company: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TtsParams {
    pub summary: Option<String>,
    /// Overrides the configured language
    pub lang: Option<String>,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

fn status_for(err: &Error) -> StatusCode {
    if err.is_upstream() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

pub async fn root() -> Json<Value> {
    Json(json!({ "message": ROOT_MESSAGE }))
}

pub async fn interactive_page() -> Html<&'static str> {
    Html(INTERACTIVE_PAGE)
}

/// GET /news?company= - search, scrape and analyze a company's news
pub async fn get_news(
    State(state): State<AppState>,
    Query(params): Query<NewsParams>,
) -> Response {
    let company = match params.company.as_deref().map(str::trim) {
        Some(company) if !company.is_empty() => company.to_string(),
        _ => return error_response(StatusCode::BAD_REQUEST, "Missing required query parameter: company"),
    };

    info!("📰 News analysis requested for {}", company);
    match state.pipeline.run(&company).await {
        Ok(NewsReport::Analysis(payload)) => (StatusCode::OK, Json(payload)).into_response(),
        Ok(NewsReport::NotFound) => error_response(StatusCode::NOT_FOUND, NO_ARTICLES_MESSAGE),
        Err(Error::MalformedReply) => {
            warn!("Analysis reply for {} could not be parsed", company);
            error_response(StatusCode::OK, MALFORMED_REPLY_MESSAGE)
        }
        Err(e) => {
            error!("News analysis for {} failed: {}", company, e);
            error_response(status_for(&e), e.to_string())
        }
    }
}

/// GET /tts?summary= - speak a summary as MP3
pub async fn get_tts(
    State(state): State<AppState>,
    Query(params): Query<TtsParams>,
) -> Response {
    let Some(summary) = params.summary else {
        return error_response(StatusCode::BAD_REQUEST, "Missing required query parameter: summary");
    };
    let language = params.lang.unwrap_or_else(|| state.language.clone());

    match state.speech.synthesize(&summary, &language).await {
        Ok(audio) => (
            [
                (header::CONTENT_TYPE, "audio/mpeg"),
                (header::CONTENT_DISPOSITION, "attachment; filename=\"summary.mp3\""),
            ],
            audio,
        )
            .into_response(),
        Err(e) => {
            error!("Speech synthesis failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
