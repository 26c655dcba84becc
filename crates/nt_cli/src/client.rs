//! Terminal front end for a running news service.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt};
use url::Url;

pub const AUDIO_FILE_NAME: &str = "summary.mp3";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("API connection error: {0}")]
    Connection(#[from] reqwest::Error),

    #[error("API request failed: {0}")]
    Status(StatusCode),

    #[error("Invalid response from API: {0}")]
    Decode(String),

    #[error("Failed to generate Hindi summary audio.")]
    Audio,

    #[error("Failed to save audio: {0}")]
    Io(#[from] std::io::Error),

    #[error("A request is already in progress")]
    Busy,

    #[error("Invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// The fetch control. Pressing it hands out a guard that keeps it disabled
/// until the guard is dropped.
#[derive(Debug)]
pub struct Trigger {
    enabled: AtomicBool,
}

impl Default for Trigger {
    fn default() -> Self {
        Self {
            enabled: AtomicBool::new(true),
        }
    }
}

impl Trigger {
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn press(&self) -> Option<BusyGuard<'_>> {
        self.enabled
            .compare_exchange(true, false, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| BusyGuard { trigger: self })
    }
}

#[derive(Debug)]
pub struct BusyGuard<'a> {
    trigger: &'a Trigger,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.trigger.enabled.store(true, Ordering::SeqCst);
    }
}

/// Result of one fetch cycle.
#[derive(Debug)]
pub struct Report {
    /// The analysis with the spoken summary removed
    pub analysis: Value,
    /// `None` when the analysis carried no spoken summary
    pub audio: Option<Result<PathBuf, ClientError>>,
}

pub struct InteractiveClient {
    http: Client,
    base_url: Url,
    output_dir: PathBuf,
    trigger: Trigger,
}

impl InteractiveClient {
    pub fn new(server: &str, output_dir: impl Into<PathBuf>, timeout: Duration) -> Result<Self, ClientError> {
        let mut server = server.to_string();
        if !server.ends_with('/') {
            server.push('/');
        }
        Ok(Self {
            http: Client::builder().timeout(timeout).build()?,
            base_url: Url::parse(&server)?,
            output_dir: output_dir.into(),
            trigger: Trigger::default(),
        })
    }

    pub fn trigger(&self) -> &Trigger {
        &self.trigger
    }

    pub async fn fetch_news(&self, company: &str) -> Result<Value, ClientError> {
        let response = self
            .http
            .get(self.base_url.join("news")?)
            .query(&[("company", company)])
            .send()
            .await?;
        if response.status() != StatusCode::OK {
            return Err(ClientError::Status(response.status()));
        }
        response
            .json::<Value>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    pub async fn fetch_audio(&self, summary: &str) -> Result<Vec<u8>, ClientError> {
        let response = self
            .http
            .get(self.base_url.join("tts")?)
            .query(&[("summary", summary)])
            .send()
            .await?;
        if response.status() != StatusCode::OK {
            return Err(ClientError::Audio);
        }
        Ok(response.bytes().await?.to_vec())
    }

    async fn save_audio(&self, summary: &str) -> Result<PathBuf, ClientError> {
        let audio = self.fetch_audio(summary).await?;
        tokio::fs::create_dir_all(&self.output_dir).await?;
        let path = self.output_dir.join(AUDIO_FILE_NAME);
        tokio::fs::write(&path, audio).await?;
        Ok(path)
    }

    /// Fetches, splits off the spoken summary and renders it as audio.
    ///
    /// The trigger stays disabled for the whole cycle, whatever the outcome.
    pub async fn run_cycle(&self, company: &str) -> Result<Report, ClientError> {
        let _guard = self.trigger.press().ok_or(ClientError::Busy)?;
        eprintln!("⏳ Fetching and processing news...");

        let mut analysis = self.fetch_news(company).await?;
        let summary = analysis
            .as_object_mut()
            .and_then(|fields| fields.remove("Audio"))
            .and_then(|audio| audio.as_str().map(str::to_string))
            .unwrap_or_default();

        let audio = if summary.is_empty() {
            None
        } else {
            Some(self.save_audio(&summary).await)
        };
        Ok(Report { analysis, audio })
    }

    /// Reads company names line by line until EOF or `quit`.
    pub async fn run<R: AsyncBufRead + Unpin>(&self, input: R) -> std::io::Result<()> {
        let mut lines = input.lines();
        loop {
            prompt().await?;
            let Some(line) = lines.next_line().await? else {
                break;
            };
            let company = line.trim();
            if company.is_empty() {
                continue;
            }
            if company.eq_ignore_ascii_case("quit") || company.eq_ignore_ascii_case("exit") {
                break;
            }

            match self.run_cycle(company).await {
                Ok(report) => render(&report),
                Err(e) => eprintln!("❌ {}", e),
            }
        }
        Ok(())
    }
}

async fn prompt() -> std::io::Result<()> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(b"Enter Company Name: ").await?;
    stdout.flush().await
}

fn render(report: &Report) {
    match serde_json::to_string_pretty(&report.analysis) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("❌ Could not display analysis: {}", e),
    }
    if let Some(message) = report.analysis.get("error").and_then(Value::as_str) {
        eprintln!("❌ {}", message);
    }
    match &report.audio {
        Some(Ok(path)) => println!("🔊 Audio summary saved to {}", display(path)),
        Some(Err(e)) => eprintln!("❌ {}", e),
        None => {}
    }
}

fn display(path: &Path) -> String {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf()).display().to_string()
}
