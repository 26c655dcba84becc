use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use anyhow::Context;
use clap::Parser;
use nt_core::config::{DEFAULT_GEMINI_MODEL, DEFAULT_GEMINI_URL, DEFAULT_NEWSAPI_URL, DEFAULT_TTS_URL};
use nt_core::error::MALFORMED_REPLY_MESSAGE;
use nt_core::{Config, Error, SpeechSynthesizer};
use nt_inference::{create_model, GoogleTranslateTts};
use nt_scrappers::{NewsPipeline, NewsReport, ScraperArgs};
use nt_web::AppState;
use serde_json::json;
use tracing::{info, Level};

mod client;

use client::InteractiveClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_seconds = 0u64;
        let mut current_number = String::new();
        let mut has_unit = false;

        for c in s.chars() {
            if c.is_ascii_digit() {
                current_number.push(c);
            } else if !current_number.is_empty() {
                let num = current_number
                    .parse::<u64>()
                    .map_err(|_| "Invalid number in duration".to_string())?;
                let unit = match c {
                    's' => 1,
                    'm' => 60,
                    'h' => 3600,
                    _ => return Err(format!("Invalid duration unit: {}", c)),
                };
                total_seconds = num
                    .checked_mul(unit)
                    .and_then(|seconds| total_seconds.checked_add(seconds))
                    .ok_or_else(|| "Duration is too large".to_string())?;
                current_number.clear();
                has_unit = true;
            } else if !c.is_whitespace() {
                return Err(format!("Invalid character in duration: {}", c));
            }
        }

        // A bare number is seconds
        if !current_number.is_empty() {
            let num = current_number
                .parse::<u64>()
                .map_err(|_| "Invalid number in duration".to_string())?;
            total_seconds = total_seconds
                .checked_add(num)
                .ok_or_else(|| "Duration is too large".to_string())?;
            has_unit = true;
        }

        if !has_unit {
            return Err("Duration must include a number".to_string());
        }
        if total_seconds == 0 {
            return Err("Duration must be greater than zero".to_string());
        }

        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Company news sentiment analysis", long_about = None)]
pub struct Cli {
    #[arg(long, env = "NEWSAPI_KEY", hide_env_values = true)]
    newsapi_key: Option<String>,
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_api_key: Option<String>,
    #[arg(long, default_value = "gemini", help = "Model to use for analysis. Available models: gemini (default), dummy")]
    model: String,
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    gemini_model: String,
    #[arg(long, env = "NEWSAPI_URL", default_value = DEFAULT_NEWSAPI_URL)]
    newsapi_url: String,
    #[arg(long, env = "GEMINI_URL", default_value = DEFAULT_GEMINI_URL)]
    gemini_url: String,
    #[arg(long, env = "TTS_URL", default_value = DEFAULT_TTS_URL)]
    tts_url: String,
    /// Language of the spoken summary
    #[arg(long, env = "TTS_LANGUAGE", default_value = "hi")]
    language: String,
    /// Timeout for search, scraping and speech requests (e.g. 10s, 1m30s)
    #[arg(long, default_value = "10s")]
    request_timeout: HumanDuration,
    /// Timeout for the analysis request
    #[arg(long, default_value = "2m")]
    analysis_timeout: HumanDuration,
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the HTTP service
    Serve {
        #[arg(long, env = "NT_ADDR", default_value = "127.0.0.1:8000")]
        addr: SocketAddr,
    },
    /// Analyze a company's news and print the result
    News {
        company: String,
    },
    /// Speak a text and write it as MP3
    Tts {
        text: String,
        #[arg(short, long, default_value = client::AUDIO_FILE_NAME)]
        output: PathBuf,
    },
    /// Scrape a page or list search results
    Scrape(ScraperArgs),
    /// Interactive client for a running service
    Client {
        #[arg(long, env = "NT_API_URL", default_value = "http://127.0.0.1:8000/")]
        server: String,
        /// Directory the audio summary is written to
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            newsapi_key: self.newsapi_key.clone(),
            gemini_api_key: self.gemini_api_key.clone(),
            gemini_model: self.gemini_model.clone(),
            newsapi_base_url: self.newsapi_url.clone(),
            gemini_base_url: self.gemini_url.clone(),
            tts_base_url: self.tts_url.clone(),
            language: self.language.clone(),
            request_timeout: self.request_timeout.0,
            analysis_timeout: self.analysis_timeout.0,
            ..Config::default()
        }
    }
}

async fn run_news(config: &Config, model: &str, company: &str) -> nt_core::Result<serde_json::Value> {
    let pipeline = NewsPipeline::from_config(config, create_model(model, config)?)?;
    info!("🧠 Analysis model initialized (using {})", pipeline.model_name());

    match pipeline.run(company).await {
        Ok(NewsReport::Analysis(payload)) => Ok(payload),
        Ok(NewsReport::NotFound) => Ok(json!({ "error": "No articles found for this company." })),
        Err(Error::MalformedReply) => Ok(json!({ "error": MALFORMED_REPLY_MESSAGE })),
        Err(e) => Err(e),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    nt_core::logging::init_logging(if cli.verbose { Level::DEBUG } else { Level::INFO });

    let config = cli.config();
    config.validate()?;

    match &cli.command {
        Commands::Serve { addr } => {
            let state = AppState::from_config(&config, &cli.model)?;
            info!("🧠 Analysis model initialized (using {})", state.pipeline.model_name());
            nt_web::serve(*addr, state).await?;
        }
        Commands::News { company } => {
            let payload = run_news(&config, &cli.model, company).await?;
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        Commands::Tts { text, output } => {
            let tts = GoogleTranslateTts::new(&config)?;
            let audio = tts.synthesize(text, &config.language).await?;
            tokio::fs::write(output, &audio)
                .await
                .with_context(|| format!("writing {}", output.display()))?;
            info!("🔊 Wrote {} bytes to {}", audio.len(), output.display());
        }
        Commands::Scrape(args) => {
            nt_scrappers::handle_command(args.clone(), &config).await?;
        }
        Commands::Client { server, output_dir } => {
            let client = InteractiveClient::new(server, output_dir, config.analysis_timeout)?;
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            client.run(stdin).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_duration() {
        assert_eq!("10s".parse::<HumanDuration>().unwrap().0, Duration::from_secs(10));
        assert_eq!("1m30s".parse::<HumanDuration>().unwrap().0, Duration::from_secs(90));
        assert_eq!("1h15m".parse::<HumanDuration>().unwrap().0, Duration::from_secs(4500));
        assert_eq!("45".parse::<HumanDuration>().unwrap().0, Duration::from_secs(45));
        assert!("".parse::<HumanDuration>().is_err());
        assert!("0s".parse::<HumanDuration>().is_err());
        assert!("5x".parse::<HumanDuration>().is_err());
    }

    #[test]
    fn test_human_duration_overflow() {
        let err = "99999999999999999h".parse::<HumanDuration>().unwrap_err();
        assert_eq!(err, "Duration is too large");
        assert!(format!("{}s1s", u64::MAX).parse::<HumanDuration>().is_err());
        assert!("99999999999999999999".parse::<HumanDuration>().is_err());
    }

    #[test]
    fn test_cli_builds_config() {
        let cli = Cli::try_parse_from([
            "nt",
            "--newsapi-key",
            "news-key",
            "--gemini-api-key",
            "gemini-key",
            "--request-timeout",
            "5s",
            "news",
            "Acme",
        ])
        .unwrap();
        let config = cli.config();
        assert_eq!(config.newsapi_key.as_deref(), Some("news-key"));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.max_articles, 10);
        assert!(matches!(cli.command, Commands::News { ref company } if company == "Acme"));
    }

    #[test]
    fn test_cli_scrape_subcommand() {
        let cli = Cli::try_parse_from(["nt", "scrape", "url", "https://news.test/a"]).unwrap();
        assert!(matches!(cli.command, Commands::Scrape(_)));
    }

    #[tokio::test]
    async fn test_run_news_requires_keys() {
        let config = Config::default();
        assert!(run_news(&config, "dummy", "Acme").await.is_err());
    }
}
