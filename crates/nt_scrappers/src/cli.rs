use clap::{Args, Subcommand};
use nt_core::{ArticleScraper, Config, NewsSearch, Result};
use crate::scrapers::ParagraphScraper;
use crate::search::NewsApiClient;

#[derive(Args, Debug, Clone)]
pub struct ScraperArgs {
    #[command(subcommand)]
    pub command: ScraperCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ScraperCommands {
    /// Print the paragraph text scraped from an article page
    Url {
        url: String,
    },
    /// List the article references found for a company
    Search {
        company: String,
        /// Also scrape each article and print its content
        #[arg(long)]
        scrape: bool,
    },
}

pub async fn handle_command(args: ScraperArgs, config: &Config) -> Result<()> {
    match args.command {
        ScraperCommands::Url { url } => {
            let scraper = ParagraphScraper::new(config)?;
            println!("{}", scraper.scrape(&url).await);
        }
        ScraperCommands::Search { company, scrape } => {
            let search = NewsApiClient::new(config)?;
            let articles = search.search(&company).await?;
            if articles.is_empty() {
                println!("No articles found for {}", company);
                return Ok(());
            }

            let scraper = if scrape { Some(ParagraphScraper::new(config)?) } else { None };
            for (i, article) in articles.iter().enumerate() {
                println!("{:>2}. {} - {}", i + 1, article.title, article.url);
                if let Some(scraper) = &scraper {
                    println!("    {}", scraper.scrape(&article.url).await);
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: ScraperArgs,
    }

    #[test]
    fn test_parse_search_command() {
        let cli = TestCli::try_parse_from(["nt", "search", "Acme", "--scrape"]).unwrap();
        match cli.args.command {
            ScraperCommands::Search { company, scrape } => {
                assert_eq!(company, "Acme");
                assert!(scrape);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_search_requires_key() {
        let args = ScraperArgs {
            command: ScraperCommands::Search { company: "Acme".into(), scrape: false },
        };
        assert!(handle_command(args, &Config::default()).await.is_err());
    }
}
