//! Command execution

use super::commands::{Cli, Commands, OutputFormat};
use crate::auth::DpopSigner;
use crate::crawl::Crawler;
use crate::error::{Error, Result};
use crate::http::HttpTransport;
use crate::loader;
use crate::parse::Listing;
use crate::query::SearchQuery;
use std::time::Duration;
use tracing::info;
use url::Url;

/// Executes a parsed CLI invocation
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner for the parsed arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the selected command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Search {
                keyword,
                exclude,
                sort,
                order,
                status,
                category_id,
                price_min,
                price_max,
                condition_id,
                page_limit,
                interval,
            } => {
                let query = SearchQuery::builder(keyword.clone())
                    .exclude_keyword(exclude.clone())
                    .sort(*sort)
                    .order(*order)
                    .status(*status)
                    .category_ids(category_id.iter().copied())
                    .price_min(*price_min)
                    .price_max(*price_max)
                    .condition_ids(condition_id.iter().copied())
                    .page_limit(*page_limit)
                    .interval(Duration::from_secs(*interval))
                    .build();
                self.crawl(&query).await
            }

            Commands::Run { file } => {
                let query = loader::load_query(file)?;
                self.crawl(&query).await
            }

            Commands::Validate { file } => {
                let query = loader::load_query(file)?;
                println!(
                    "OK: \"{}\" ({} pages max, {}s interval)",
                    query.keyword,
                    query.page_limit,
                    query.interval.as_secs()
                );
                Ok(())
            }
        }
    }

    async fn crawl(&self, query: &SearchQuery) -> Result<()> {
        let signer = self.signer()?;
        let mut crawler = Crawler::new(signer, HttpTransport::new());

        if let Some(endpoint) = &self.cli.endpoint {
            let url = Url::parse(endpoint)
                .map_err(|e| Error::config(format!("invalid endpoint {endpoint}: {e}")))?;
            crawler = crawler.with_search_url(String::from(url));
        }

        let result = crawler.run(query).await?;
        if !result.success {
            return Err(Error::CrawlAborted);
        }

        info!(listings = result.listings.len(), "crawl finished");
        self.print(&result.listings)
    }

    fn signer(&self) -> Result<DpopSigner> {
        let key_path = self
            .cli
            .key
            .as_ref()
            .ok_or_else(|| Error::config("--key <EC private key PEM> is required to crawl"))?;
        let pem = std::fs::read(key_path)?;
        let mut signer = DpopSigner::from_ec_pem(&pem)?;

        if let Some(jwk_path) = &self.cli.jwk {
            let jwk = std::fs::read_to_string(jwk_path)?;
            signer = signer.with_jwk(&jwk)?;
        }

        Ok(signer)
    }

    fn print(&self, listings: &[Listing]) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => {
                for listing in listings {
                    println!("{}", serde_json::to_string(listing)?);
                }
            }
            OutputFormat::Pretty => {
                for listing in listings {
                    let marker = if listing.available { ' ' } else { 'x' };
                    println!(
                        "{marker} ¥{:<9} {:<48} {}",
                        listing.price, listing.name, listing.url
                    );
                }
            }
        }
        Ok(())
    }
}
