//! CLI commands and argument parsing

use crate::config;
use crate::types::{Order, SearchStatus, Sort};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Mercari search crawler
#[derive(Parser, Debug)]
#[command(name = "mercari-search")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// EC private key (PEM) used to sign each request
    #[arg(short, long, global = true)]
    pub key: Option<PathBuf>,

    /// Public JWK (JSON) embedded in each request proof
    #[arg(long, global = true)]
    pub jwk: Option<PathBuf>,

    /// Override the search endpoint URL
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl every page matching a keyword
    Search {
        /// Keyword to search for
        keyword: String,

        /// Keywords to exclude
        #[arg(long, default_value = "")]
        exclude: String,

        /// Sort key
        #[arg(long, value_enum, default_value_t = Sort::CreatedTime)]
        sort: Sort,

        /// Sort direction
        #[arg(long, value_enum, default_value_t = Order::Desc)]
        order: Order,

        /// Listing status filter
        #[arg(long, value_enum, default_value_t = SearchStatus::OnSale)]
        status: SearchStatus,

        /// Category ids (comma-separated)
        #[arg(long, value_delimiter = ',')]
        category_id: Vec<u32>,

        /// Minimum price in yen (0 = unbounded)
        #[arg(long, default_value_t = 0)]
        price_min: u64,

        /// Maximum price in yen (0 = unbounded)
        #[arg(long, default_value_t = 0)]
        price_max: u64,

        /// Item condition ids (comma-separated)
        #[arg(long, value_delimiter = ',')]
        condition_id: Vec<u32>,

        /// Stop after this many pages
        #[arg(long, default_value_t = config::DEFAULT_PAGE_LIMIT)]
        page_limit: u32,

        /// Base courtesy/retry interval in seconds
        #[arg(long, default_value_t = 1)]
        interval: u64,
    },

    /// Crawl using a YAML query file
    Run {
        /// Query file (YAML)
        file: PathBuf,
    },

    /// Validate a query file without crawling
    Validate {
        /// Query file (YAML)
        file: PathBuf,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One listing JSON per line
    Json,
    /// Human-readable listing table
    Pretty,
}
