//! Command-line interface

use crate::discovery::RawCriteria;
use crate::stores::{StoreConfig, DEMO_USER};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Deed marketplace property discovery
#[derive(Parser, Debug)]
#[command(name = "deed-discovery")]
#[command(about = "Browse, filter and rank deed marketplace listings", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Properties JSON file (mock listings when omitted)
    #[arg(long, global = true, env = "DEED_DATA")]
    pub data: Option<PathBuf>,

    /// Share holdings JSON file (mock holdings when omitted)
    #[arg(long, global = true, env = "DEED_SHARES")]
    pub shares: Option<PathBuf>,

    /// Acting user
    #[arg(short, long, global = true, default_value = DEMO_USER)]
    pub user: String,
}

impl Cli {
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            data: self.data.clone(),
            shares: self.shares.clone(),
            user: self.user.clone(),
        }
    }

    /// Default log filter; `RUST_LOG` takes precedence
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Filter, rank and page through listings
    Discover(DiscoverArgs),
    /// Record a view of one listing and print it
    View(ViewArgs),
    /// Write every listing to a directory as JSON
    Export(ExportArgs),
}

#[derive(Args, Debug, Default)]
pub struct DiscoverArgs {
    /// Case-insensitive text matched against title, address, city, state, owner
    #[arg(short = 'q', long)]
    pub search: Option<String>,

    /// Residential, Commercial, Industrial, Land or all
    #[arg(long = "type")]
    pub property_type: Option<String>,

    /// verified, pending, unverified or all
    #[arg(long)]
    pub status: Option<String>,

    /// Full, Fractional, Shared or all
    #[arg(long)]
    pub ownership: Option<String>,

    /// fraction, rent, loan, my-properties or all
    #[arg(long)]
    pub availability: Option<String>,

    /// under-1m, 1m-3m, 3m-5m, over-5m or all
    #[arg(long)]
    pub price_range: Option<String>,

    /// ai-recommended, newest, oldest, price-high, price-low, rating, views, availability
    #[arg(short, long)]
    pub sort: Option<String>,

    /// 1-based page number
    #[arg(short, long)]
    pub page: Option<usize>,

    /// Listings per page (default 12)
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Treat unrecognized filter values as "all" instead of failing
    #[arg(long)]
    pub lenient: bool,

    /// Clock used for recency scoring, RFC 3339 (defaults to now)
    #[arg(long)]
    pub now: Option<DateTime<Utc>>,

    /// Print the page as JSON
    #[arg(long)]
    pub json: bool,
}

impl DiscoverArgs {
    pub fn raw_criteria(&self) -> RawCriteria {
        RawCriteria {
            search_term: self.search.clone(),
            property_type: self.property_type.clone(),
            status: self.status.clone(),
            ownership_type: self.ownership.clone(),
            availability: self.availability.clone(),
            price_range: self.price_range.clone(),
            sort_by: self.sort.clone(),
            page: self.page,
            page_size: self.page_size,
        }
    }
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Listing id
    pub id: String,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output directory
    #[arg(short, long, default_value = "export")]
    pub out: PathBuf,
}
