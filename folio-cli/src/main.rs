//! Folio CLI - browse a public book catalog from the terminal

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use folio_core::source::DEFAULT_API_URL;
use folio_core::SortKey;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Parse and validate a page count or page number (must be at least 1)
fn parse_page(s: &str) -> Result<u32, String> {
    let n: u32 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if n < 1 {
        Err("pages start at 1".to_string())
    } else {
        Ok(n)
    }
}

fn parse_sort(s: &str) -> Result<SortKey, String> {
    s.parse().map_err(|e: folio_core::FolioError| e.to_string())
}

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog: load pages, then search and sort them
    Browse {
        /// Number of pages to load, starting at page 1
        #[arg(short, long, default_value = "1", value_parser = parse_page)]
        pages: u32,

        /// Keep books whose title or authors contain this text
        #[arg(short, long)]
        search: Option<String>,

        /// Sort order (title, date)
        #[arg(long, value_parser = parse_sort)]
        sort: Option<SortKey>,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Catalog API endpoint
        #[arg(long, default_value = DEFAULT_API_URL)]
        api_url: String,

        /// Request timeout in seconds
        #[arg(long, default_value = "30")]
        timeout: u64,
    },

    /// Fetch a single page and print its raw records
    Fetch {
        /// Page number (1-indexed)
        #[arg(value_parser = parse_page)]
        page: u32,

        /// Catalog API endpoint
        #[arg(long, default_value = DEFAULT_API_URL)]
        api_url: String,

        /// Request timeout in seconds
        #[arg(long, default_value = "30")]
        timeout: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "folio_cli=debug,folio_core=debug"
    } else {
        "folio_cli=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Browse {
            pages,
            search,
            sort,
            json,
            api_url,
            timeout,
        } => {
            let options = commands::BrowseOptions {
                pages,
                search,
                sort,
                json,
            };
            commands::browse(&api_url, timeout, options).await
        }

        Commands::Fetch {
            page,
            api_url,
            timeout,
        } => commands::fetch(&api_url, timeout, page).await,
    }
}
