//! Research Portal CLI - Entry Point
//!
//! Fetches JSON through the resilient client and renders page selectors.

use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

use scholar_portal::{
    Config, FetchRequest, PortalClient, formatters,
    models::Work,
    pagination::{Pagination, compute_window},
};

#[derive(Parser, Debug)]
#[command(name = "scholar-portal")]
#[command(about = "Research portal data client")]
#[command(version)]
struct Cli {
    /// Base URL for relative request URLs
    #[arg(long, env = "PORTAL_API_BASE_URL")]
    base_url: Option<String>,

    /// API key sent as a bearer token
    #[arg(long, env = "OPENALEX_API_KEY")]
    api_key: Option<String>,

    /// Contact address for the OpenAlex polite pool
    #[arg(long, env = "OPENALEX_MAILTO")]
    mailto: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a JSON document and print it
    Fetch {
        /// Absolute URL, or path relative to the base URL
        url: String,

        /// Extra header as NAME:VALUE (repeatable)
        #[arg(long = "header", short = 'H')]
        headers: Vec<String>,

        #[command(flatten)]
        retry: RetryArgs,

        /// Print compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Fetch one page of a works listing and print it with a page selector
    List {
        /// Listing URL, e.g. "works?search=graphene"
        url: String,

        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Results per page
        #[arg(long, default_value_t = 25)]
        per_page: u32,

        /// Numbered buttons around the current page
        #[arg(long, default_value_t = Pagination::DEFAULT_WINDOW)]
        window: u32,

        #[command(flatten)]
        retry: RetryArgs,
    },

    /// Print the page selector for a position
    Window {
        /// Current page (1-based)
        current: u32,

        /// Total number of pages
        total: u32,

        /// Numbered buttons around the current page
        #[arg(long, default_value_t = Pagination::DEFAULT_WINDOW)]
        size: u32,
    },
}

#[derive(clap::Args, Debug)]
struct RetryArgs {
    /// Attempts after the first one
    #[arg(long)]
    max_retries: Option<u32>,

    /// First backoff delay in milliseconds
    #[arg(long)]
    initial_backoff_ms: Option<u64>,

    /// Backoff cap in milliseconds
    #[arg(long)]
    max_backoff_ms: Option<u64>,
}

impl RetryArgs {
    fn apply(&self, mut request: FetchRequest) -> FetchRequest {
        if let Some(retries) = self.max_retries {
            request = request.max_retries(retries);
        }
        if let Some(ms) = self.initial_backoff_ms {
            request = request.initial_backoff(Duration::from_millis(ms));
        }
        if let Some(ms) = self.max_backoff_ms {
            request = request.max_backoff(Duration::from_millis(ms));
        }
        request
    }
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = Config::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config.base_url.clone_from(base_url);
    }
    if cli.api_key.is_some() {
        config.api_key.clone_from(&cli.api_key);
    }
    if cli.mailto.is_some() {
        config.mailto.clone_from(&cli.mailto);
    }
    Ok(config)
}

/// Set `page` and `per-page` on a listing URL, keeping its other parameters.
fn with_page_params(url: &str, page: u32, per_page: u32) -> String {
    let (path, query) = url.split_once('?').unwrap_or((url, ""));
    // Relative paths have no origin; a placeholder one lets Url edit the query.
    let mut parsed = match Url::parse("http://placeholder/").and_then(|u| u.join(&format!("?{query}"))) {
        Ok(parsed) => parsed,
        Err(_) => return url.to_string(),
    };

    let kept: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(k, _)| k != "page" && k != "per-page")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    parsed
        .query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair("page", &page.to_string())
        .append_pair("per-page", &per_page.to_string());

    format!("{path}?{}", parsed.query().unwrap_or_default())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    match &cli.command {
        Command::Window { current, total, size } => {
            let window = compute_window(*current, *total, *size);
            println!("{}", formatters::format_window(&window, (*current).clamp(1, (*total).max(1))));
        }
        Command::Fetch { url, headers, retry, compact } => {
            let config = build_config(&cli)?;
            let mut request = retry.apply(config.default_request(url.clone()));
            for header in headers {
                let (name, value) = header
                    .split_once(':')
                    .with_context(|| format!("header must be NAME:VALUE, got {header:?}"))?;
                request = request.header(name.trim(), value.trim());
            }

            tracing::info!(url = %url, "fetching");
            let client = PortalClient::new(config)?;
            let body = client.fetch_json(&request).await.map_err(|e| {
                tracing::error!(error = %e, "fetch failed");
                anyhow::anyhow!(e.to_user_message())
            })?;

            if *compact {
                println!("{}", serde_json::to_string(&body)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&body)?);
            }
        }
        Command::List { url, page, per_page, window, retry } => {
            let config = build_config(&cli)?;
            let page = (*page).max(1);
            let request = retry.apply(config.default_request(with_page_params(url, page, *per_page)));

            let client = PortalClient::new(config)?;
            let listing = client.fetch_list::<Work>(&request).await?;

            let range = listing.showing_range(page, *per_page);
            print!("{}", formatters::format_works(&listing.results, range.from.max(1)));
            println!("{}", formatters::format_showing(range, listing.meta.count));

            let pagination =
                Pagination::new(page, listing.total_pages(*per_page)).with_window(*window);
            let selector = formatters::format_window(&pagination.window(), page);
            if !selector.is_empty() {
                println!("{selector}");
            }
        }
    }

    Ok(())
}
