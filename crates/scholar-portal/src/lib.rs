//! Research Portal Fetch Core
//!
//! The shared data layer behind a university research-portal website that
//! browses works, authors and institutions from a scholarly graph API
//! (OpenAlex) and an institutional repository (DSpace).
//!
//! # Features
//!
//! - **Resilient fetch**: bounded retry with exponential backoff on 429, 403
//!   and transport failures, honouring `Retry-After`
//! - **Memoized**: successful responses are cached per request signature
//! - **Pagination**: page-selector windows and "showing X–Y of Z" bounds as
//!   pure functions
//!
//! # Example
//!
//! ```no_run
//! use scholar_portal::{Config, PortalClient, pagination::compute_window};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = PortalClient::new(config.clone())?;
//!
//!     let request = config.default_request("works?search=graphene&page=2&per-page=25");
//!     let page = client.fetch_list::<scholar_portal::models::Work>(&request).await?;
//!     let window = compute_window(2, page.total_pages(25), 5);
//!     println!("{window}");
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod models;
pub mod pagination;
pub mod request;

pub use client::PortalClient;
pub use config::Config;
pub use error::{FetchError, PortalError};
pub use request::FetchRequest;
