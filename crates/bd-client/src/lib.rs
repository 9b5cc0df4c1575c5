//! # bd-client
//!
//! A thin Borsdata API client for Rust.
//!
//! ## Features
//!
//! - **Pass-through**: Responses come back as the JSON the API sent
//! - **Async/Await**: Built on tokio and reqwest
//! - **Rate Limiting**: Absorbs HTTP 429 by honoring `Retry-After`, throttles
//!   after every success and shares one limiter across clones
//! - **Typed Errors**: Entitlement gaps (HTTP 418) are distinct from other failures
//! - **Configurable**: Environment-based configuration via bd-core
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bd_client::BorsdataClient;
//! use bd_core::{Config, PriceType, ReportType};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let client = BorsdataClient::new(config)?;
//!
//!     let history = client.kpis().history(3, 2, ReportType::Year, PriceType::Mean, Some(2)).await?;
//!     println!("{}", serde_json::to_string_pretty(&history)?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Rate Limiting
//!
//! Borsdata allows 100 requests per 10 seconds. The client waits on a shared
//! limiter before each call, pauses 110 ms after each success, and retries a
//! 429 after the server-supplied delay. Set `max_rate_limit_retries` or
//! `call_timeout_secs` in the config to bound the retry loop.
//!
//! ## Error Handling
//!
//! All methods return `Result<T, bd_core::Error>`.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod endpoints;
pub mod transport;

// Re-export the main client and common types
pub use bd_core::{Config, Error, Result};
pub use client::BorsdataClient;
pub use transport::{SharedRateLimiter, Sleeper, TokioSleeper, Transport};

// Re-export endpoint groups for direct access if needed
pub use endpoints::{
  calendar::CalendarEndpoints, holdings::HoldingsEndpoints, instruments::InstrumentsEndpoints,
  kpis::KpisEndpoints, reports::ReportsEndpoints, stock_prices::StockPricesEndpoints,
};
