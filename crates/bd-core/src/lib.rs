//! Core types for the Borsdata client: configuration, errors, and the
//! endpoint table shared by the client and the CLI.

pub mod config;
pub mod endpoint;
pub mod error;
pub mod request;
pub mod types;

pub use config::Config;
pub use endpoint::{param, Endpoint};
pub use error::{Error, Result};
pub use request::Request;
pub use types::{CalendarKind, HoldingsKind, InstrumentOption, PriceType, ReportType};

/// Origin of the Borsdata API
pub const BORSDATA_BASE_URL: &str = "https://apiservice.borsdata.se";

/// API version path segment
pub const API_VERSION: &str = "v1";

/// API rate limits
pub const DEFAULT_RATE_LIMIT: u32 = 100; // requests per window
pub const DEFAULT_RATE_WINDOW_SECS: u64 = 10;

/// Pause after each successful call, keeps sequential callers under the ceiling
pub const DEFAULT_SUCCESS_DELAY_MS: u64 = 110;

/// Format used for `from`, `to` and `date` parameters
pub const DATE_FORMAT: &str = "%Y-%m-%d";
