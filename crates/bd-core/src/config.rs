//! Configuration management for the Borsdata client

use crate::error::{Error, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Environment variables checked for the API key, in order
pub const API_KEY_VARS: [&str; 2] = ["BORSDATA_API_KEY", "API_KEY"];

/// Main configuration struct for the Borsdata client
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
  /// Borsdata API key, sent as `authKey`
  pub api_key: String,

  /// Origin of the API
  pub base_url: String,

  /// Version path segment
  pub version: String,

  /// Requests allowed per rate window
  pub rate_limit: u32,

  /// Length of the rate window in seconds
  pub rate_window_secs: u64,

  /// Pause after every successful call, in milliseconds
  pub success_delay_ms: u64,

  /// Per-attempt HTTP timeout in seconds
  pub timeout_secs: u64,

  /// Wait used when a 429 carries no usable `Retry-After`
  pub default_retry_after_secs: u64,

  /// Cap on consecutive 429 retries; `None` retries forever
  pub max_rate_limit_retries: Option<u32>,

  /// Deadline for a whole logical call, including 429 waits
  pub call_timeout_secs: Option<u64>,
}

impl Config {
  /// Load configuration from `.env` and environment variables
  pub fn from_env() -> Result<Self> {
    dotenv().ok();
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Build a configuration from an arbitrary variable lookup
  pub fn from_lookup<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let api_key = API_KEY_VARS
      .iter()
      .filter_map(|name| lookup(name))
      .map(|value| value.trim().to_string())
      .find(|value| !value.is_empty())
      .ok_or_else(|| {
        Error::MissingCredential(format!("set one of {} in the environment", API_KEY_VARS.join(", ")))
      })?;

    let base_url = lookup("BD_BASE_URL").unwrap_or_else(|| crate::BORSDATA_BASE_URL.to_string());
    let version = lookup("BD_API_VERSION").unwrap_or_else(|| crate::API_VERSION.to_string());

    Ok(Config {
      api_key,
      base_url,
      version,
      rate_limit: parse_or(&lookup, "BD_RATE_LIMIT", crate::DEFAULT_RATE_LIMIT)?,
      rate_window_secs: parse_or(&lookup, "BD_RATE_WINDOW_SECS", crate::DEFAULT_RATE_WINDOW_SECS)?,
      success_delay_ms: parse_or(&lookup, "BD_SUCCESS_DELAY_MS", crate::DEFAULT_SUCCESS_DELAY_MS)?,
      timeout_secs: parse_or(&lookup, "BD_TIMEOUT_SECS", 30)?,
      default_retry_after_secs: parse_or(&lookup, "BD_DEFAULT_RETRY_AFTER_SECS", 1)?,
      max_rate_limit_retries: parse_opt(&lookup, "BD_MAX_RATE_LIMIT_RETRIES")?,
      call_timeout_secs: parse_opt(&lookup, "BD_CALL_TIMEOUT_SECS")?,
    })
  }

  /// Create a config with default values (for testing)
  pub fn default_with_key(api_key: String) -> Self {
    Config {
      api_key,
      base_url: crate::BORSDATA_BASE_URL.to_string(),
      version: crate::API_VERSION.to_string(),
      rate_limit: crate::DEFAULT_RATE_LIMIT,
      rate_window_secs: crate::DEFAULT_RATE_WINDOW_SECS,
      success_delay_ms: crate::DEFAULT_SUCCESS_DELAY_MS,
      timeout_secs: 30,
      default_retry_after_secs: 1,
      max_rate_limit_retries: None,
      call_timeout_secs: None,
    }
  }

  /// Point the config at another origin
  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = base_url.into();
    self
  }

  /// Fail unless the configuration can drive a client
  pub fn validate(&self) -> Result<()> {
    if self.api_key.trim().is_empty() {
      return Err(Error::MissingCredential("API key is empty".to_string()));
    }
    if self.rate_limit == 0 {
      return Err(Error::Config("rate_limit must be greater than zero".to_string()));
    }
    if self.rate_window_secs == 0 {
      return Err(Error::Config("rate_window_secs must be greater than zero".to_string()));
    }
    Ok(())
  }

  /// Post-success throttle as a duration
  pub fn success_delay(&self) -> Duration {
    Duration::from_millis(self.success_delay_ms)
  }
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T>
where
  F: Fn(&str) -> Option<String>,
  T: FromStr,
{
  Ok(parse_opt(lookup, name)?.unwrap_or(default))
}

fn parse_opt<F, T>(lookup: &F, name: &str) -> Result<Option<T>>
where
  F: Fn(&str) -> Option<String>,
  T: FromStr,
{
  match lookup(name) {
    Some(raw) => raw
      .trim()
      .parse()
      .map(Some)
      .map_err(|_| Error::Config(format!("Invalid {}: {:?}", name, raw))),
    None => Ok(None),
  }
}
