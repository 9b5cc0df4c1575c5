/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! The [`BorsdataClient`] facade over the transport and endpoint groups

use crate::endpoints::{
  calendar::CalendarEndpoints, holdings::HoldingsEndpoints, instruments::InstrumentsEndpoints,
  kpis::KpisEndpoints, reports::ReportsEndpoints, stock_prices::StockPricesEndpoints,
};

use crate::transport::{SharedRateLimiter, Sleeper, Transport};
use bd_core::{Config, Request, Result};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{info, instrument};

/// Main Borsdata API client
///
/// Provides access to all Borsdata endpoints through organized endpoint groups.
/// Handles authentication, rate limiting, and transport concerns automatically.
/// Cloning is cheap and clones share the transport and the rate limiter, so
/// concurrent callers stay under one aggregate ceiling.
///
/// # Examples
///
/// ```rust,no_run
/// use bd_client::BorsdataClient;
/// use bd_core::{Config, InstrumentOption};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = Config::from_env()?;
///     let client = BorsdataClient::new(config)?;
///
///     let data = client.instruments().all(InstrumentOption::Instruments).await?;
///     println!("{}", data["instruments"]);
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct BorsdataClient {
  transport: Arc<Transport>,
}

impl BorsdataClient {
  /// Create a new Borsdata API client
  ///
  /// # Arguments
  ///
  /// * `config` - Configuration containing API key and other settings
  ///
  /// # Errors
  ///
  /// Returns [`Error::MissingCredential`] when the key is empty and
  /// [`Error::Config`] for an unusable rate limit. No request is attempted
  /// in either case.
  pub fn new(config: Config) -> Result<Self> {
    let transport = Arc::new(Transport::new(&config)?);

    info!(
      "Borsdata client ready: {}/{} ({} requests per {}s)",
      transport.base_url(),
      config.version,
      config.rate_limit,
      config.rate_window_secs
    );

    Ok(Self { transport })
  }

  /// Create a new client whose waits go through `sleeper`
  pub fn with_sleeper(config: Config, sleeper: Arc<dyn Sleeper>) -> Result<Self> {
    let transport = Arc::new(Transport::new(&config)?.with_sleeper(sleeper));
    Ok(Self { transport })
  }

  /// Create a new client with custom rate limiting
  ///
  /// # Arguments
  ///
  /// * `config` - Configuration containing API key and other settings
  /// * `rate_limiter` - Limiter shared with other clients
  pub fn with_rate_limiter(config: Config, rate_limiter: SharedRateLimiter) -> Result<Self> {
    let transport = Transport::new(&config)?.with_rate_limiter(rate_limiter);
    Ok(Self { transport: Arc::new(transport) })
  }

  /// Instrument lists and metadata
  pub fn instruments(&self) -> InstrumentsEndpoints {
    InstrumentsEndpoints::new(self.transport.clone())
  }

  /// Insider, short and buyback holdings
  pub fn holdings(&self) -> HoldingsEndpoints {
    HoldingsEndpoints::new(self.transport.clone())
  }

  /// Report and dividend calendars
  pub fn calendar(&self) -> CalendarEndpoints {
    CalendarEndpoints::new(self.transport.clone())
  }

  /// KPI history, summaries and screener values
  ///
  /// # Examples
  ///
  /// ```rust,no_run
  /// # async fn run(client: bd_client::BorsdataClient) -> bd_core::Result<()> {
  /// let updated = client.kpis().updated().await?;
  /// let metadata = client.kpis().metadata().await?;
  /// # Ok(())
  /// # }
  /// ```
  pub fn kpis(&self) -> KpisEndpoints {
    KpisEndpoints::new(self.transport.clone())
  }

  /// Financial reports
  pub fn reports(&self) -> ReportsEndpoints {
    ReportsEndpoints::new(self.transport.clone())
  }

  /// Stock prices and splits
  pub fn stock_prices(&self) -> StockPricesEndpoints {
    StockPricesEndpoints::new(self.transport.clone())
  }

  /// Dispatch any request descriptor, decoding the body as `T`
  ///
  /// The typed endpoint groups are thin wrappers over this.
  ///
  /// # Examples
  ///
  /// ```rust,no_run
  /// # async fn run(client: bd_client::BorsdataClient) -> bd_core::Result<()> {
  /// use bd_core::{param, Endpoint, Request};
  ///
  /// let request = Request::new(Endpoint::StockPrices { ins_id: 3 }).param(param::MAX_COUNT, Some(5));
  /// let prices: serde_json::Value = client.call(&request).await?;
  /// # Ok(())
  /// # }
  /// ```
  #[instrument(skip(self, request), fields(endpoint = request.endpoint().name()))]
  pub async fn call<T>(&self, request: &Request) -> Result<T>
  where
    T: DeserializeOwned,
  {
    self.transport.get(request).await
  }

  /// Wait for rate limit to allow next request
  ///
  /// Most users won't need to call this directly as every attempt waits automatically.
  pub async fn wait_for_rate_limit(&self) -> Result<()> {
    self.transport.wait_for_rate_limit().await;
    Ok(())
  }

  /// Number of 429 responses absorbed by retrying
  pub fn rate_limited_count(&self) -> u64 {
    self.transport.rate_limited_count()
  }

  /// The transport shared by every endpoint group
  pub fn transport(&self) -> &Arc<Transport> {
    &self.transport
  }
}

impl std::fmt::Debug for BorsdataClient {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("BorsdataClient")
      .field("transport", &self.transport)
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use bd_core::Error;
  use governor::{Quota, RateLimiter};
  use std::num::NonZeroU32;

  #[test]
  fn test_client_creation() {
    let config = Config::default_with_key("test_key".to_string());

    let client = BorsdataClient::new(config).expect("Failed to create client");
    assert_eq!(client.transport().base_url(), bd_core::BORSDATA_BASE_URL);
    assert_eq!(client.rate_limited_count(), 0);
  }

  #[test]
  fn test_missing_key_rejected() {
    let config = Config::default_with_key(String::new());
    assert!(matches!(BorsdataClient::new(config), Err(Error::MissingCredential(_))));
  }

  #[test]
  fn test_zero_rate_limit_rejected() {
    let mut config = Config::default_with_key("k".to_string());
    config.rate_limit = 0;
    assert!(matches!(BorsdataClient::new(config), Err(Error::Config(_))));
  }

  #[tokio::test]
  async fn test_clones_share_rate_limiter() {
    let mut config = Config::default_with_key("k".to_string());
    config.rate_limit = 2;
    config.rate_window_secs = 3600;
    let client = BorsdataClient::new(config).unwrap();
    let clone = client.clone();

    assert!(client.transport().rate_limiter().check().is_ok());
    assert!(clone.transport().rate_limiter().check().is_ok());
    assert!(client.transport().rate_limiter().check().is_err());
  }

  #[test]
  fn test_clients_can_share_one_limiter() {
    let quota = Quota::per_hour(NonZeroU32::new(1).unwrap());
    let shared: SharedRateLimiter = Arc::new(RateLimiter::direct(quota));
    let first = BorsdataClient::with_rate_limiter(Config::default_with_key("a".to_string()), shared.clone()).unwrap();
    let second = BorsdataClient::with_rate_limiter(Config::default_with_key("b".to_string()), shared).unwrap();

    assert!(first.transport().rate_limiter().check().is_ok());
    assert!(second.transport().rate_limiter().check().is_err());
  }
}
