//! Stock price endpoints
//!
//! Nordic prices are available on Pro, global prices need Pro+. The global
//! variants answer HTTP 418 otherwise, surfaced as `Error::AccessDenied`.

use super::{impl_endpoint_base, required_inst_list, EndpointBase};
use crate::transport::Transport;
use bd_core::types::format_date;
use bd_core::{param, Endpoint, Request, Result};
use chrono::NaiveDate;
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

/// Stock price and stock split endpoints
pub struct StockPricesEndpoints {
  transport: Arc<Transport>,
}

impl StockPricesEndpoints {
  /// Get stock prices for one nordic instrument
  ///
  /// # Arguments
  ///
  /// * `ins_id` - Instrument id
  /// * `from` - First date to include
  /// * `to` - Last date to include
  /// * `max_count` - Max number of prices (max 20)
  #[instrument(skip(self))]
  pub async fn for_instrument(
    &self,
    ins_id: u32,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    max_count: Option<u32>,
  ) -> Result<Value> {
    let request = Request::new(Endpoint::StockPrices { ins_id })
      .param(param::FROM, from.map(format_date))
      .param(param::TO, to.map(format_date))
      .param(param::MAX_COUNT, max_count);
    self.dispatch(request).await
  }

  /// Get stock prices for a list of nordic instruments (max 50)
  #[instrument(skip(self))]
  pub async fn for_list(
    &self,
    ins_ids: &[u32],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
  ) -> Result<Value> {
    let request = Request::new(Endpoint::StockPricesList)
      .param(param::INST_LIST, required_inst_list(ins_ids)?)
      .param(param::FROM, from.map(format_date))
      .param(param::TO, to.map(format_date));
    self.dispatch(request).await
  }

  /// Get the last stock price of every nordic instrument
  #[instrument(skip(self))]
  pub async fn last(&self) -> Result<Value> {
    self.dispatch(Request::new(Endpoint::LastStockPrices)).await
  }

  /// Get the last stock price of every global instrument
  #[instrument(skip(self))]
  pub async fn last_global(&self) -> Result<Value> {
    self.dispatch(Request::new(Endpoint::LastGlobalStockPrices)).await
  }

  /// Get one stock price per nordic instrument for `date`
  #[instrument(skip(self))]
  pub async fn for_date(&self, date: NaiveDate) -> Result<Value> {
    let request =
      Request::new(Endpoint::StockPricesForDate).param(param::DATE, Some(format_date(date)));
    self.dispatch(request).await
  }

  /// Get one stock price per global instrument for `date`
  #[instrument(skip(self))]
  pub async fn global_for_date(&self, date: NaiveDate) -> Result<Value> {
    let request =
      Request::new(Endpoint::GlobalStockPricesForDate).param(param::DATE, Some(format_date(date)));
    self.dispatch(request).await
  }

  /// Get stock splits for nordic instruments, max one year back
  #[instrument(skip(self))]
  pub async fn splits(&self) -> Result<Value> {
    self.dispatch(Request::new(Endpoint::StockSplits)).await
  }
}

impl_endpoint_base!(StockPricesEndpoints);
