//! KPI endpoints
//!
//! Covers both KPI history (per report period and price basis) and the KPI
//! screener (one calculated value per instrument, grouped by calculation
//! group and calculation).

use super::{impl_endpoint_base, required_inst_list, EndpointBase};
use crate::transport::Transport;
use bd_core::{param, Endpoint, PriceType, ReportType, Request, Result};
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

/// KPI history, summary and screener endpoints
pub struct KpisEndpoints {
  transport: Arc<Transport>,
}

impl KpisEndpoints {
  /// Get KPI history for one nordic instrument
  ///
  /// # Arguments
  ///
  /// * `ins_id` - Instrument id
  /// * `kpi_id` - KPI id, see [`KpisEndpoints::metadata`]
  /// * `report_type` - Report period
  /// * `price_type` - Price basis
  /// * `max_count` - Max number of results (year 20, r12 and quarter 40)
  ///
  /// # Examples
  ///
  /// ```rust,no_run
  /// # async fn run(client: bd_client::BorsdataClient) -> bd_core::Result<()> {
  /// use bd_core::{PriceType, ReportType};
  ///
  /// let history = client.kpis().history(3, 2, ReportType::Year, PriceType::Mean, Some(2)).await?;
  /// println!("{}", history);
  /// # Ok(())
  /// # }
  /// ```
  #[instrument(skip(self))]
  pub async fn history(
    &self,
    ins_id: u32,
    kpi_id: u32,
    report_type: ReportType,
    price_type: PriceType,
    max_count: Option<u32>,
  ) -> Result<Value> {
    let request = Request::new(Endpoint::KpiHistory { ins_id, kpi_id, report_type, price_type })
      .param(param::MAX_COUNT, max_count);
    self.dispatch(request).await
  }

  /// Get the KPI summary list for one nordic instrument
  #[instrument(skip(self))]
  pub async fn summary(
    &self,
    ins_id: u32,
    report_type: ReportType,
    max_count: Option<u32>,
  ) -> Result<Value> {
    let request = Request::new(Endpoint::KpiSummary { ins_id, report_type })
      .param(param::MAX_COUNT, max_count);
    self.dispatch(request).await
  }

  /// Get KPI history for a list of nordic instruments (max 50)
  #[instrument(skip(self))]
  pub async fn history_for_list(
    &self,
    kpi_id: u32,
    report_type: ReportType,
    price_type: PriceType,
    ins_ids: &[u32],
    max_count: Option<u32>,
  ) -> Result<Value> {
    let request = Request::new(Endpoint::KpiHistoryList { kpi_id, report_type, price_type })
      .param(param::INST_LIST, required_inst_list(ins_ids)?)
      .param(param::MAX_COUNT, max_count);
    self.dispatch(request).await
  }

  /// Get one screener value for one nordic instrument
  #[instrument(skip(self))]
  pub async fn screener(
    &self,
    ins_id: u32,
    kpi_id: u32,
    calc_group: &str,
    calc: &str,
  ) -> Result<Value> {
    let endpoint = Endpoint::KpiScreener {
      ins_id,
      kpi_id,
      calc_group: calc_group.to_string(),
      calc: calc.to_string(),
    };
    self.dispatch(Request::new(endpoint)).await
  }

  /// Get one screener value for every nordic instrument
  #[instrument(skip(self))]
  pub async fn screener_all(&self, kpi_id: u32, calc_group: &str, calc: &str) -> Result<Value> {
    let endpoint =
      Endpoint::KpiScreenerAll { kpi_id, calc_group: calc_group.to_string(), calc: calc.to_string() };
    self.dispatch(Request::new(endpoint)).await
  }

  /// Get one screener value for every global instrument (requires Pro+)
  #[instrument(skip(self))]
  pub async fn screener_global(&self, kpi_id: u32, calc_group: &str, calc: &str) -> Result<Value> {
    let endpoint = Endpoint::KpiScreenerGlobal {
      kpi_id,
      calc_group: calc_group.to_string(),
      calc: calc.to_string(),
    };
    self.dispatch(Request::new(endpoint)).await
  }

  /// Get the time of the last nordic KPI calculation
  #[instrument(skip(self))]
  pub async fn updated(&self) -> Result<Value> {
    self.dispatch(Request::new(Endpoint::KpisUpdated)).await
  }

  /// Get KPI metadata
  #[instrument(skip(self))]
  pub async fn metadata(&self) -> Result<Value> {
    self.dispatch(Request::new(Endpoint::KpisMetadata)).await
  }
}

impl_endpoint_base!(KpisEndpoints);
