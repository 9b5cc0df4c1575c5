//! Financial report endpoints

use super::{impl_endpoint_base, original_flag, required_inst_list, EndpointBase};
use crate::transport::Transport;
use bd_core::{param, Endpoint, ReportType, Request, Result};
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

/// Report endpoints
pub struct ReportsEndpoints {
  transport: Arc<Transport>,
}

impl ReportsEndpoints {
  /// Get reports of one type for one nordic instrument
  ///
  /// # Arguments
  ///
  /// * `ins_id` - Instrument id
  /// * `report_type` - Report period
  /// * `max_count` - Max number of reports (year 20, r12 and quarter 40)
  /// * `original` - Ask for reports as originally published
  #[instrument(skip(self))]
  pub async fn by_type(
    &self,
    ins_id: u32,
    report_type: ReportType,
    max_count: Option<u32>,
    original: Option<bool>,
  ) -> Result<Value> {
    let request = Request::new(Endpoint::ReportsByType { ins_id, report_type })
      .param(param::MAX_COUNT, max_count)
      .param(param::ORIGINAL, original_flag(original));
    self.dispatch(request).await
  }

  /// Get year, r12 and quarter reports for one nordic instrument
  ///
  /// # Arguments
  ///
  /// * `max_year_count` - Max year reports (default 10, max 20)
  /// * `max_r12q_count` - Max r12 and quarter reports (default 10, max 40)
  #[instrument(skip(self))]
  pub async fn all_types(
    &self,
    ins_id: u32,
    max_year_count: Option<u32>,
    max_r12q_count: Option<u32>,
    original: Option<bool>,
  ) -> Result<Value> {
    let request = Request::new(Endpoint::Reports { ins_id })
      .param(param::MAX_YEAR_COUNT, max_year_count)
      .param(param::MAX_R12Q_COUNT, max_r12q_count)
      .param(param::ORIGINAL, original_flag(original));
    self.dispatch(request).await
  }

  /// Get report metadata
  #[instrument(skip(self))]
  pub async fn metadata(&self) -> Result<Value> {
    self.dispatch(Request::new(Endpoint::ReportsMetadata)).await
  }

  /// Get year, r12 and quarter reports for a list of nordic instruments (max 50)
  #[instrument(skip(self))]
  pub async fn for_list(
    &self,
    ins_ids: &[u32],
    max_year_count: Option<u32>,
    max_r12q_count: Option<u32>,
    original: Option<bool>,
  ) -> Result<Value> {
    let request = Request::new(Endpoint::ReportsList)
      .param(param::INST_LIST, required_inst_list(ins_ids)?)
      .param(param::MAX_YEAR_COUNT, max_year_count)
      .param(param::MAX_R12Q_COUNT, max_r12q_count)
      .param(param::ORIGINAL, original_flag(original));
    self.dispatch(request).await
  }
}

impl_endpoint_base!(ReportsEndpoints);
