//! Report and dividend calendars

use super::{impl_endpoint_base, required_inst_list, EndpointBase};
use crate::transport::Transport;
use bd_core::{param, CalendarKind, Endpoint, Request, Result};
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

/// Report and dividend calendar endpoints
pub struct CalendarEndpoints {
  transport: Arc<Transport>,
}

impl CalendarEndpoints {
  /// Get the calendar of the given kind for a list of instruments (max 50)
  #[instrument(skip(self))]
  pub async fn calendar(&self, kind: CalendarKind, ins_ids: &[u32]) -> Result<Value> {
    let request =
      Request::new(Endpoint::Calendar(kind)).param(param::INST_LIST, required_inst_list(ins_ids)?);
    self.dispatch(request).await
  }

  /// Upcoming report dates
  pub async fn report(&self, ins_ids: &[u32]) -> Result<Value> {
    self.calendar(CalendarKind::Report, ins_ids).await
  }

  /// Upcoming dividend dates
  pub async fn dividend(&self, ins_ids: &[u32]) -> Result<Value> {
    self.calendar(CalendarKind::Dividend, ins_ids).await
  }
}

impl_endpoint_base!(CalendarEndpoints);
