//! Declarative table of Borsdata endpoints.
//!
//! Every operation the API offers is one [`Endpoint`] variant. A variant knows
//! how to render its path (with path segments substituted) and which optional
//! query parameters it may forward. Nothing here performs I/O.

use crate::types::{CalendarKind, HoldingsKind, InstrumentOption, PriceType, ReportType};

/// Query parameter names understood by the API
pub mod param {
  /// Comma separated instrument ids
  pub const INST_LIST: &str = "instList";
  /// Max number of results
  pub const MAX_COUNT: &str = "maxCount";
  /// Max number of year reports
  pub const MAX_YEAR_COUNT: &str = "maxYearCount";
  /// Max number of r12 and quarter reports
  pub const MAX_R12Q_COUNT: &str = "maxR12QCount";
  /// Request reports as originally published
  pub const ORIGINAL: &str = "original";
  /// Start date, `YYYY-MM-DD`
  pub const FROM: &str = "from";
  /// End date, `YYYY-MM-DD`
  pub const TO: &str = "to";
  /// Single date, `YYYY-MM-DD`
  pub const DATE: &str = "date";
}

use param::*;

/// The current supported Borsdata API operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
  // Instruments
  Instruments(InstrumentOption),
  GlobalInstruments,
  UpdatedInstruments,
  InstrumentDescriptions,

  // Holdings and calendars
  Holdings(HoldingsKind),
  Calendar(CalendarKind),

  // KPI history
  KpiHistory { ins_id: u32, kpi_id: u32, report_type: ReportType, price_type: PriceType },
  KpiSummary { ins_id: u32, report_type: ReportType },
  KpiHistoryList { kpi_id: u32, report_type: ReportType, price_type: PriceType },

  // KPI screener
  KpiScreener { ins_id: u32, kpi_id: u32, calc_group: String, calc: String },
  KpiScreenerAll { kpi_id: u32, calc_group: String, calc: String },
  KpiScreenerGlobal { kpi_id: u32, calc_group: String, calc: String },
  KpisUpdated,
  KpisMetadata,

  // Reports
  ReportsByType { ins_id: u32, report_type: ReportType },
  Reports { ins_id: u32 },
  ReportsMetadata,
  ReportsList,

  // Stock prices
  StockPrices { ins_id: u32 },
  StockPricesList,
  LastStockPrices,
  LastGlobalStockPrices,
  StockPricesForDate,
  GlobalStockPricesForDate,
  StockSplits,
}

impl Endpoint {
  /// Path relative to the versioned API root, segments substituted
  pub fn path(&self) -> String {
    match self {
      Endpoint::Instruments(option) => option.to_string(),
      Endpoint::GlobalInstruments => "instruments/global".to_string(),
      Endpoint::UpdatedInstruments => "instruments/updated".to_string(),
      Endpoint::InstrumentDescriptions => "instruments/description".to_string(),

      Endpoint::Holdings(kind) => format!("holdings/{}", kind),
      Endpoint::Calendar(kind) => format!("instruments/{}/calendar", kind),

      Endpoint::KpiHistory { ins_id, kpi_id, report_type, price_type } => {
        format!("instruments/{}/kpis/{}/{}/{}/history", ins_id, kpi_id, report_type, price_type)
      }
      Endpoint::KpiSummary { ins_id, report_type } => {
        format!("instruments/{}/kpis/{}/summary", ins_id, report_type)
      }
      Endpoint::KpiHistoryList { kpi_id, report_type, price_type } => {
        format!("instruments/kpis/{}/{}/{}/history", kpi_id, report_type, price_type)
      }

      Endpoint::KpiScreener { ins_id, kpi_id, calc_group, calc } => {
        format!("instruments/{}/kpis/{}/{}/{}", ins_id, kpi_id, calc_group, calc)
      }
      Endpoint::KpiScreenerAll { kpi_id, calc_group, calc } => {
        format!("instruments/kpis/{}/{}/{}", kpi_id, calc_group, calc)
      }
      Endpoint::KpiScreenerGlobal { kpi_id, calc_group, calc } => {
        format!("instruments/global/kpis/{}/{}/{}", kpi_id, calc_group, calc)
      }
      Endpoint::KpisUpdated => "instruments/kpis/updated".to_string(),
      Endpoint::KpisMetadata => "instruments/kpis/metadata".to_string(),

      Endpoint::ReportsByType { ins_id, report_type } => {
        format!("instruments/{}/reports/{}", ins_id, report_type)
      }
      Endpoint::Reports { ins_id } => format!("instruments/{}/reports", ins_id),
      Endpoint::ReportsMetadata => "instruments/reports/metadata".to_string(),
      Endpoint::ReportsList => "instruments/reports".to_string(),

      Endpoint::StockPrices { ins_id } => format!("instruments/{}/stockprices", ins_id),
      Endpoint::StockPricesList => "instruments/stockprices".to_string(),
      Endpoint::LastStockPrices => "instruments/stockprices/last".to_string(),
      Endpoint::LastGlobalStockPrices => "instruments/stockprices/global/last".to_string(),
      Endpoint::StockPricesForDate => "instruments/stockprices/date".to_string(),
      Endpoint::GlobalStockPricesForDate => "instruments/stockprices/global/date".to_string(),
      Endpoint::StockSplits => "instruments/stockSplits".to_string(),
    }
  }

  /// Optional query parameters the endpoint forwards
  pub fn allowed_params(&self) -> &'static [&'static str] {
    match self {
      Endpoint::InstrumentDescriptions | Endpoint::Holdings(_) | Endpoint::Calendar(_) => {
        &[INST_LIST]
      }
      Endpoint::KpiHistory { .. } | Endpoint::KpiSummary { .. } => &[MAX_COUNT],
      Endpoint::KpiHistoryList { .. } => &[INST_LIST, MAX_COUNT],
      Endpoint::ReportsByType { .. } => &[MAX_COUNT, ORIGINAL],
      Endpoint::Reports { .. } => &[MAX_YEAR_COUNT, MAX_R12Q_COUNT, ORIGINAL],
      Endpoint::ReportsList => &[INST_LIST, MAX_YEAR_COUNT, MAX_R12Q_COUNT, ORIGINAL],
      Endpoint::StockPrices { .. } => &[FROM, TO, MAX_COUNT],
      Endpoint::StockPricesList => &[INST_LIST, FROM, TO],
      Endpoint::StockPricesForDate | Endpoint::GlobalStockPricesForDate => &[DATE],
      Endpoint::Instruments(_)
      | Endpoint::GlobalInstruments
      | Endpoint::UpdatedInstruments
      | Endpoint::KpiScreener { .. }
      | Endpoint::KpiScreenerAll { .. }
      | Endpoint::KpiScreenerGlobal { .. }
      | Endpoint::KpisUpdated
      | Endpoint::KpisMetadata
      | Endpoint::ReportsMetadata
      | Endpoint::LastStockPrices
      | Endpoint::LastGlobalStockPrices
      | Endpoint::StockSplits => &[],
    }
  }

  /// Whether `name` may be forwarded to this endpoint
  pub fn allows(&self, name: &str) -> bool {
    self.allowed_params().contains(&name)
  }

  /// Short operation name for logs
  pub fn name(&self) -> &'static str {
    match self {
      Endpoint::Instruments(_) => "instruments",
      Endpoint::GlobalInstruments => "global_instruments",
      Endpoint::UpdatedInstruments => "updated_instruments",
      Endpoint::InstrumentDescriptions => "instrument_descriptions",
      Endpoint::Holdings(_) => "holdings",
      Endpoint::Calendar(_) => "calendar",
      Endpoint::KpiHistory { .. } => "kpi_history",
      Endpoint::KpiSummary { .. } => "kpi_summary",
      Endpoint::KpiHistoryList { .. } => "kpi_history_list",
      Endpoint::KpiScreener { .. } => "kpi_screener",
      Endpoint::KpiScreenerAll { .. } => "kpi_screener_all",
      Endpoint::KpiScreenerGlobal { .. } => "kpi_screener_global",
      Endpoint::KpisUpdated => "kpis_updated",
      Endpoint::KpisMetadata => "kpis_metadata",
      Endpoint::ReportsByType { .. } => "reports_by_type",
      Endpoint::Reports { .. } => "reports",
      Endpoint::ReportsMetadata => "reports_metadata",
      Endpoint::ReportsList => "reports_list",
      Endpoint::StockPrices { .. } => "stock_prices",
      Endpoint::StockPricesList => "stock_prices_list",
      Endpoint::LastStockPrices => "last_stock_prices",
      Endpoint::LastGlobalStockPrices => "last_global_stock_prices",
      Endpoint::StockPricesForDate => "stock_prices_for_date",
      Endpoint::GlobalStockPricesForDate => "global_stock_prices_for_date",
      Endpoint::StockSplits => "stock_splits",
    }
  }

  /// Endpoints that need a Pro+ (global) subscription
  pub fn requires_global_access(&self) -> bool {
    matches!(
      self,
      Endpoint::GlobalInstruments
        | Endpoint::KpiScreenerGlobal { .. }
        | Endpoint::LastGlobalStockPrices
        | Endpoint::GlobalStockPricesForDate
    )
  }
}

impl std::fmt::Display for Endpoint {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.path())
  }
}
