//! Common types used across bd-* crates

pub mod common;

pub use common::{
  format_date, inst_list, parse_date, CalendarKind, HoldingsKind, InstrumentOption, PriceType, ReportType,
  MAX_INSTRUMENT_LIST,
};
