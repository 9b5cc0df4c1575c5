//! Path-segment and parameter types shared by the endpoint table

use crate::error::Error;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Declares a closed set of wire values with `Display` and case-insensitive `FromStr`
macro_rules! wire_enum {
  (
    $(#[$meta:meta])*
    $name:ident { $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)? }
  ) => {
    $(#[$meta])*
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum $name {
      $( $(#[$vmeta])* $variant ),+
    }

    impl $name {
      /// Every value, in declaration order
      pub const ALL: &'static [$name] = &[$($name::$variant),+];

      /// Wire representation used in URL paths
      pub fn as_str(&self) -> &'static str {
        match self {
          $($name::$variant => $wire),+
        }
      }
    }

    impl std::fmt::Display for $name {
      fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
      }
    }

    impl std::str::FromStr for $name {
      type Err = Error;

      fn from_str(s: &str) -> Result<Self, Self::Err> {
        $name::ALL
          .iter()
          .copied()
          .find(|value| value.as_str().eq_ignore_ascii_case(s.trim()))
          .ok_or_else(|| {
            let expected: Vec<&str> = $name::ALL.iter().map(|v| v.as_str()).collect();
            Error::InvalidParameter(format!(
              "{:?} is not a valid {}, expected one of: {}",
              s,
              stringify!($name),
              expected.join(", ")
            ))
          })
      }
    }
  };
}

wire_enum! {
  /// Report period used by KPI and report endpoints
  ReportType {
    /// Full-year reports
    Year => "year",
    /// Rolling twelve months
    R12 => "r12",
    /// Quarterly reports
    Quarter => "quarter",
  }
}

wire_enum! {
  /// Price basis for KPI history
  PriceType {
    /// Lowest price in the period
    Low => "low",
    /// Mean price in the period
    Mean => "mean",
    /// Highest price in the period
    High => "high",
  }
}

wire_enum! {
  /// Instrument list or metadata collection served at the API root
  InstrumentOption {
    /// All branches
    Branches => "branches",
    /// All nordic countries
    Countries => "countries",
    /// All markets
    Markets => "markets",
    /// All sectors
    Sectors => "sectors",
    /// All nordic instruments
    Instruments => "instruments",
    /// Translations for branch, sector and country names
    TranslationMetadata => "translationmetadata",
  }
}

wire_enum! {
  /// Kind of holdings data
  HoldingsKind {
    /// Insider transactions
    Insider => "insider",
    /// Short positions
    Shorts => "shorts",
    /// Share buybacks
    Buyback => "buyback",
  }
}

wire_enum! {
  /// Kind of calendar
  CalendarKind {
    /// Report release dates
    Report => "report",
    /// Dividend dates
    Dividend => "dividend",
  }
}

/// Maximum number of instruments accepted in one `instList`
pub const MAX_INSTRUMENT_LIST: usize = 50;

/// Render instrument ids as the comma separated `instList` value
pub fn inst_list(ids: &[u32]) -> Result<String, Error> {
  if ids.is_empty() {
    return Err(Error::InvalidParameter("instList must contain at least one instrument".to_string()));
  }
  if ids.len() > MAX_INSTRUMENT_LIST {
    return Err(Error::InvalidParameter(format!(
      "instList accepts at most {} instruments, got {}",
      MAX_INSTRUMENT_LIST,
      ids.len()
    )));
  }
  Ok(ids.iter().map(u32::to_string).collect::<Vec<_>>().join(","))
}

/// Render a date the way `from`, `to` and `date` expect it
pub fn format_date(date: NaiveDate) -> String {
  date.format(crate::DATE_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> Result<NaiveDate, Error> {
  NaiveDate::parse_from_str(s.trim(), crate::DATE_FORMAT)
    .map_err(|e| Error::InvalidParameter(format!("{:?} is not a YYYY-MM-DD date: {}", s, e)))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_report_type_parsing() {
    assert_eq!("year".parse::<ReportType>().unwrap(), ReportType::Year);
    assert_eq!("R12".parse::<ReportType>().unwrap(), ReportType::R12);
    assert_eq!(ReportType::Quarter.to_string(), "quarter");
    assert!("weekly".parse::<ReportType>().is_err());
  }

  #[test]
  fn test_instrument_option_wire_names() {
    assert_eq!(InstrumentOption::TranslationMetadata.as_str(), "translationmetadata");
    assert_eq!(InstrumentOption::ALL.len(), 6);
    assert_eq!(
      "translationMetadata".parse::<InstrumentOption>().unwrap(),
      InstrumentOption::TranslationMetadata
    );
  }

  #[test]
  fn test_parse_error_lists_choices() {
    let err = "options".parse::<HoldingsKind>().unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("insider, shorts, buyback"), "{}", msg);
  }

  #[test]
  fn test_inst_list() {
    assert_eq!(inst_list(&[2, 3, 6]).unwrap(), "2,3,6");
    assert!(inst_list(&[]).is_err());

    let too_many: Vec<u32> = (1..=51).collect();
    assert!(matches!(inst_list(&too_many), Err(Error::InvalidParameter(_))));
    assert!(inst_list(&too_many[..50]).is_ok());
  }

  #[test]
  fn test_dates() {
    let date = parse_date("2023-08-15").unwrap();
    assert_eq!(format_date(date), "2023-08-15");
    assert!(parse_date("15/08/2023").is_err());
  }
}
