//! Numbered sample calls, one per operation, with fixed sample parameters

use crate::commands::query::{self, QuerySubcommands};
use crate::config::Config;
use anyhow::{bail, Result};
use bd_client::BorsdataClient;
use bd_core::{CalendarKind, HoldingsKind, InstrumentOption, PriceType, ReportType};
use chrono::NaiveDate;
use clap::Args;

const INS_ID: u32 = 3;
const KPI_ID: u32 = 2;
const REPORT_TYPE: ReportType = ReportType::Year;
const PRICE_TYPE: PriceType = PriceType::Mean;
const CALC_GROUP: &str = "last";
const CALC: &str = "latest";
const MAX_COUNT: u32 = 2;
const MAX_YEAR_COUNT: u32 = 2;
const MAX_R12Q_COUNT: u32 = 2;
const INST_LIST: [u32; 3] = [2, 3, 6];

/// Highest demo number
pub const DEMO_COUNT: u8 = 28;

#[derive(Args, Debug)]
pub struct DemoCommand {
  /// Demo number (1-28); omit to list them
  number: Option<u8>,
}

pub async fn execute(cmd: DemoCommand, config: Config) -> Result<()> {
  let Some(number) = cmd.number else {
    for n in 1..=DEMO_COUNT {
      if let Some((title, _)) = sample(n) {
        println!("{:>2}  {}", n, title);
      }
    }
    return Ok(());
  };

  let Some((title, command)) = sample(number) else {
    bail!("No demo numbered {}, choose 1-{}", number, DEMO_COUNT);
  };

  println!("# {}", title);
  let client = BorsdataClient::new(config.api_config.clone())?;
  let value = query::run(&client, command).await?;
  if config.compact {
    println!("{}", serde_json::to_string(&value)?);
  } else {
    println!("{}", serde_json::to_string_pretty(&value)?);
  }
  Ok(())
}

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
  NaiveDate::from_ymd_opt(y, m, d)
}

/// Title and command for demo `number`
pub fn sample(number: u8) -> Option<(&'static str, QuerySubcommands)> {
  let from = date(2022, 1, 1);
  let to = date(2022, 12, 31);
  let inst_list = INST_LIST.to_vec();

  let demo = match number {
    1 => ("All nordic instruments", QuerySubcommands::Instruments { option: InstrumentOption::Instruments }),
    2 => ("All global instruments (Pro+)", QuerySubcommands::GlobalInstruments),
    3 => ("Updated nordic instruments", QuerySubcommands::UpdatedInstruments),
    4 => (
      "KPI history, one instrument",
      QuerySubcommands::KpiHistory {
        ins_id: INS_ID,
        kpi_id: KPI_ID,
        report_type: REPORT_TYPE,
        price_type: PRICE_TYPE,
        max_count: Some(MAX_COUNT),
      },
    ),
    5 => (
      "KPI summary, one instrument",
      QuerySubcommands::KpiSummary { ins_id: INS_ID, report_type: REPORT_TYPE, max_count: Some(MAX_COUNT) },
    ),
    6 => (
      "KPI history, list of instruments",
      QuerySubcommands::KpiHistoryList {
        kpi_id: KPI_ID,
        report_type: REPORT_TYPE,
        price_type: PRICE_TYPE,
        inst_list,
        max_count: Some(MAX_COUNT),
      },
    ),
    7 => (
      "KPI screener, one instrument",
      QuerySubcommands::Kpi {
        ins_id: INS_ID,
        kpi_id: KPI_ID,
        calc_group: CALC_GROUP.to_string(),
        calc: CALC.to_string(),
      },
    ),
    8 => (
      "KPI screener, all nordic instruments",
      QuerySubcommands::KpiAll {
        kpi_id: KPI_ID,
        calc_group: CALC_GROUP.to_string(),
        calc: CALC.to_string(),
        global: false,
      },
    ),
    9 => (
      "KPI screener, all global instruments (Pro+)",
      QuerySubcommands::KpiAll {
        kpi_id: KPI_ID,
        calc_group: CALC_GROUP.to_string(),
        calc: CALC.to_string(),
        global: true,
      },
    ),
    10 => ("Nordic KPI calculation time", QuerySubcommands::KpisUpdated),
    11 => ("KPI metadata", QuerySubcommands::KpisMetadata),
    12 => (
      "Reports by type, one instrument",
      QuerySubcommands::Reports {
        ins_id: INS_ID,
        report_type: REPORT_TYPE,
        max_count: Some(MAX_COUNT),
        original: false,
      },
    ),
    13 => (
      "Reports of every type, one instrument",
      QuerySubcommands::ReportsAll {
        ins_id: INS_ID,
        max_year_count: Some(MAX_YEAR_COUNT),
        max_r12q_count: Some(MAX_R12Q_COUNT),
        original: false,
      },
    ),
    14 => ("Report metadata", QuerySubcommands::ReportsMetadata),
    15 => (
      "Reports of every type, list of instruments",
      QuerySubcommands::ReportsList {
        inst_list,
        max_year_count: Some(MAX_YEAR_COUNT),
        max_r12q_count: Some(MAX_R12Q_COUNT),
        original: false,
      },
    ),
    16 => (
      "Stock prices, one instrument",
      QuerySubcommands::StockPrices { ins_id: INS_ID, from, to, max_count: Some(MAX_COUNT) },
    ),
    17 => ("Stock prices, list of instruments", QuerySubcommands::StockPricesList { inst_list, from, to }),
    18 => ("Last nordic stock prices", QuerySubcommands::LastPrices { global: false }),
    19 => ("Last global stock prices (Pro+)", QuerySubcommands::LastPrices { global: true }),
    20 => (
      "Nordic stock prices for a date",
      QuerySubcommands::PricesForDate { date: date(2023, 8, 15)?, global: false },
    ),
    21 => (
      "Global stock prices for a date (Pro+)",
      QuerySubcommands::PricesForDate { date: date(2023, 8, 15)?, global: true },
    ),
    22 => ("Stock splits", QuerySubcommands::StockSplits),
    23 => ("Instrument descriptions", QuerySubcommands::Descriptions { inst_list }),
    24 => ("Insider holdings", QuerySubcommands::Holdings { kind: HoldingsKind::Insider, inst_list }),
    25 => ("Short positions", QuerySubcommands::Holdings { kind: HoldingsKind::Shorts, inst_list }),
    26 => ("Buybacks", QuerySubcommands::Holdings { kind: HoldingsKind::Buyback, inst_list }),
    27 => ("Report calendar", QuerySubcommands::Calendar { kind: CalendarKind::Report, inst_list }),
    28 => ("Dividend calendar", QuerySubcommands::Calendar { kind: CalendarKind::Dividend, inst_list }),
    _ => return None,
  };

  Some(demo)
}
