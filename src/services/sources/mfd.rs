//! Tabular HTML provider: one row per day, newest first.
//!
//! Row layout: date, gold, silver, platinum, palladium. The first row is the
//! current day; every following row is history. The page takes no date range,
//! so the lookback window is not applied here.

use std::time::Duration;

use async_trait::async_trait;
use lazy_static::lazy_static;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::error::SourceError;
use crate::models::quote::{HistoricalEntry, HistoricalSeries, Metal, Quote, QuoteBatch};
use crate::services::market_data::{build_http_client, fetch_body, QuoteSource};
use crate::services::parsing::{parse_date, parse_price, parse_price_strict};

pub const MFD_URL: &str = "https://mfd.ru/centrobank/preciousmetals/";

/// Date cell plus one price cell per metal.
const EXPECTED_CELLS: usize = 1 + Metal::ALL.len();

lazy_static! {
    static ref TABLE_SELECTOR: Selector =
        Selector::parse("table.mfd-table").expect("Invalid selector");
    static ref TBODY_SELECTOR: Selector = Selector::parse("tbody").expect("Invalid selector");
}

pub struct MfdTableSource {
    client: Client,
    url: String,
    timeout: Duration,
}

impl MfdTableSource {
    pub fn new(timeout: Duration) -> Self {
        Self::with_url(MFD_URL, timeout)
    }

    pub fn with_url(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: build_http_client(timeout),
            url: url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl QuoteSource for MfdTableSource {
    fn name(&self) -> &'static str {
        "mfd"
    }

    async fn fetch(&self, _lookback_days: u32) -> Result<QuoteBatch, SourceError> {
        let body = fetch_body(&self.client, &self.url, &[], self.timeout).await?;
        parse_table(&body)
    }
}

/// Parse the provider page into current quotes and history.
///
/// Every valid row after the first is kept as history.
pub fn parse_table(html: &str) -> Result<QuoteBatch, SourceError> {
    let document = Html::parse_document(html);

    let table = document
        .select(&TABLE_SELECTOR)
        .next()
        .ok_or_else(|| SourceError::SourceFormat("table 'mfd-table' not found".to_string()))?;
    let tbody = table
        .select(&TBODY_SELECTOR)
        .next()
        .ok_or_else(|| SourceError::SourceFormat("table has no tbody".to_string()))?;

    let rows: Vec<Vec<String>> = child_elements(tbody, "tr")
        .map(|row| {
            child_elements(row, "td")
                .map(|cell| cell.text().collect::<String>().trim().to_string())
                .collect::<Vec<_>>()
        })
        .filter(|cells| !cells.is_empty())
        .collect();

    let (current_row, history_rows) = rows
        .split_first()
        .ok_or_else(|| SourceError::SourceFormat("table has no data rows".to_string()))?;

    if current_row.len() < EXPECTED_CELLS {
        return Err(SourceError::SourceFormat(format!(
            "current row has {} cells, expected {}",
            current_row.len(),
            EXPECTED_CELLS
        )));
    }

    let current_date = match parse_date(&current_row[0]) {
        Ok(date) => Some(date),
        Err(e) => {
            debug!(error = %e, "Current row date unparseable");
            None
        }
    };

    let current = Metal::ALL
        .iter()
        .enumerate()
        .map(|(i, metal)| {
            let price = parse_price(&current_row[i + 1]);
            if !price.is_available() {
                debug!(metal = %metal, cell = %current_row[i + 1], "Current price unparseable");
            }
            Quote::new(*metal, price, current_date)
        })
        .collect();

    let mut entries = Vec::new();

    for (idx, cells) in history_rows.iter().enumerate() {
        let row_number = idx + 2;
        if cells.len() < EXPECTED_CELLS {
            debug!(row = row_number, cells = cells.len(), "Skipping history row: wrong cell count");
            continue;
        }

        let date = match parse_date(&cells[0]) {
            Ok(date) => date,
            Err(e) => {
                debug!(row = row_number, error = %e, "Skipping history row");
                continue;
            }
        };

        for (i, metal) in Metal::ALL.iter().enumerate() {
            match parse_price_strict(&cells[i + 1]) {
                Ok(price) => entries.push((*metal, HistoricalEntry::new(date, price))),
                Err(e) => {
                    debug!(row = row_number, metal = %metal, %date, error = %e, "Skipping history price");
                }
            }
        }
    }

    Ok(QuoteBatch {
        current,
        history: HistoricalSeries::from_entries(entries),
    })
}

fn child_elements<'a>(
    parent: ElementRef<'a>,
    name: &'static str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    parent
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |el| el.value().name() == name)
}
