use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

/// Textual sentinel for a missing price or date.
pub const UNAVAILABLE: &str = "N/A";

/// Date format used by both providers and the quote payloads.
pub const QUOTE_DATE_FORMAT: &str = "%d.%m.%Y";

/// Display unit shared by every quote.
pub const QUOTE_UNIT: &str = "RUB/gram";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Metal {
    Gold,
    Silver,
    Platinum,
    Palladium,
}

impl Metal {
    /// All tracked metals in display order.
    pub const ALL: [Metal; 4] = [Metal::Gold, Metal::Silver, Metal::Platinum, Metal::Palladium];

    /// Chemical symbol, used as the key of the recommendation payload.
    pub fn code(&self) -> &'static str {
        match self {
            Metal::Gold => "Au",
            Metal::Silver => "Ag",
            Metal::Platinum => "Pt",
            Metal::Palladium => "Pd",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Metal::Gold => "Gold",
            Metal::Silver => "Silver",
            Metal::Platinum => "Platinum",
            Metal::Palladium => "Palladium",
        }
    }
}

impl fmt::Display for Metal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A validated price, or the "unavailable" sentinel (distinct from zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Price {
    Available(Decimal),
    #[default]
    Unavailable,
}

impl Price {
    pub fn is_available(&self) -> bool {
        matches!(self, Price::Available(_))
    }

    pub fn value(&self) -> Option<Decimal> {
        match self {
            Price::Available(v) => Some(*v),
            Price::Unavailable => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.value().and_then(|v| v.to_f64())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Available(v) => write!(f, "{}", v),
            Price::Unavailable => f.write_str(UNAVAILABLE),
        }
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Latest observed quote for one metal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub metal: Metal,
    pub price: Price,
    pub date: Option<NaiveDate>,
    pub unit: &'static str,
}

impl Quote {
    pub fn new(metal: Metal, price: Price, date: Option<NaiveDate>) -> Self {
        Self {
            metal,
            price,
            date,
            unit: QUOTE_UNIT,
        }
    }

    pub fn unavailable(metal: Metal) -> Self {
        Self::new(metal, Price::Unavailable, None)
    }

    /// The date rendered as `DD.MM.YYYY`, or the sentinel.
    pub fn date_label(&self) -> String {
        format_date_or_sentinel(self.date)
    }
}

pub fn format_date_or_sentinel(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(QUOTE_DATE_FORMAT).to_string())
        .unwrap_or_else(|| UNAVAILABLE.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoricalEntry {
    pub date: NaiveDate,
    pub price: Decimal,
}

impl HistoricalEntry {
    pub fn new(date: NaiveDate, price: Decimal) -> Self {
        Self { date, price }
    }
}

/// Per-metal price history, ascending by date with no duplicate dates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoricalSeries {
    series: BTreeMap<Metal, Vec<HistoricalEntry>>,
}

impl HistoricalSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a series from unordered entries.
    ///
    /// Entries are sorted ascending by date; when a metal has the same date more
    /// than once, the first occurrence wins.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Metal, HistoricalEntry)>,
    {
        let mut series: BTreeMap<Metal, Vec<HistoricalEntry>> = BTreeMap::new();
        for (metal, entry) in entries {
            series.entry(metal).or_default().push(entry);
        }
        for entries in series.values_mut() {
            entries.sort_by_key(|e| e.date);
            entries.dedup_by_key(|e| e.date);
        }
        Self { series }
    }

    pub fn get(&self, metal: Metal) -> &[HistoricalEntry] {
        self.series.get(&metal).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True when no metal has any entry.
    pub fn is_empty(&self) -> bool {
        self.series.values().all(Vec::is_empty)
    }
}

/// Normalized output of one successful source fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteBatch {
    /// Current-day quotes for the metals the source reported.
    pub current: Vec<Quote>,
    pub history: HistoricalSeries,
}
