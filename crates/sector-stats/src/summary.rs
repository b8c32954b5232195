use std::cmp::Ordering;

use chrono::NaiveDate;
use scoring_core::PriceBar;
use serde::{Deserialize, Serialize};

use crate::prices::{calculate_returns, high_low, sample_sparkline};
use crate::stats::{average, median, pct_change, rank_ascending};

pub const VALID_SORT_FIELDS: [&str; 6] = ["52whigh", "ytd", "1y", "marketcap", "ps", "pe"];

/// Points kept when a price history is reduced to a sparkline.
pub const SPARKLINE_POINTS: usize = 30;

/// One company row in a sector overview.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StockEntry {
    pub ticker: String,
    pub name: String,
    pub price: Option<f64>,
    pub market_cap: f64,
    pub ps: Option<f64>,
    pub pe: Option<f64>,
    pub ytd_change: Option<f64>,
    pub one_month_change: Option<f64>,
    pub one_year_change: Option<f64>,
    /// Percent below the 52-week high (0 at the high, negative below it)
    #[serde(rename = "from52wHigh")]
    pub from_52w_high: Option<f64>,
    #[serde(rename = "high52w")]
    pub high_52w: Option<f64>,
    #[serde(rename = "low52w")]
    pub low_52w: Option<f64>,
    pub rs_rank: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sparkline: Vec<f64>,
}

impl StockEntry {
    pub fn new(ticker: &str, name: &str) -> Self {
        Self {
            ticker: ticker.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Fill price-derived fields from a daily history in ascending date order.
    ///
    /// The 52-week range covers bars dated within one year of `today`.
    pub fn with_price_history(mut self, bars: &[PriceBar], today: NaiveDate) -> Self {
        let Some(last) = bars.last() else {
            return self;
        };

        let (ytd, one_month, one_year) = calculate_returns(bars, today);
        self.ytd_change = ytd;
        self.one_month_change = one_month;
        self.one_year_change = one_year;

        let year_ago = today
            .checked_sub_months(chrono::Months::new(12))
            .unwrap_or(NaiveDate::MIN);
        let window_start = bars.partition_point(|bar| bar.date < year_ago);
        let (high, low) = high_low(&bars[window_start..]);
        self.high_52w = high;
        self.low_52w = low;
        self.from_52w_high = high.and_then(|h| pct_change(last.close, h));

        self.price = Some(last.close);
        self.sparkline = sample_sparkline(bars, SPARKLINE_POINTS);
        self
    }
}

/// Aggregate valuation and performance for a sector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorSummary {
    pub stock_count: usize,
    pub avg_ps: Option<f64>,
    pub avg_pe: Option<f64>,
    pub median_ytd: Option<f64>,
    #[serde(rename = "median1y")]
    pub median_1y: Option<f64>,
}

pub fn calculate_summary(entries: &[StockEntry]) -> SectorSummary {
    SectorSummary {
        stock_count: entries.len(),
        avg_ps: average(entries.iter().map(|e| e.ps)),
        avg_pe: average(entries.iter().map(|e| e.pe)),
        median_ytd: median(entries.iter().map(|e| e.ytd_change)),
        median_1y: median(entries.iter().map(|e| e.one_year_change)),
    }
}

/// Relative strength rank by 1-year change, 1 = weakest.
/// Entries without a 1-year change are left unranked.
pub fn calculate_rs_rank(entries: &mut [StockEntry]) {
    let metrics: Vec<Option<f64>> = entries.iter().map(|e| e.one_year_change).collect();
    for (entry, rank) in entries.iter_mut().zip(rank_ascending(&metrics)) {
        entry.rs_rank = rank;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortField {
    #[serde(rename = "52whigh")]
    From52wHigh,
    #[serde(rename = "ytd")]
    Ytd,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "marketcap")]
    MarketCap,
    #[serde(rename = "ps")]
    Ps,
    #[serde(rename = "pe")]
    Pe,
}

impl SortField {
    pub fn parse(field: &str) -> Option<Self> {
        match field {
            "52whigh" => Some(Self::From52wHigh),
            "ytd" => Some(Self::Ytd),
            "1y" => Some(Self::OneYear),
            "marketcap" => Some(Self::MarketCap),
            "ps" => Some(Self::Ps),
            "pe" => Some(Self::Pe),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::From52wHigh => "52whigh",
            Self::Ytd => "ytd",
            Self::OneYear => "1y",
            Self::MarketCap => "marketcap",
            Self::Ps => "ps",
            Self::Pe => "pe",
        }
    }

    /// Cheaper multiples sort first; everything else sorts strongest first.
    fn ascending(&self) -> bool {
        matches!(self, Self::Ps | Self::Pe)
    }

    fn key(&self, entry: &StockEntry) -> Option<f64> {
        match self {
            Self::From52wHigh => entry.from_52w_high,
            Self::Ytd => entry.ytd_change,
            Self::OneYear => entry.one_year_change,
            Self::MarketCap => Some(entry.market_cap),
            Self::Ps => entry.ps,
            Self::Pe => entry.pe,
        }
    }
}

/// Stable sort by `field`. Entries missing the value go last.
pub fn sort_stocks(entries: &mut [StockEntry], field: SortField) {
    entries.sort_by(|a, b| match (field.key(a), field.key(b)) {
        (Some(x), Some(y)) => {
            if field.ascending() {
                x.total_cmp(&y)
            } else {
                y.total_cmp(&x)
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn entry(ticker: &str) -> StockEntry {
        StockEntry::new(ticker, &format!("{ticker} Corp"))
    }

    fn tickers(entries: &[StockEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.ticker.as_str()).collect()
    }

    #[test]
    fn test_calculate_summary() {
        let entries = vec![
            StockEntry {
                ps: Some(5.0),
                pe: Some(20.0),
                ytd_change: Some(-10.0),
                one_year_change: Some(-20.0),
                ..entry("A")
            },
            StockEntry {
                ps: Some(10.0),
                pe: Some(30.0),
                ytd_change: Some(-5.0),
                one_year_change: Some(10.0),
                ..entry("B")
            },
            StockEntry {
                ps: Some(15.0),
                pe: None,
                ytd_change: Some(5.0),
                one_year_change: Some(30.0),
                ..entry("C")
            },
        ];

        let summary = calculate_summary(&entries);
        assert_eq!(summary.stock_count, 3);
        assert_eq!(summary.avg_ps, Some(10.0));
        assert_eq!(summary.avg_pe, Some(25.0));
        assert_eq!(summary.median_ytd, Some(-5.0));
        assert_eq!(summary.median_1y, Some(10.0));
    }

    #[test]
    fn test_summary_of_empty_sector() {
        let summary = calculate_summary(&[]);
        assert_eq!(summary, SectorSummary::default());
    }

    #[test]
    fn test_calculate_rs_rank() {
        let mut entries: Vec<StockEntry> = [
            ("A", Some(-20.0)),
            ("B", Some(10.0)),
            ("C", Some(50.0)),
            ("D", None),
            ("E", Some(-5.0)),
        ]
        .into_iter()
        .map(|(t, change)| StockEntry {
            one_year_change: change,
            ..entry(t)
        })
        .collect();

        calculate_rs_rank(&mut entries);

        let ranks: Vec<_> = entries.iter().map(|e| e.rs_rank).collect();
        assert_eq!(ranks, vec![Some(1), Some(3), Some(4), None, Some(2)]);
    }

    #[test]
    fn test_sort_descending_fields() {
        let mut entries = vec![
            StockEntry {
                market_cap: 100.0,
                from_52w_high: Some(-50.0),
                ..entry("A")
            },
            StockEntry {
                market_cap: 300.0,
                from_52w_high: Some(-10.0),
                ..entry("B")
            },
            StockEntry {
                market_cap: 200.0,
                from_52w_high: Some(-30.0),
                ..entry("C")
            },
        ];

        sort_stocks(&mut entries, SortField::From52wHigh);
        assert_eq!(tickers(&entries), vec!["B", "C", "A"]);

        sort_stocks(&mut entries, SortField::MarketCap);
        assert_eq!(tickers(&entries), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_sort_multiples_ascending_missing_last() {
        let mut entries = vec![
            StockEntry { pe: None, ..entry("LOSS") },
            StockEntry { pe: Some(35.0), ..entry("RICH") },
            StockEntry { pe: Some(12.0), ..entry("CHEAP") },
            StockEntry { pe: None, ..entry("NEW") },
        ];

        sort_stocks(&mut entries, SortField::Pe);
        assert_eq!(tickers(&entries), vec!["CHEAP", "RICH", "LOSS", "NEW"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut entries = vec![
            StockEntry { ytd_change: Some(5.0), ..entry("X") },
            StockEntry { ytd_change: Some(9.0), ..entry("Y") },
            StockEntry { ytd_change: Some(5.0), ..entry("Z") },
        ];

        sort_stocks(&mut entries, SortField::Ytd);
        assert_eq!(tickers(&entries), vec!["Y", "X", "Z"]);
    }

    #[test]
    fn test_sort_fields() {
        for field in VALID_SORT_FIELDS {
            let parsed = SortField::parse(field).unwrap();
            assert_eq!(parsed.as_str(), field);
        }
        assert_eq!(SortField::parse("invalid"), None);
        assert_eq!(SortField::parse("PE"), None);
    }

    #[test]
    fn test_with_price_history() {
        let today = NaiveDate::from_ymd_opt(2026, 6, 15).unwrap();
        let bars: Vec<PriceBar> = [
            ("2025-03-01", 300.0),
            ("2025-06-15", 100.0),
            ("2026-01-02", 105.0),
            ("2026-05-16", 110.0),
            ("2026-06-14", 120.0),
        ]
        .into_iter()
        .map(|(d, close)| PriceBar {
            date: NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap(),
            open: close,
            high: close + 5.0,
            low: close - 5.0,
            close,
            volume: 0.0,
        })
        .collect();

        let stock = entry("ACME").with_price_history(&bars, today);
        assert_eq!(stock.price, Some(120.0));
        assert_relative_eq!(stock.one_year_change.unwrap(), 20.0);
        // the 2025-03 bar is outside the 52-week window
        assert_eq!(stock.high_52w, Some(125.0));
        assert_eq!(stock.low_52w, Some(95.0));
        assert_relative_eq!(stock.from_52w_high.unwrap(), -5.0 / 125.0 * 100.0);
        assert_eq!(stock.sparkline.len(), 5);
    }

    #[test]
    fn test_empty_history_leaves_entry_untouched() {
        let stock = entry("ACME").with_price_history(&[], NaiveDate::MIN);
        assert_eq!(stock, entry("ACME"));
    }

    #[test]
    fn test_entry_json_shape() {
        let json = serde_json::to_value(StockEntry {
            from_52w_high: Some(-3.0),
            one_year_change: Some(12.0),
            ..entry("ACME")
        })
        .unwrap();
        assert_eq!(json["from52wHigh"], serde_json::json!(-3.0));
        assert_eq!(json["oneYearChange"], serde_json::json!(12.0));
        assert!(json.get("sparkline").is_none());

        let parsed: StockEntry =
            serde_json::from_str(r#"{"ticker": "ACME", "marketCap": 5.0e9, "pe": 18.5}"#).unwrap();
        assert_eq!(parsed.market_cap, 5.0e9);
        assert_eq!(parsed.ps, None);
    }
}
