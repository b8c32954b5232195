use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Raw statement line items for one fiscal period.
///
/// This is the input record for the score calculators. All values are
/// point-in-time snapshots in the reporting currency; missing items are 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialData {
    pub current_assets: f64,
    pub current_liabilities: f64,
    pub total_assets: f64,
    pub retained_earnings: f64,
    pub ebit: f64,
    pub market_cap: f64,
    pub total_liabilities: f64,
    pub revenue: f64,
    pub operating_income: f64,
}

/// Basic company identification and classification
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub ticker: String,
    pub name: String,
    #[serde(default)]
    pub exchange: String,
    #[serde(default)]
    pub sector: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Market quote snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub price: f64,
    #[serde(default)]
    pub change: f64,
    #[serde(default)]
    pub change_percent: f64,
    #[serde(default)]
    pub volume: i64,
    #[serde(default)]
    pub market_cap: i64,
    #[serde(default)]
    pub fifty_two_week_high: f64,
    #[serde(default)]
    pub fifty_two_week_low: f64,
    pub as_of: DateTime<Utc>,
}

/// Key derived financial metrics. Percentages are expressed as whole
/// numbers (25.0 means 25%).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Financials {
    #[serde(rename = "revenueGrowthYoY")]
    pub revenue_growth_yoy: f64,
    pub gross_margin: f64,
    pub operating_margin: f64,
    pub net_margin: f64,
    pub fcf_margin: f64,
    pub roe: f64,
    pub roic: f64,
    pub debt_to_equity: f64,
    pub current_ratio: f64,
    pub interest_coverage: Option<f64>,
}

/// A single institutional holder's position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionalHolder {
    pub fund_name: String,
    #[serde(default)]
    pub fund_cik: String,
    pub shares: i64,
    #[serde(default)]
    pub value: i64,
    #[serde(default)]
    pub portfolio_percent: f64,
    #[serde(default)]
    pub change_shares: i64,
    #[serde(default)]
    pub change_percent: f64,
    #[serde(default)]
    pub quarter_date: Option<NaiveDate>,
}

/// Aggregated institutional ownership.
///
/// `net_change_quarters` counts consecutive quarters in which the aggregate
/// position moved in the direction of `net_change_shares`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Holdings {
    pub top_institutional: Vec<InstitutionalHolder>,
    pub total_institutional_ownership: f64,
    pub net_change_shares: i64,
    pub net_change_quarters: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeType {
    Buy,
    Sell,
}

/// A single insider transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsiderTrade {
    pub insider_name: String,
    #[serde(default)]
    pub title: String,
    pub trade_type: TradeType,
    pub shares: i64,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub value: i64,
    pub trade_date: NaiveDate,
}

/// Insider trading summary over a trailing 90 day window.
/// `net_value_90d` is buys minus sells in currency units.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InsiderActivity {
    pub trades: Vec<InsiderTrade>,
    pub buy_count_90d: u32,
    pub sell_count_90d: u32,
    pub net_value_90d: f64,
}

impl InsiderActivity {
    /// Summarise raw trades dated within 90 days before `as_of` (inclusive).
    pub fn from_trades(trades: Vec<InsiderTrade>, as_of: NaiveDate) -> Self {
        let window_start = as_of - chrono::Duration::days(90);
        let mut buy_count_90d = 0;
        let mut sell_count_90d = 0;
        let mut net_value_90d = 0.0;

        for trade in trades
            .iter()
            .filter(|t| t.trade_date >= window_start && t.trade_date <= as_of)
        {
            match trade.trade_type {
                TradeType::Buy => {
                    buy_count_90d += 1;
                    net_value_90d += trade.value as f64;
                }
                TradeType::Sell => {
                    sell_count_90d += 1;
                    net_value_90d -= trade.value as f64;
                }
            }
        }

        Self {
            trades,
            buy_count_90d,
            sell_count_90d,
            net_value_90d,
        }
    }
}

/// Short interest snapshot for the latest settlement date
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShortInterest {
    pub settlement_date: Option<NaiveDate>,
    pub short_interest: i64,
    pub avg_daily_volume: i64,
    pub short_percent_float: f64,
    pub days_to_cover: f64,
}

/// Piotroski F-Score computed upstream (0-9).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PiotroskiResult {
    pub score: u8,
}

/// Daily OHLCV bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    #[serde(default)]
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trade(trade_type: TradeType, value: i64, date: &str) -> InsiderTrade {
        InsiderTrade {
            insider_name: "Jane Doe".to_string(),
            title: "CFO".to_string(),
            trade_type,
            shares: 1_000,
            price: 10.0,
            value,
            trade_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        }
    }

    #[test]
    fn test_insider_activity_window() {
        let as_of = NaiveDate::from_ymd_opt(2026, 6, 30).unwrap();
        let activity = InsiderActivity::from_trades(
            vec![
                trade(TradeType::Buy, 50_000, "2026-06-01"),
                trade(TradeType::Buy, 70_000, "2026-04-15"),
                trade(TradeType::Sell, 30_000, "2026-05-20"),
                trade(TradeType::Buy, 999_999, "2025-12-01"), // outside window
            ],
            as_of,
        );

        assert_eq!(activity.buy_count_90d, 2);
        assert_eq!(activity.sell_count_90d, 1);
        assert_eq!(activity.net_value_90d, 90_000.0);
        assert_eq!(activity.trades.len(), 4);
    }

    #[test]
    fn test_financials_json_field_names() {
        let json = r#"{"revenueGrowthYoY": 25.5, "operatingMargin": -3.0, "roic": 22.0}"#;
        let financials: Financials = serde_json::from_str(json).unwrap();
        assert_eq!(financials.revenue_growth_yoy, 25.5);
        assert_eq!(financials.operating_margin, -3.0);
        assert_eq!(financials.roic, 22.0);
        assert_eq!(financials.debt_to_equity, 0.0);
    }

    #[test]
    fn test_financial_data_defaults_missing_items() {
        let data: FinancialData = serde_json::from_str(r#"{"revenue": 100.0}"#).unwrap();
        assert_eq!(data.revenue, 100.0);
        assert_eq!(data.total_assets, 0.0);
    }

    #[test]
    fn test_holdings_json_field_names() {
        let json = r#"{"totalInstitutionalOwnership": 0.72, "netChangeShares": -1500, "netChangeQuarters": 2}"#;
        let holdings: Holdings = serde_json::from_str(json).unwrap();
        assert_eq!(holdings.total_institutional_ownership, 0.72);
        assert_eq!(holdings.net_change_shares, -1500);
        assert!(holdings.top_institutional.is_empty());

        let value = serde_json::to_value(&holdings).unwrap();
        assert_eq!(value["totalInstitutionalOwnership"], serde_json::json!(0.72));
    }
}
