use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// One row of the ticker dataset as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerRecord {
    #[serde(rename = "ticker")]
    pub symbol: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<String>,
}

impl TickerRecord {
    pub fn new(symbol: &str, name: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            exchange: None,
            asset_type: None,
        }
    }

    pub fn with_exchange(mut self, exchange: &str) -> Self {
        self.exchange = Some(exchange.to_string());
        self
    }

    pub fn with_type(mut self, asset_type: &str) -> Self {
        self.asset_type = Some(asset_type.to_string());
        self
    }
}

/// Map provider asset type codes onto our type names.
/// Unknown non-empty codes are treated as common stock.
pub fn normalize_asset_type(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let normalized = match raw.to_uppercase().as_str() {
        "ETF" => "etf",
        "CS" | "PFD" | "STOCK" => "stock",
        "WARRANT" => "warrant",
        "RIGHT" => "right",
        "UNIT" => "unit",
        "ADR" | "ADRC" => "adr",
        "SP" | "STRUCTURED" => "structured",
        _ => "stock",
    };
    Some(normalized.to_string())
}

/// Clean a raw dataset before indexing.
///
/// Drops rows without a symbol or name and symbols carrying `^`, `+` or `-`
/// (warrants, units, share classes), normalizes asset types and keeps the
/// first occurrence of each symbol. Input order is preserved.
pub fn prepare_records(records: Vec<TickerRecord>) -> Vec<TickerRecord> {
    let total = records.len();
    let mut seen = HashSet::with_capacity(total);
    let mut prepared = Vec::with_capacity(total);
    let mut invalid = 0usize;
    let mut duplicates = 0usize;

    for mut record in records {
        record.symbol = record.symbol.trim().to_string();
        record.name = record.name.trim().to_string();

        if record.symbol.is_empty()
            || record.name.is_empty()
            || record.symbol.contains(|c: char| matches!(c, '^' | '+' | '-'))
        {
            invalid += 1;
            continue;
        }

        if !seen.insert(record.symbol.clone()) {
            duplicates += 1;
            continue;
        }

        record.asset_type = record.asset_type.as_deref().and_then(normalize_asset_type);
        record.exchange = record
            .exchange
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());
        prepared.push(record);
    }

    if invalid > 0 || duplicates > 0 {
        tracing::debug!(total, invalid, duplicates, "Filtered ticker dataset");
    }

    prepared
}
