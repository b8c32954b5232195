use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::dataset::{prepare_records, TickerRecord};
use crate::error::SearchError;
use crate::source::TickerSource;

/// Result count used when the caller passes a limit of 0.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

const DEFAULT_EXCHANGE: &str = "US";
const DEFAULT_ASSET_TYPE: &str = "stock";

/// A single search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub ticker: String,
    pub name: String,
    pub exchange: String,
    #[serde(rename = "type")]
    pub asset_type: String,
}

#[derive(Debug, Clone)]
struct TickerEntry {
    ticker: String,
    name: String,
    exchange: String,
    asset_type: String,
    symbol_key: String,
    /// lowercase "symbol name"
    search_key: String,
}

impl TickerEntry {
    fn to_result(&self) -> SearchResult {
        SearchResult {
            ticker: self.ticker.clone(),
            name: self.name.clone(),
            exchange: self.exchange.clone(),
            asset_type: self.asset_type.clone(),
        }
    }
}

/// Read-only ticker universe with ranked substring search.
#[derive(Debug, Clone, Default)]
pub struct TickerIndex {
    entries: Vec<TickerEntry>,
}

impl TickerIndex {
    /// Build the index in dataset order. Records are not de-duplicated here;
    /// use [`prepare_records`] or [`TickerIndex::from_source`] for that.
    pub fn new(records: Vec<TickerRecord>) -> Self {
        let entries = records
            .into_iter()
            .map(|record| {
                let exchange = record
                    .exchange
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| DEFAULT_EXCHANGE.to_string());
                let asset_type = record
                    .asset_type
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| DEFAULT_ASSET_TYPE.to_string());
                let search_key = format!("{} {}", record.symbol, record.name).to_lowercase();

                TickerEntry {
                    symbol_key: record.symbol.to_lowercase(),
                    ticker: record.symbol,
                    name: record.name,
                    exchange,
                    asset_type,
                    search_key,
                }
            })
            .collect();

        Self { entries }
    }

    /// Load, clean and index a dataset.
    pub async fn from_source(source: &dyn TickerSource) -> Result<Self, SearchError> {
        let records = source.load().await?;
        let raw = records.len();
        let prepared = prepare_records(records);
        if prepared.is_empty() {
            return Err(SearchError::EmptyDataset);
        }

        let index = Self::new(prepared);
        tracing::info!(
            source = %source.describe(),
            raw,
            indexed = index.len(),
            "Ticker index built"
        );
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Case-insensitive exact symbol lookup
    pub fn get(&self, symbol: &str) -> Option<SearchResult> {
        let key = symbol.trim().to_lowercase();
        self.entries
            .iter()
            .find(|e| e.symbol_key == key)
            .map(TickerEntry::to_result)
    }

    /// Find tickers matching `query`, best matches first.
    ///
    /// Three passes run in order, each only adding symbols not already
    /// collected, until `limit` results are found:
    ///
    /// 1. exact symbol match
    /// 2. symbol prefix match
    /// 3. substring match on "symbol name"
    ///
    /// Within a pass results keep dataset order. A `limit` of 0 means
    /// [`DEFAULT_SEARCH_LIMIT`].
    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchResult> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let limit = if limit == 0 { DEFAULT_SEARCH_LIMIT } else { limit };
        let mut collector = Collector::new(limit);

        if let Some(exact) = self.entries.iter().find(|e| e.symbol_key == query) {
            collector.offer(exact);
        }

        for entry in &self.entries {
            if collector.is_full() {
                break;
            }
            if entry.symbol_key.starts_with(&query) {
                collector.offer(entry);
            }
        }

        for entry in &self.entries {
            if collector.is_full() {
                break;
            }
            if entry.search_key.contains(&query) {
                collector.offer(entry);
            }
        }

        collector.results
    }
}

struct Collector<'a> {
    limit: usize,
    seen: HashSet<&'a str>,
    results: Vec<SearchResult>,
}

impl<'a> Collector<'a> {
    fn new(limit: usize) -> Self {
        Self {
            limit,
            seen: HashSet::new(),
            results: Vec::new(),
        }
    }

    fn is_full(&self) -> bool {
        self.results.len() >= self.limit
    }

    fn offer(&mut self, entry: &'a TickerEntry) {
        if !self.is_full() && self.seen.insert(entry.ticker.as_str()) {
            self.results.push(entry.to_result());
        }
    }
}
