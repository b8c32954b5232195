//! Peer comparison helpers for sector and valuation views.
//!
//! Everything here is a pure function over caller-supplied data. Missing
//! values are carried as `None` and are never treated as zero.

pub mod prices;
pub mod sectors;
pub mod stats;
pub mod summary;

pub use prices::{calculate_returns, high_low, sample_sparkline};
pub use sectors::{
    is_custom_sector, is_valid_sector, normalize_sector_param, CUSTOM_SECTORS, SECTORS,
};
pub use stats::{
    average, mean, median, pct_change, percentile_rank, rank_ascending, valuation_metric,
    ValuationMetric,
};
pub use summary::{
    calculate_rs_rank, calculate_summary, sort_stocks, SectorSummary, SortField, StockEntry,
    SPARKLINE_POINTS, VALID_SORT_FIELDS,
};
