use chrono::{Datelike, Months, NaiveDate};
use scoring_core::PriceBar;

use crate::stats::pct_change;

/// Highest high and lowest low across the series.
pub fn high_low(bars: &[PriceBar]) -> (Option<f64>, Option<f64>) {
    bars.iter().fold((None, None), |(high, low), bar| {
        let high = Some(high.map_or(bar.high, |h: f64| h.max(bar.high)));
        let low = Some(low.map_or(bar.low, |l: f64| l.min(bar.low)));
        (high, low)
    })
}

/// Downsample closing prices to `points` evenly spaced values.
///
/// Series no longer than `points` are returned whole. Otherwise the stride
/// is `len / points` and point `i` is taken from `floor(i * stride)`, so the
/// first close is always included.
pub fn sample_sparkline(bars: &[PriceBar], points: usize) -> Vec<f64> {
    if bars.len() <= points {
        return bars.iter().map(|b| b.close).collect();
    }

    let stride = bars.len() as f64 / points as f64;
    (0..points)
        .map(|i| {
            let index = ((i as f64 * stride).floor() as usize).min(bars.len() - 1);
            bars[index].close
        })
        .collect()
}

/// YTD, 1-month and 1-year percentage returns as of `today`.
///
/// Bars must be in ascending date order. Each return compares the last
/// close with the first bar dated on or after the period start. A period
/// with no such bar yields `None`.
pub fn calculate_returns(
    bars: &[PriceBar],
    today: NaiveDate,
) -> (Option<f64>, Option<f64>, Option<f64>) {
    let Some(last) = bars.last() else {
        return (None, None, None);
    };

    let return_since = |start: Option<NaiveDate>| -> Option<f64> {
        let start = start?;
        let base = bars.iter().find(|bar| bar.date >= start)?;
        pct_change(last.close, base.close)
    };

    let year_start = NaiveDate::from_ymd_opt(today.year(), 1, 1);
    let month_ago = today.checked_sub_months(Months::new(1));
    let year_ago = today.checked_sub_months(Months::new(12));

    (
        return_since(year_start),
        return_since(month_ago),
        return_since(year_ago),
    )
}
