//! Distribution helpers over optional peer values.
//!
//! Peer data is sparse: a P/E is undefined for a loss-making company, a
//! 1-year change is undefined for a recent IPO. These helpers skip `None`
//! rather than substituting zero.

use serde::{Deserialize, Serialize};

/// Compute the mean of a data slice.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Average of the defined values, `None` when nothing is defined.
///
/// Accepts any iterator, so a map of ticker → value can be passed as
/// `map.values().copied()`.
pub fn average<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let defined: Vec<f64> = values.into_iter().flatten().collect();
    if defined.is_empty() {
        return None;
    }
    Some(mean(&defined))
}

/// Median of the defined values.
///
/// For an even count this picks the upper of the two middle elements
/// (`sorted[len / 2]`); the two are not averaged.
pub fn median<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut defined: Vec<f64> = values.into_iter().flatten().collect();
    if defined.is_empty() {
        return None;
    }
    defined.sort_by(|a, b| a.total_cmp(b));
    Some(defined[defined.len() / 2])
}

/// Assign ranks 1..=N in ascending metric order.
///
/// Entries without a metric get no rank and do not take a slot. Ties keep
/// input order.
pub fn rank_ascending(metrics: &[Option<f64>]) -> Vec<Option<u32>> {
    let mut ranked: Vec<(usize, f64)> = metrics
        .iter()
        .enumerate()
        .filter_map(|(i, m)| m.map(|v| (i, v)))
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut ranks = vec![None; metrics.len()];
    for (rank, (index, _)) in ranked.into_iter().enumerate() {
        ranks[index] = Some(rank as u32 + 1);
    }
    ranks
}

/// Percentile rank of `value` within `data` on a 0-100 scale.
/// Uses midpoint interpolation: ties count as half.
pub fn percentile_rank(value: f64, data: &[f64]) -> Option<u8> {
    if data.is_empty() {
        return None;
    }
    let count_below = data.iter().filter(|&&x| x < value).count();
    let count_equal = data.iter().filter(|&&x| (x - value).abs() < f64::EPSILON).count();
    let fraction = (count_below as f64 + 0.5 * count_equal as f64) / data.len() as f64;
    Some((fraction * 100.0).round().clamp(0.0, 100.0) as u8)
}

/// A company's multiple next to its sector context
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationMetric {
    pub value: Option<f64>,
    pub sector_median: Option<f64>,
    pub percentile: Option<u8>,
}

pub fn valuation_metric(value: Option<f64>, peers: &[Option<f64>]) -> ValuationMetric {
    let defined: Vec<f64> = peers.iter().flatten().copied().collect();
    ValuationMetric {
        value,
        sector_median: median(peers.iter().copied()),
        percentile: value.and_then(|v| percentile_rank(v, &defined)),
    }
}

/// Percentage change from `base` to `current`. Undefined for a non-positive base.
pub fn pct_change(current: f64, base: f64) -> Option<f64> {
    if base > 0.0 {
        Some((current - base) / base * 100.0)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::BTreeMap;

    #[test]
    fn test_average_ignores_missing() {
        assert_eq!(average([Some(5.0), Some(10.0), Some(15.0)]), Some(10.0));
        assert_eq!(average([Some(5.0), None, Some(15.0)]), Some(10.0));
        assert_eq!(average([None, None]), None);
        assert_eq!(average(Vec::<Option<f64>>::new()), None);
    }

    #[test]
    fn test_average_over_map() {
        let mut ps = BTreeMap::new();
        ps.insert("AAPL", Some(8.0));
        ps.insert("MSFT", Some(12.0));
        ps.insert("NEWCO", None);
        assert_eq!(average(ps.values().copied()), Some(10.0));
    }

    #[test]
    fn test_median_odd() {
        assert_eq!(median([Some(5.0), Some(-10.0), Some(-5.0)]), Some(-5.0));
        assert_eq!(median([Some(30.0), None, Some(-20.0), Some(10.0)]), Some(10.0));
    }

    #[test]
    fn test_median_even_takes_upper_middle() {
        assert_eq!(median([Some(1.0), Some(2.0), Some(3.0), Some(4.0)]), Some(3.0));
        assert_eq!(median([Some(7.0), Some(3.0)]), Some(7.0));
    }

    #[test]
    fn test_median_empty() {
        assert_eq!(median([None]), None);
    }

    #[test]
    fn test_rank_ascending() {
        let ranks = rank_ascending(&[Some(-20.0), Some(10.0), Some(50.0), None, Some(-5.0)]);
        assert_eq!(ranks, vec![Some(1), Some(3), Some(4), None, Some(2)]);
    }

    #[test]
    fn test_rank_ties_keep_input_order() {
        let ranks = rank_ascending(&[Some(5.0), Some(1.0), Some(5.0)]);
        assert_eq!(ranks, vec![Some(2), Some(1), Some(3)]);
    }

    #[test]
    fn test_percentile_rank() {
        let data = [10.0, 20.0, 30.0, 40.0];
        assert_eq!(percentile_rank(5.0, &data), Some(0));
        assert_eq!(percentile_rank(50.0, &data), Some(100));
        // one below, one equal: (1 + 0.5) / 4
        assert_eq!(percentile_rank(20.0, &data), Some(38));
        assert_eq!(percentile_rank(25.0, &data), Some(50));
        assert_eq!(percentile_rank(1.0, &[]), None);
    }

    #[test]
    fn test_valuation_metric() {
        let peers = [Some(10.0), Some(20.0), None, Some(30.0)];
        let metric = valuation_metric(Some(30.0), &peers);
        assert_eq!(metric.sector_median, Some(20.0));
        assert_eq!(metric.percentile, Some(83));

        let missing = valuation_metric(None, &peers);
        assert_eq!(missing.value, None);
        assert_eq!(missing.percentile, None);
        assert_eq!(missing.sector_median, Some(20.0));
    }

    #[test]
    fn test_pct_change() {
        assert_relative_eq!(pct_change(120.0, 100.0).unwrap(), 20.0);
        assert_relative_eq!(pct_change(90.0, 100.0).unwrap(), -10.0);
        assert_eq!(pct_change(10.0, 0.0), None);
        assert_eq!(pct_change(10.0, -5.0), None);
    }
}
