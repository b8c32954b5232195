use scoring_core::FinancialData;
use serde::{Deserialize, Serialize};

/// Benchmark a growth company's combined score must reach.
pub const RULE_OF_40_THRESHOLD: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleOf40Result {
    pub score: f64,
    pub revenue_growth_percent: f64,
    pub profit_margin_percent: f64,
    pub passed: bool,
}

impl RuleOf40Result {
    fn new(revenue_growth_percent: f64, profit_margin_percent: f64) -> Self {
        let score = revenue_growth_percent + profit_margin_percent;
        Self {
            score,
            revenue_growth_percent,
            profit_margin_percent,
            passed: score >= RULE_OF_40_THRESHOLD,
        }
    }
}

/// Rule of 40 for a single period.
///
/// Growth cannot be inferred from one period, so the score is the operating
/// margin alone.
pub fn calculate_rule_of_40(current: &FinancialData) -> RuleOf40Result {
    RuleOf40Result::new(0.0, profit_margin(current))
}

/// Rule of 40 with an explicit year-over-year comparison.
///
/// Revenue growth is 0 when the previous period had no positive revenue.
pub fn calculate_rule_of_40_with_growth(
    current: &FinancialData,
    previous: &FinancialData,
) -> RuleOf40Result {
    let revenue_growth = if previous.revenue > 0.0 {
        (current.revenue - previous.revenue) / previous.revenue * 100.0
    } else {
        0.0
    };

    RuleOf40Result::new(revenue_growth, profit_margin(current))
}

/// Operating margin as a percentage
fn profit_margin(data: &FinancialData) -> f64 {
    if data.revenue == 0.0 {
        return 0.0;
    }
    data.operating_income / data.revenue * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn period(revenue: f64, operating_income: f64) -> FinancialData {
        FinancialData {
            revenue,
            operating_income,
            ..Default::default()
        }
    }

    #[test]
    fn test_growth_passed_at_forty() {
        let result = calculate_rule_of_40_with_growth(
            &period(120_000_000.0, 24_000_000.0),
            &period(100_000_000.0, 0.0),
        );

        // 20% growth + 20% margin
        assert!(result.passed);
        assert_relative_eq!(result.score, 40.0, epsilon = 0.1);
        assert_relative_eq!(result.revenue_growth_percent, 20.0, epsilon = 1e-9);
        assert_relative_eq!(result.profit_margin_percent, 20.0, epsilon = 1e-9);
    }

    #[test]
    fn test_growth_failed() {
        let result = calculate_rule_of_40_with_growth(
            &period(110_000_000.0, 11_000_000.0),
            &period(100_000_000.0, 0.0),
        );

        assert!(!result.passed);
        assert_relative_eq!(result.score, 20.0, epsilon = 0.1);
    }

    #[test]
    fn test_high_growth_low_margin() {
        let result = calculate_rule_of_40_with_growth(
            &period(200_000_000.0, 10_000_000.0),
            &period(100_000_000.0, 0.0),
        );

        assert!(result.passed);
        assert_relative_eq!(result.revenue_growth_percent, 100.0, epsilon = 0.1);
        assert_relative_eq!(result.score, 105.0, epsilon = 0.1);
    }

    #[test]
    fn test_high_margin_no_growth() {
        let result = calculate_rule_of_40_with_growth(
            &period(100_000_000.0, 45_000_000.0),
            &period(100_000_000.0, 0.0),
        );

        assert!(result.passed);
        assert_eq!(result.revenue_growth_percent, 0.0);
    }

    #[test]
    fn test_negative_margin() {
        let result = calculate_rule_of_40_with_growth(
            &period(150_000_000.0, -15_000_000.0),
            &period(100_000_000.0, 0.0),
        );

        // 50% growth - 10% margin
        assert!(result.passed);
        assert_relative_eq!(result.profit_margin_percent, -10.0, epsilon = 0.1);
    }

    #[test]
    fn test_zero_previous_revenue() {
        let result = calculate_rule_of_40_with_growth(
            &period(100_000_000.0, 20_000_000.0),
            &period(0.0, 0.0),
        );

        assert_eq!(result.revenue_growth_percent, 0.0);
        assert_relative_eq!(result.profit_margin_percent, 20.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_current_revenue() {
        let result = calculate_rule_of_40_with_growth(&period(0.0, -5_000.0), &period(10_000.0, 0.0));

        assert_eq!(result.profit_margin_percent, 0.0);
        assert_relative_eq!(result.revenue_growth_percent, -100.0, epsilon = 1e-9);
        assert!(!result.passed);
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let exact = RuleOf40Result::new(15.0, 25.0);
        assert_eq!(exact.score, 40.0);
        assert!(exact.passed);

        let below = RuleOf40Result::new(15.0, 24.999);
        assert!(!below.passed);
    }

    #[test]
    fn test_single_period() {
        let result = calculate_rule_of_40(&period(50_000_000.0, 22_500_000.0));

        assert_eq!(result.revenue_growth_percent, 0.0);
        assert_relative_eq!(result.profit_margin_percent, 45.0, epsilon = 1e-9);
        assert!(result.passed);
    }

    #[test]
    fn test_result_json_shape() {
        let json = serde_json::to_value(calculate_rule_of_40(&period(100.0, 10.0))).unwrap();
        assert_eq!(json["profitMarginPercent"], serde_json::json!(10.0));
        assert_eq!(json["revenueGrowthPercent"], serde_json::json!(0.0));
        assert_eq!(json["passed"], serde_json::json!(false));
    }
}
