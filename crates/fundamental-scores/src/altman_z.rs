use scoring_core::FinancialData;
use serde::{Deserialize, Serialize};

/// Scores above this are in the safe zone.
pub const ALTMAN_Z_SAFE_THRESHOLD: f64 = 2.99;
/// Scores below this are in the distress zone.
pub const ALTMAN_Z_DISTRESS_THRESHOLD: f64 = 1.81;

// Coefficients of the original manufacturing formula
const COEFF_WORKING_CAPITAL: f64 = 1.2;
const COEFF_RETAINED_EARNINGS: f64 = 1.4;
const COEFF_EBIT: f64 = 3.3;
const COEFF_MARKET_CAP: f64 = 0.6;
const COEFF_SALES: f64 = 1.0;

/// Bankruptcy risk classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AltmanZone {
    Safe,
    Gray,
    Distress,
}

impl AltmanZone {
    /// Classify a score. 2.99 and 1.81 themselves fall in the gray zone.
    pub fn from_score(score: f64) -> Self {
        if score > ALTMAN_Z_SAFE_THRESHOLD {
            AltmanZone::Safe
        } else if score < ALTMAN_Z_DISTRESS_THRESHOLD {
            AltmanZone::Distress
        } else {
            AltmanZone::Gray
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AltmanZone::Safe => "safe",
            AltmanZone::Gray => "gray",
            AltmanZone::Distress => "distress",
        }
    }
}

impl std::fmt::Display for AltmanZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five ratios feeding the Z-Score
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AltmanZComponents {
    pub working_capital_to_assets: f64,
    pub retained_earnings_to_assets: f64,
    #[serde(rename = "ebitToAssets")]
    pub ebit_to_assets: f64,
    pub market_cap_to_liabilities: f64,
    pub sales_to_assets: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AltmanZResult {
    pub score: f64,
    pub zone: AltmanZone,
    pub components: AltmanZComponents,
}

/// Compute the Altman Z-Score for bankruptcy prediction.
///
/// Z = 1.2A + 1.4B + 3.3C + 0.6D + 1.0E where
///
/// - A = working capital / total assets
/// - B = retained earnings / total assets
/// - C = EBIT / total assets
/// - D = market value of equity / total liabilities
/// - E = sales / total assets
///
/// Ratios whose denominator is not positive contribute 0, so a company with
/// no assets scores 0 and lands in the distress zone.
pub fn calculate_altman_z_score(data: &FinancialData) -> AltmanZResult {
    let components = z_score_components(data);
    let score = weighted_score(&components);

    AltmanZResult {
        score,
        zone: AltmanZone::from_score(score),
        components,
    }
}

fn z_score_components(data: &FinancialData) -> AltmanZComponents {
    let mut components = AltmanZComponents::default();

    if data.total_assets > 0.0 {
        let working_capital = data.current_assets - data.current_liabilities;
        components.working_capital_to_assets = working_capital / data.total_assets;
        components.retained_earnings_to_assets = data.retained_earnings / data.total_assets;
        components.ebit_to_assets = data.ebit / data.total_assets;
        components.sales_to_assets = data.revenue / data.total_assets;
    }

    if data.total_liabilities > 0.0 {
        components.market_cap_to_liabilities = data.market_cap / data.total_liabilities;
    }

    components
}

fn weighted_score(c: &AltmanZComponents) -> f64 {
    COEFF_WORKING_CAPITAL * c.working_capital_to_assets
        + COEFF_RETAINED_EARNINGS * c.retained_earnings_to_assets
        + COEFF_EBIT * c.ebit_to_assets
        + COEFF_MARKET_CAP * c.market_cap_to_liabilities
        + COEFF_SALES * c.sales_to_assets
}
