//! Financial health scores computed from raw statement line items.
//!
//! Both calculators are total: degenerate input (zero assets, zero revenue)
//! produces zero-valued ratios instead of errors.

pub mod altman_z;
pub mod rule_of_40;

pub use altman_z::{
    calculate_altman_z_score, AltmanZComponents, AltmanZResult, AltmanZone,
    ALTMAN_Z_DISTRESS_THRESHOLD, ALTMAN_Z_SAFE_THRESHOLD,
};
pub use rule_of_40::{
    calculate_rule_of_40, calculate_rule_of_40_with_growth, RuleOf40Result, RULE_OF_40_THRESHOLD,
};
pub use scoring_core::FinancialData;
