use std::collections::BTreeMap;

use fundamental_scores::AltmanZResult;
use scoring_core::{
    Company, Financials, Holdings, InsiderActivity, PiotroskiResult, Quote, ShortInterest,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sentiment of a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalType {
    Bullish,
    Bearish,
    Warning,
}

/// Data source a signal was derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalCategory {
    Insider,
    Institutional,
    Fundamental,
    Valuation,
    Technical,
}

/// An actionable insight produced by a single rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    #[serde(rename = "type")]
    pub signal_type: SignalType,
    pub category: SignalCategory,
    pub message: String,
    /// 1-5, higher = more important
    pub priority: u8,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, Value>,
}

impl Signal {
    pub fn new(
        signal_type: SignalType,
        category: SignalCategory,
        priority: u8,
        message: impl Into<String>,
    ) -> Self {
        Self {
            signal_type,
            category,
            message: message.into(),
            priority,
            data: BTreeMap::new(),
        }
    }

    /// Attach a diagnostic value to the signal payload.
    pub fn with_data(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }
}

/// Everything known about a ticker at request time.
///
/// Every field is optional. Rules treat a missing field as "no opinion",
/// never as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleContext {
    pub company: Option<Company>,
    pub quote: Option<Quote>,
    pub financials: Option<Financials>,
    pub holdings: Option<Holdings>,
    pub insider_activity: Option<InsiderActivity>,
    pub short_interest: Option<ShortInterest>,
    pub piotroski: Option<PiotroskiResult>,
    pub altman_z: Option<AltmanZResult>,
}
