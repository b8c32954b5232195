use crate::rules::{default_rules, SignalRule};
use crate::types::{RuleContext, Signal};

/// Runs every rule in the catalog against one context.
#[derive(Debug, Clone)]
pub struct SignalGenerator {
    rules: Vec<SignalRule>,
}

impl Default for SignalGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalGenerator {
    /// Generator with the standard rule catalog
    pub fn new() -> Self {
        Self {
            rules: default_rules(),
        }
    }

    /// Generator with a custom catalog. Catalog order is the tie-break order
    /// for signals of equal priority.
    pub fn with_rules(rules: Vec<SignalRule>) -> Self {
        Self { rules }
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Evaluate all rules and return the emitted signals, highest priority
    /// first. Equal priorities keep catalog order.
    pub fn generate_all(&self, ctx: &RuleContext) -> Vec<Signal> {
        let mut signals: Vec<Signal> = self
            .rules
            .iter()
            .filter_map(|rule| rule.evaluate(ctx))
            .collect();

        // sort_by is stable
        signals.sort_by(|a, b| b.priority.cmp(&a.priority));

        tracing::debug!(
            rules = self.rules.len(),
            signals = signals.len(),
            "Generated signals"
        );

        signals
    }
}
