//! Rule-based signal generation.
//!
//! A fixed catalog of independent threshold rules is evaluated against a
//! read-only [`RuleContext`]; each rule emits at most one [`Signal`].

pub mod generator;
pub mod rules;
pub mod types;

pub use generator::SignalGenerator;
pub use rules::{default_rules, SignalRule};
pub use types::{RuleContext, Signal, SignalCategory, SignalType};
