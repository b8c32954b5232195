use fundamental_scores::AltmanZone;

use crate::types::{RuleContext, Signal, SignalCategory, SignalType};

/// A named rule. Rules are plain functions over the shared context and never
/// see each other's output.
#[derive(Debug, Clone, Copy)]
pub struct SignalRule {
    name: &'static str,
    evaluate: fn(&RuleContext) -> Option<Signal>,
}

impl SignalRule {
    pub const fn new(name: &'static str, evaluate: fn(&RuleContext) -> Option<Signal>) -> Self {
        Self { name, evaluate }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn evaluate(&self, ctx: &RuleContext) -> Option<Signal> {
        (self.evaluate)(ctx)
    }
}

/// The standard catalog, in evaluation order.
pub fn default_rules() -> Vec<SignalRule> {
    vec![
        SignalRule::new("high_piotroski", high_piotroski),
        SignalRule::new("low_piotroski", low_piotroski),
        SignalRule::new("altman_distress", altman_distress),
        SignalRule::new("altman_safe", altman_safe),
        SignalRule::new("institutional_accumulation", institutional_accumulation),
        SignalRule::new("institutional_distribution", institutional_distribution),
        SignalRule::new("insider_buying", insider_buying),
        SignalRule::new("insider_selling", insider_selling),
        SignalRule::new("high_growth", high_growth),
        SignalRule::new("negative_margins", negative_margins),
        SignalRule::new("high_debt", high_debt),
        SignalRule::new("strong_roic", strong_roic),
        SignalRule::new("low_short_interest", low_short_interest),
        SignalRule::new("elevated_short_interest", elevated_short_interest),
        SignalRule::new("very_high_short_interest", very_high_short_interest),
        SignalRule::new("low_days_to_cover", low_days_to_cover),
        SignalRule::new("moderate_days_to_cover", moderate_days_to_cover),
        SignalRule::new("high_days_to_cover", high_days_to_cover),
    ]
}

// --- Scores ---

fn high_piotroski(ctx: &RuleContext) -> Option<Signal> {
    let piotroski = ctx.piotroski.as_ref().filter(|p| p.score >= 7)?;
    Some(
        Signal::new(
            SignalType::Bullish,
            SignalCategory::Fundamental,
            4,
            format!(
                "Strong Piotroski F-Score of {} indicates solid fundamentals",
                piotroski.score
            ),
        )
        .with_data("score", piotroski.score),
    )
}

fn low_piotroski(ctx: &RuleContext) -> Option<Signal> {
    let piotroski = ctx.piotroski.as_ref().filter(|p| p.score <= 3)?;
    Some(
        Signal::new(
            SignalType::Bearish,
            SignalCategory::Fundamental,
            4,
            format!(
                "Weak Piotroski F-Score of {} suggests fundamental concerns",
                piotroski.score
            ),
        )
        .with_data("score", piotroski.score),
    )
}

fn altman_distress(ctx: &RuleContext) -> Option<Signal> {
    let altman = ctx
        .altman_z
        .as_ref()
        .filter(|a| a.zone == AltmanZone::Distress)?;
    Some(
        Signal::new(
            SignalType::Warning,
            SignalCategory::Fundamental,
            5,
            format!(
                "Altman Z-Score of {:.2} indicates elevated bankruptcy risk",
                altman.score
            ),
        )
        .with_data("score", altman.score)
        .with_data("zone", altman.zone.as_str()),
    )
}

fn altman_safe(ctx: &RuleContext) -> Option<Signal> {
    let altman = ctx
        .altman_z
        .as_ref()
        .filter(|a| a.zone == AltmanZone::Safe && a.score > 4.0)?;
    Some(
        Signal::new(
            SignalType::Bullish,
            SignalCategory::Fundamental,
            3,
            format!(
                "Strong Altman Z-Score of {:.2} indicates excellent financial health",
                altman.score
            ),
        )
        .with_data("score", altman.score),
    )
}

// --- Ownership ---

fn institutional_accumulation(ctx: &RuleContext) -> Option<Signal> {
    let holdings = ctx
        .holdings
        .as_ref()
        .filter(|h| h.net_change_quarters >= 2 && h.net_change_shares > 0)?;
    Some(
        Signal::new(
            SignalType::Bullish,
            SignalCategory::Institutional,
            3,
            format!(
                "Institutions have added shares for {} consecutive quarters",
                holdings.net_change_quarters
            ),
        )
        .with_data("quarters", holdings.net_change_quarters)
        .with_data("netChangeShares", holdings.net_change_shares),
    )
}

fn institutional_distribution(ctx: &RuleContext) -> Option<Signal> {
    let holdings = ctx
        .holdings
        .as_ref()
        .filter(|h| h.net_change_quarters >= 2 && h.net_change_shares < 0)?;
    Some(
        Signal::new(
            SignalType::Bearish,
            SignalCategory::Institutional,
            3,
            format!(
                "Institutions have reduced positions for {} consecutive quarters",
                holdings.net_change_quarters
            ),
        )
        .with_data("quarters", holdings.net_change_quarters)
        .with_data("netChangeShares", holdings.net_change_shares),
    )
}

fn insider_buying(ctx: &RuleContext) -> Option<Signal> {
    let insider = ctx
        .insider_activity
        .as_ref()
        .filter(|i| i.buy_count_90d >= 3 && i.net_value_90d > 100_000.0)?;
    Some(
        Signal::new(
            SignalType::Bullish,
            SignalCategory::Insider,
            4,
            format!(
                "{} insider purchases in the last 90 days, net {} bought",
                insider.buy_count_90d,
                format_money(insider.net_value_90d)
            ),
        )
        .with_data("buyCount", insider.buy_count_90d)
        .with_data("netValue", insider.net_value_90d),
    )
}

fn insider_selling(ctx: &RuleContext) -> Option<Signal> {
    let insider = ctx
        .insider_activity
        .as_ref()
        .filter(|i| i.sell_count_90d >= 5 && i.net_value_90d < -500_000.0)?;
    Some(
        Signal::new(
            SignalType::Warning,
            SignalCategory::Insider,
            3,
            format!(
                "{} insider sales in the last 90 days, net {} sold",
                insider.sell_count_90d,
                format_money(insider.net_value_90d.abs())
            ),
        )
        .with_data("sellCount", insider.sell_count_90d)
        .with_data("netValue", insider.net_value_90d),
    )
}

// --- Financials ---

fn high_growth(ctx: &RuleContext) -> Option<Signal> {
    let financials = ctx
        .financials
        .as_ref()
        .filter(|f| f.revenue_growth_yoy > 20.0)?;
    Some(
        Signal::new(
            SignalType::Bullish,
            SignalCategory::Fundamental,
            3,
            format!(
                "Revenue grew {:.1}% year over year",
                financials.revenue_growth_yoy
            ),
        )
        .with_data("revenueGrowthYoY", financials.revenue_growth_yoy),
    )
}

fn negative_margins(ctx: &RuleContext) -> Option<Signal> {
    let financials = ctx
        .financials
        .as_ref()
        .filter(|f| f.operating_margin < 0.0)?;
    Some(
        Signal::new(
            SignalType::Warning,
            SignalCategory::Fundamental,
            4,
            format!(
                "Negative operating margin of {:.1}%",
                financials.operating_margin
            ),
        )
        .with_data("operatingMargin", financials.operating_margin),
    )
}

fn high_debt(ctx: &RuleContext) -> Option<Signal> {
    let financials = ctx
        .financials
        .as_ref()
        .filter(|f| f.debt_to_equity > 2.0)?;
    Some(
        Signal::new(
            SignalType::Warning,
            SignalCategory::Fundamental,
            3,
            format!(
                "Debt-to-equity of {:.2} indicates elevated leverage",
                financials.debt_to_equity
            ),
        )
        .with_data("debtToEquity", financials.debt_to_equity),
    )
}

fn strong_roic(ctx: &RuleContext) -> Option<Signal> {
    let financials = ctx.financials.as_ref().filter(|f| f.roic > 20.0)?;
    Some(
        Signal::new(
            SignalType::Bullish,
            SignalCategory::Fundamental,
            3,
            format!(
                "Return on invested capital of {:.1}% shows efficient capital allocation",
                financials.roic
            ),
        )
        .with_data("roic", financials.roic),
    )
}

// --- Short interest ---

fn low_short_interest(ctx: &RuleContext) -> Option<Signal> {
    let short = ctx
        .short_interest
        .as_ref()
        .filter(|s| s.short_percent_float > 0.0 && s.short_percent_float < 5.0)?;
    Some(
        Signal::new(
            SignalType::Bullish,
            SignalCategory::Technical,
            2,
            format!(
                "Low short interest at {:.1}% of float",
                short.short_percent_float
            ),
        )
        .with_data("shortPercentFloat", short.short_percent_float),
    )
}

fn elevated_short_interest(ctx: &RuleContext) -> Option<Signal> {
    let short = ctx
        .short_interest
        .as_ref()
        .filter(|s| s.short_percent_float >= 10.0 && s.short_percent_float < 20.0)?;
    Some(
        Signal::new(
            SignalType::Bearish,
            SignalCategory::Technical,
            3,
            format!(
                "Elevated short interest at {:.1}% of float",
                short.short_percent_float
            ),
        )
        .with_data("shortPercentFloat", short.short_percent_float),
    )
}

fn very_high_short_interest(ctx: &RuleContext) -> Option<Signal> {
    let short = ctx
        .short_interest
        .as_ref()
        .filter(|s| s.short_percent_float >= 20.0)?;
    Some(
        Signal::new(
            SignalType::Warning,
            SignalCategory::Technical,
            4,
            format!(
                "Very high short interest at {:.1}% of float",
                short.short_percent_float
            ),
        )
        .with_data("shortPercentFloat", short.short_percent_float),
    )
}

fn low_days_to_cover(ctx: &RuleContext) -> Option<Signal> {
    let short = ctx
        .short_interest
        .as_ref()
        .filter(|s| s.days_to_cover > 0.0 && s.days_to_cover < 2.0)?;
    Some(
        Signal::new(
            SignalType::Bullish,
            SignalCategory::Technical,
            2,
            format!(
                "Shorts could cover in {:.1} days of average volume",
                short.days_to_cover
            ),
        )
        .with_data("daysToCover", short.days_to_cover),
    )
}

fn moderate_days_to_cover(ctx: &RuleContext) -> Option<Signal> {
    let short = ctx
        .short_interest
        .as_ref()
        .filter(|s| s.days_to_cover >= 5.0 && s.days_to_cover < 10.0)?;
    Some(
        Signal::new(
            SignalType::Bearish,
            SignalCategory::Technical,
            3,
            format!(
                "{:.1} days to cover short positions",
                short.days_to_cover
            ),
        )
        .with_data("daysToCover", short.days_to_cover),
    )
}

fn high_days_to_cover(ctx: &RuleContext) -> Option<Signal> {
    let short = ctx
        .short_interest
        .as_ref()
        .filter(|s| s.days_to_cover >= 10.0)?;
    Some(
        Signal::new(
            SignalType::Warning,
            SignalCategory::Technical,
            4,
            format!(
                "{:.1} days to cover short positions, squeeze risk is high",
                short.days_to_cover
            ),
        )
        .with_data("daysToCover", short.days_to_cover),
    )
}

fn format_money(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000_000.0 {
        format!("${:.1}B", value / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("${:.1}M", value / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("${:.1}K", value / 1_000.0)
    } else {
        format!("${:.0}", value)
    }
}
