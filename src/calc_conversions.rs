use std::collections::HashMap;

use lazy_static::lazy_static;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub enum ConversionRule {
    Factor(f64),
    Formula(fn(f64) -> f64),
}

impl ConversionRule {
    pub fn apply(&self, amount: f64) -> f64 {
        match self {
            ConversionRule::Factor(factor) => amount * factor,
            ConversionRule::Formula(formula) => formula(amount),
        }
    }
}

lazy_static! {
    /// Fixed-rate conversion table. The rates are frozen for
    /// compatibility; there is no live rate source.
    pub static ref CONVERSIONS: HashMap<&'static str, ConversionRule> = {
        let mut m = HashMap::new();

        // Currency rates
        m.insert("USD→EUR", ConversionRule::Factor(0.85));
        m.insert("EUR→USD", ConversionRule::Factor(1.18));
        m.insert("USD→GBP", ConversionRule::Factor(0.73));
        m.insert("GBP→USD", ConversionRule::Factor(1.37));
        m.insert("USD→JPY", ConversionRule::Factor(110.0));
        m.insert("JPY→USD", ConversionRule::Factor(0.0091));
        m.insert("USD→CAD", ConversionRule::Factor(1.25));
        m.insert("CAD→USD", ConversionRule::Factor(0.80));
        m.insert("USD→AUD", ConversionRule::Factor(1.35));
        m.insert("AUD→USD", ConversionRule::Factor(0.74));
        m.insert("USD→CHF", ConversionRule::Factor(0.92));
        m.insert("CHF→USD", ConversionRule::Factor(1.09));

        // Unit conversions
        m.insert("cm→m", ConversionRule::Factor(0.01));
        m.insert("m→cm", ConversionRule::Factor(100.0));
        m.insert("m→ft", ConversionRule::Factor(3.28084));
        m.insert("ft→m", ConversionRule::Factor(0.3048));
        m.insert("kg→lb", ConversionRule::Factor(2.20462));
        m.insert("lb→kg", ConversionRule::Factor(0.453592));
        m.insert("km→mi", ConversionRule::Factor(0.621371));
        m.insert("mi→km", ConversionRule::Factor(1.60934));
        m.insert("L→gal", ConversionRule::Factor(0.264172));
        m.insert("gal→L", ConversionRule::Factor(3.78541));
        m.insert("m²→ft²", ConversionRule::Factor(10.7639));
        m.insert("ft²→m²", ConversionRule::Factor(0.092903));
        m.insert("°C→°F", ConversionRule::Formula(|x| x * 9.0 / 5.0 + 32.0));
        m.insert("°F→°C", ConversionRule::Formula(|x| (x - 32.0) * 5.0 / 9.0));

        m
    };
}

/// Apply the rule for `rule_key` to `amount`, at full precision.
///
/// An unknown key returns the amount unchanged. Single currency-code
/// buttons (e.g. "USD") are not pair keys and pass amounts through
/// untouched.
pub fn convert(amount: f64, rule_key: &str) -> f64 {
    match CONVERSIONS.get(rule_key) {
        Some(rule) => {
            let result = rule.apply(amount);
            debug!(rule_key, amount, result, "conversion applied");
            result
        }
        None => {
            debug!(rule_key, amount, "no conversion rule, identity");
            amount
        }
    }
}

/// Display rounding used by the UI: 4 decimal places.
pub fn round_for_display(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
