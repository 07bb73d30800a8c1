use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::calc_types::{ButtonCommand, Mode};

const STANDARD_LAYOUT: &[&[&str]] = &[
    &["7", "8", "9", "/", "C"],
    &["4", "5", "6", "*", "("],
    &["1", "2", "3", "-", ")"],
    &["0", ".", "=", "+", "His"],
];

const SCIENTIFIC_LAYOUT: &[&[&str]] = &[
    &["sin", "cos", "tan", "log", "C"],
    &["sqrt", "exp", "^", "pi", "("],
    &["7", "8", "9", "/", ")"],
    &["4", "5", "6", "*", "His"],
    &["1", "2", "3", "-", ""],
    &["0", ".", "=", "+", ""],
];

const PROGRAMMER_LAYOUT: &[&[&str]] = &[
    &["A", "B", "C", "D", "E"],
    &["F", "(", ")", "<<", ">>"],
    &["7", "8", "9", "&", "|"],
    &["4", "5", "6", "^", "~"],
    &["1", "2", "3", "+", "-"],
    &["0", ".", "=", "C", "His"],
];

const CURRENCY_LAYOUT: &[&[&str]] = &[
    &["USD", "EUR", "GBP", "JPY", "C"],
    &["7", "8", "9", "/", "CAD"],
    &["4", "5", "6", "*", "AUD"],
    &["1", "2", "3", "-", "CHF"],
    &["0", ".", "=", "+", "His"],
];

const UNIT_LAYOUT: &[&[&str]] = &[
    &["cm→m", "m→ft", "kg→lb", "°C→°F", "C"],
    &["7", "8", "9", "/", "km→mi"],
    &["4", "5", "6", "*", "L→gal"],
    &["1", "2", "3", "-", "m²→ft²"],
    &["0", ".", "=", "+", "His"],
];

pub fn button_layout(mode: Mode) -> &'static [&'static [&'static str]] {
    match mode {
        Mode::Standard => STANDARD_LAYOUT,
        Mode::Scientific => SCIENTIFIC_LAYOUT,
        Mode::Programmer => PROGRAMMER_LAYOUT,
        Mode::Currency => CURRENCY_LAYOUT,
        Mode::Unit => UNIT_LAYOUT,
    }
}

lazy_static! {
    pub static ref TOOLTIPS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("sin", "Sine function");
        m.insert("cos", "Cosine function");
        m.insert("tan", "Tangent function");
        m.insert("log", "Logarithm base 10");
        m.insert("sqrt", "Square root");
        m.insert("exp", "Exponential");
        m.insert("pi", "Pi (3.14159...)");
        m.insert("<<", "Bitwise left shift");
        m.insert(">>", "Bitwise right shift");
        m.insert("&", "Bitwise AND");
        m.insert("|", "Bitwise OR");
        m.insert("~", "Bitwise NOT");
        m.insert("^", "Bitwise XOR");
        m.insert("USD", "US Dollar");
        m.insert("EUR", "Euro");
        m.insert("GBP", "British Pound");
        m.insert("JPY", "Japanese Yen");
        m.insert("CAD", "Canadian Dollar");
        m.insert("AUD", "Australian Dollar");
        m.insert("CHF", "Swiss Franc");
        m.insert("cm→m", "Centimeters to Meters");
        m.insert("m→ft", "Meters to Feet");
        m.insert("kg→lb", "Kilograms to Pounds");
        m.insert("°C→°F", "Celsius to Fahrenheit");
        m.insert("km→mi", "Kilometers to Miles");
        m.insert("L→gal", "Liters to Gallons");
        m.insert("m²→ft²", "Square meters to Square feet");
        m
    };
}

pub fn tooltip(label: &str) -> Option<&'static str> {
    TOOLTIPS.get(label).copied()
}

/// Visual grouping for button colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Regular,
    Special,
    Equals,
}

pub fn button_kind(label: &str) -> ButtonKind {
    match label {
        "=" => ButtonKind::Equals,
        "C" | "His" => ButtonKind::Special,
        _ => ButtonKind::Regular,
    }
}

// Keys that build up the expression buffer rather than naming a
// conversion. Everything a converter-mode grid shares with the standard
// grid counts as an expression key.
fn is_expression_key(label: &str) -> bool {
    label.len() == 1
        && label
            .chars()
            .all(|c| c.is_ascii_digit() || "+-*/.()".contains(c))
}

/// Resolve a button label under the active mode to its command.
///
/// The hex "C" key in Programmer mode resolves to Clear, shadowing the
/// digit value 12.
pub fn command_for_label(label: &str, mode: Mode) -> Option<ButtonCommand> {
    if label.is_empty() {
        return None;
    }
    match label {
        "C" => Some(ButtonCommand::Clear),
        "=" => Some(ButtonCommand::Equals),
        "His" => Some(ButtonCommand::ShowHistory),
        _ => {
            if mode.is_converter() && !is_expression_key(label) {
                Some(ButtonCommand::Convert(label.to_string()))
            } else {
                Some(ButtonCommand::Insert(label.to_string()))
            }
        }
    }
}
