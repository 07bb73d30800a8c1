//! A multi-mode calculator: Standard, Scientific, Programmer, Currency,
//! and Unit modes behind a single window, with a persisted calculation
//! history and a dark/light theme toggle.
//!
//! The expression pipeline normalizes mode-specific input, then routes it
//! to a literal-only parse (digits and arithmetic operators, no names) or
//! to the full parse whose only callable namespace is a fixed whitelist
//! of math functions. Conversions are fixed-rate table lookups.

pub mod calc_conversions;
pub mod calc_evaluator;
pub mod calc_function_registry;
pub mod calc_history;
pub mod calc_lexer;
pub mod calc_modes;
pub mod calc_parser;
pub mod calc_theme;
pub mod calc_types;
pub mod calc_ui;
