//! Pricing engine module for the quoting system.
//!
//! Prices sign fabrication quotes from the reference rate table: area in
//! square feet, conditional rules, custom color surcharge and ITBMS.

pub mod calculators;
pub mod models;
pub mod parsing;
pub mod requests;
pub mod responses;
pub mod rules;
pub mod services;
pub mod units;

// Re-export commonly used items
pub use calculators::{calculate_quote, round_money};
pub use parsing::{format_money, parse_price};
pub use services::{price_quote, PricedQuote, PricingError};
