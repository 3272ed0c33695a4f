//! Conditional pricing rules attached to reference services.
//!
//! The reference table carries a free-text `CONDICIONAL` column. Only two
//! phrasings carry pricing meaning; they are recognised once, when the
//! catalog is loaded, and turned into a [`ConditionalRule`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Marker for "round the total to 50,00 when the area is at most 3 ft²"
pub const FLAT_PRICE_MARKER: &str = "≤ A 3 PIE2 REDONDIAR EL TOTAL DEL CALCULO 50,00";

/// Marker for "add a 10% reinforced internal structure"
pub const REINFORCED_SURCHARGE_MARKER: &str =
    "SUMAR UNA ESTRUCTURA INTERNA REFORZADA EQUIVALENTE A UN 10%";

/// Special pricing adjustment for a service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConditionalRule {
    #[default]
    None,
    /// Replace the base price with `flat_price` when total area <= `max_area`
    FlatPriceUpTo {
        #[serde(with = "rust_decimal::serde::str")]
        max_area: Decimal,
        #[serde(with = "rust_decimal::serde::str")]
        flat_price: Decimal,
    },
    /// Add `percent` to the base price when total area > `min_area`
    SurchargeOver {
        #[serde(with = "rust_decimal::serde::str")]
        min_area: Decimal,
        #[serde(with = "rust_decimal::serde::str")]
        percent: Decimal,
    },
}

impl ConditionalRule {
    /// Recognise the rule carried by a condition text.
    ///
    /// The flat-price phrasing is checked first and wins if both appear.
    pub fn from_condition_text(text: Option<&str>) -> Self {
        let Some(text) = text else {
            return ConditionalRule::None;
        };

        if text.contains(FLAT_PRICE_MARKER) {
            ConditionalRule::FlatPriceUpTo {
                max_area: dec!(3),
                flat_price: dec!(50.00),
            }
        } else if text.contains(REINFORCED_SURCHARGE_MARKER) {
            ConditionalRule::SurchargeOver {
                min_area: dec!(3),
                percent: dec!(10),
            }
        } else {
            ConditionalRule::None
        }
    }

    /// Apply the rule to a computed base price.
    pub fn apply(&self, total_area: Decimal, base_price: Decimal) -> Decimal {
        match *self {
            ConditionalRule::None => base_price,
            ConditionalRule::FlatPriceUpTo {
                max_area,
                flat_price,
            } => {
                if total_area <= max_area {
                    flat_price
                } else {
                    base_price
                }
            }
            ConditionalRule::SurchargeOver { min_area, percent } => {
                if total_area > min_area {
                    base_price * (Decimal::ONE + percent / dec!(100))
                } else {
                    base_price
                }
            }
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ConditionalRule::None)
    }
}
