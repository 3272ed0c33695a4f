//! Length units and area conversion.
//!
//! All pricing is done in square feet regardless of the unit the
//! measurements were taken in.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

const INCHES_PER_FOOT: Decimal = dec!(12);
const CENTIMETERS_PER_FOOT: Decimal = dec!(30.48);
const FEET_PER_METER: Decimal = dec!(3.28084);

/// Unit a linear measurement was taken in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    Ft,
    In,
    Cm,
    M,
    /// Unrecognised unit; values are taken as-is
    #[serde(other)]
    Other,
}

impl LengthUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            LengthUnit::Ft => "ft",
            LengthUnit::In => "in",
            LengthUnit::Cm => "cm",
            LengthUnit::M => "m",
            LengthUnit::Other => "other",
        }
    }
}

/// Convert a linear measurement to feet.
///
/// Unknown units pass the value through unchanged.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use cotizador::pricing::units::{to_feet, LengthUnit};
///
/// assert_eq!(to_feet(dec!(24), LengthUnit::In), dec!(2));
/// assert_eq!(to_feet(dec!(7), LengthUnit::Other), dec!(7));
/// ```
pub fn to_feet(value: Decimal, unit: LengthUnit) -> Decimal {
    match unit {
        LengthUnit::Ft => value,
        LengthUnit::In => value / INCHES_PER_FOOT,
        LengthUnit::Cm => value / CENTIMETERS_PER_FOOT,
        LengthUnit::M => value * FEET_PER_METER,
        LengthUnit::Other => value,
    }
}

/// Area of a height x width rectangle in square feet.
pub fn area_sq_ft(height: Decimal, width: Decimal, unit: LengthUnit) -> Decimal {
    to_feet(height, unit) * to_feet(width, unit)
}

/// Same as [`area_sq_ft`], but `None` if the result does not fit in a `Decimal`.
pub fn checked_area_sq_ft(height: Decimal, width: Decimal, unit: LengthUnit) -> Option<Decimal> {
    checked_to_feet(height, unit)?.checked_mul(checked_to_feet(width, unit)?)
}

fn checked_to_feet(value: Decimal, unit: LengthUnit) -> Option<Decimal> {
    match unit {
        LengthUnit::M => value.checked_mul(FEET_PER_METER),
        _ => Some(to_feet(value, unit)),
    }
}
