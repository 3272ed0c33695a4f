//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - no I/O, no shared state.

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

use super::models::ServiceDescriptor;
use super::requests::{CalcMethod, QuoteRequest};
use super::responses::{LedCostInfo, MinimumSizeCheck, QuoteResult, ServiceInfo};
use super::rules::ConditionalRule;
use super::units::{area_sq_ft, checked_area_sq_ft};

/// ITBMS rate applied to the subtotal when requested
pub const TAX_RATE: Decimal = dec!(0.07);

/// Custom color surcharge for cut letters, per ft²
pub const CUSTOM_COLOR_PER_SQ_FT: Decimal = dec!(2.00);

pub const LED_UNIT_COST: Decimal = dec!(1.25);
pub const TRANSFORMER_COST: Decimal = dec!(34.95);
/// Square feet of lit letter one transformer can drive
pub const TRANSFORMER_YIELD_SQ_FT: Decimal = dec!(15);

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use cotizador::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Price a validated quote request.
///
/// The minimum-size check is advisory and never changes the amounts.
/// Lighting costs are informational; they are already part of the per-ft²
/// price.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use cotizador::pricing::calculate_quote;
/// use cotizador::pricing::models::ServiceDescriptor;
/// use cotizador::pricing::requests::{CalcMethod, QuoteRequest};
/// use cotizador::pricing::rules::ConditionalRule;
/// use cotizador::pricing::units::LengthUnit;
///
/// let request = QuoteRequest {
///     service: ServiceDescriptor {
///         service_type: "LETRAS FORMADAS".to_string(),
///         category: "ACRILICO".to_string(),
///         thickness: String::new(),
///         gauge: String::new(),
///         price_per_sq_ft: dec!(40.00),
///         with_lighting: false,
///         minimum_sq_ft: dec!(1.5),
///         installation_included: None,
///         condition: None,
///         rule: ConditionalRule::None,
///     },
///     height: dec!(2),
///     width: dec!(1),
///     unit: LengthUnit::Ft,
///     method: CalcMethod::ByArea,
///     letter_count: 1,
///     custom_color: false,
///     apply_tax: true,
/// };
///
/// let result = calculate_quote(&request);
/// assert_eq!(result.total, dec!(85.60));
/// ```
pub fn calculate_quote(request: &QuoteRequest) -> QuoteResult {
    let service = &request.service;
    let price_per_area = service.price_per_sq_ft;

    let unit_area = area_sq_ft(request.height, request.width, request.unit);
    let minimum_size = check_minimum_size(service, unit_area);

    let (total_area, raw_base) = match request.method {
        CalcMethod::ByArea => (unit_area, price_per_area * unit_area),
        CalcMethod::ByLetterCount => {
            let count = Decimal::from(request.letter_count);
            (unit_area * count, price_per_area * unit_area * count)
        }
    };

    let base_price = service.rule.apply(total_area, raw_base);
    let color_surcharge = color_surcharge(service, total_area, request.custom_color);

    let subtotal = base_price + color_surcharge;
    let tax = if request.apply_tax {
        subtotal * TAX_RATE
    } else {
        Decimal::ZERO
    };
    let total = subtotal + tax;

    QuoteResult {
        unit_area,
        total_area,
        price_per_area,
        base_price,
        color_surcharge,
        subtotal,
        tax,
        total,
        minimum_size,
        info: service_info(service, total_area),
    }
}

/// Whether [`calculate_quote`] can price `request` without overflowing.
///
/// Runs the same steps with checked arithmetic. `calculate_quote` itself
/// panics on overflow, so requests must pass this first.
pub fn fits_decimal_range(request: &QuoteRequest) -> bool {
    checked_subtotal(request)
        .and_then(|subtotal| subtotal.checked_mul(Decimal::ONE + TAX_RATE))
        .is_some()
}

fn checked_subtotal(request: &QuoteRequest) -> Option<Decimal> {
    let service = &request.service;
    let unit_area = checked_area_sq_ft(request.height, request.width, request.unit)?;
    let total_area = match request.method {
        CalcMethod::ByArea => unit_area,
        CalcMethod::ByLetterCount => unit_area.checked_mul(Decimal::from(request.letter_count))?,
    };

    let raw_base = service.price_per_sq_ft.checked_mul(total_area)?;
    let base_price = match service.rule {
        ConditionalRule::SurchargeOver { percent, .. } => {
            raw_base.checked_mul(Decimal::ONE.checked_add(percent.checked_div(dec!(100))?)?)?
        }
        ConditionalRule::FlatPriceUpTo { flat_price, .. } => raw_base.max(flat_price),
        ConditionalRule::None => raw_base,
    };

    base_price.checked_add(CUSTOM_COLOR_PER_SQ_FT.checked_mul(total_area)?)
}

/// Compare the unit area against the service minimum.
pub fn check_minimum_size(service: &ServiceDescriptor, unit_area: Decimal) -> MinimumSizeCheck {
    let minimum = service.minimum_sq_ft;
    MinimumSizeCheck {
        area_meets_minimum: unit_area >= minimum,
        minimum,
        shortfall: minimum - unit_area,
    }
}

/// Custom color surcharge; cut letters only.
pub fn color_surcharge(service: &ServiceDescriptor, total_area: Decimal, custom_color: bool) -> Decimal {
    if custom_color && service.is_cut_letters() {
        CUSTOM_COLOR_PER_SQ_FT * total_area
    } else {
        Decimal::ZERO
    }
}

/// Number of transformers needed to light `total_area` ft².
pub fn transformer_count(total_area: Decimal) -> u32 {
    (total_area / TRANSFORMER_YIELD_SQ_FT)
        .ceil()
        .to_u32()
        .unwrap_or(0)
}

fn service_info(service: &ServiceDescriptor, total_area: Decimal) -> ServiceInfo {
    let led_costs = service.with_lighting.then(|| LedCostInfo {
        led_unit_cost: LED_UNIT_COST,
        transformer_cost: TRANSFORMER_COST,
        transformer_yield_sq_ft: TRANSFORMER_YIELD_SQ_FT,
        transformer_count: transformer_count(total_area),
    });

    ServiceInfo {
        has_lighting: service.with_lighting,
        is_reinforced_aluminum: service.is_reinforced_aluminum(),
        led_costs,
        installation_included: service.installation_included.clone(),
        condition: service.condition.clone(),
    }
}
