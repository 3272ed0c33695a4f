//! Quote result DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Priced quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteResult {
    #[serde(with = "rust_decimal::serde::str")]
    pub unit_area: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_area: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub price_per_area: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub base_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub color_surcharge: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
    pub minimum_size: MinimumSizeCheck,
    pub info: ServiceInfo,
}

/// Advisory comparison of the unit area against the service minimum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinimumSizeCheck {
    pub area_meets_minimum: bool,
    #[serde(with = "rust_decimal::serde::str")]
    pub minimum: Decimal,
    /// Minimum minus unit area; negative when the minimum is exceeded
    #[serde(with = "rust_decimal::serde::str")]
    pub shortfall: Decimal,
}

/// Informational flags about the priced service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub has_lighting: bool,
    pub is_reinforced_aluminum: bool,
    pub led_costs: Option<LedCostInfo>,
    pub installation_included: Option<String>,
    pub condition: Option<String>,
}

/// LED and transformer reference costs for lit services.
///
/// Already folded into the per-ft² price; display only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedCostInfo {
    #[serde(with = "rust_decimal::serde::str")]
    pub led_unit_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub transformer_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub transformer_yield_sq_ft: Decimal,
    pub transformer_count: u32,
}

/// Generic pricing error response
#[derive(Debug, Serialize)]
pub struct PricingErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}
