//! Quote form as submitted to the binary.
//!
//! The service is named by type, category and optional thickness and is
//! resolved against the [`Catalog`] before validation.

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::warn;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::pricing::requests::{CalcMethod, QuoteInput};
use crate::pricing::units::LengthUnit;

#[derive(Debug, Clone, Deserialize)]
pub struct QuoteCommand {
    pub service_type: String,
    pub category: String,
    #[serde(default)]
    pub thickness: Option<String>,
    #[serde(default)]
    pub height: Option<Decimal>,
    #[serde(default)]
    pub width: Option<Decimal>,
    #[serde(default)]
    pub unit: LengthUnit,
    #[serde(default)]
    pub method: CalcMethod,
    #[serde(default)]
    pub letter_count: Option<i64>,
    #[serde(default)]
    pub custom_color: bool,
    #[serde(default)]
    pub apply_tax: bool,
}

impl QuoteCommand {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Resolve the named service and build the form data.
    ///
    /// An unknown service leaves `service` empty so validation reports it.
    pub fn into_input(self, catalog: &Catalog) -> QuoteInput {
        let service = match catalog.find(
            &self.service_type,
            &self.category,
            self.thickness.as_deref(),
        ) {
            Ok(service) => Some(service.clone()),
            Err(e) => {
                warn!("{}", e);
                None
            }
        };

        QuoteInput {
            service,
            height: self.height,
            width: self.width,
            unit: self.unit,
            method: self.method,
            letter_count: self.letter_count,
            custom_color: self.custom_color,
            apply_tax: self.apply_tax,
        }
    }
}
