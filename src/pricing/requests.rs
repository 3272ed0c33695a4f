//! Quote request DTOs and input validation.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::calculators::fits_decimal_range;
use super::models::ServiceDescriptor;
use super::units::LengthUnit;

/// Largest accepted height or width, in the unit of the measurement.
/// Dimensions are stored as `DECIMAL(10,2)`.
pub const MAX_DIMENSION: Decimal = dec!(99999999.99);

/// Largest accepted letter count for a single quote
pub const MAX_LETTER_COUNT: i64 = 10_000;

/// How the base price is derived from the measured area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalcMethod {
    /// One piece; the measured area is the total area
    #[default]
    ByArea,
    /// Measured area is one letter; total area is multiplied by the count
    ByLetterCount,
}

/// Raw quote form data, before validation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteInput {
    #[serde(default)]
    pub service: Option<ServiceDescriptor>,
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

/// Validated quote request, ready for pricing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub service: ServiceDescriptor,
    #[serde(with = "rust_decimal::serde::str")]
    pub height: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub width: Decimal,
    pub unit: LengthUnit,
    pub method: CalcMethod,
    pub letter_count: u32,
    pub custom_color: bool,
    pub apply_tax: bool,
}

/// Outcome of validating a [`QuoteInput`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Check form data before pricing.
///
/// Collects every problem rather than stopping at the first one.
pub fn validate_input(input: &QuoteInput) -> ValidationReport {
    let mut errors = Vec::new();

    if input.service.is_none() {
        errors.push("A service must be selected".to_string());
    }

    check_dimension("Height", input.height, &mut errors);
    check_dimension("Width", input.width, &mut errors);

    if input.method == CalcMethod::ByLetterCount {
        match input.letter_count {
            Some(n) if n > MAX_LETTER_COUNT => {
                errors.push(format!("Letter count must be at most {}", MAX_LETTER_COUNT));
            }
            Some(n) if n >= 1 => {}
            _ => errors.push("Letter count must be at least 1".to_string()),
        }
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}

fn check_dimension(name: &str, value: Option<Decimal>, errors: &mut Vec<String>) {
    match value {
        Some(v) if v > MAX_DIMENSION => {
            errors.push(format!("{} must be at most {}", name, MAX_DIMENSION));
        }
        Some(v) if v > Decimal::ZERO => {}
        _ => errors.push(format!("{} must be greater than 0", name)),
    }
}

impl QuoteInput {
    /// Validate and convert into a [`QuoteRequest`].
    ///
    /// Returns the collected validation messages on failure, including the
    /// case where the amounts would not fit in a `Decimal`.
    pub fn into_request(self) -> Result<QuoteRequest, Vec<String>> {
        let report = validate_input(&self);
        if !report.valid {
            return Err(report.errors);
        }

        let (Some(service), Some(height), Some(width)) = (self.service, self.height, self.width)
        else {
            return Err(vec!["Incomplete quote input".to_string()]);
        };

        let letter_count = match self.method {
            CalcMethod::ByLetterCount => match self.letter_count.map(u32::try_from) {
                Some(Ok(n)) => n,
                _ => return Err(vec!["Letter count is out of range".to_string()]),
            },
            CalcMethod::ByArea => 1,
        };

        let request = QuoteRequest {
            service,
            height,
            width,
            unit: self.unit,
            method: self.method,
            letter_count,
            custom_color: self.custom_color,
            apply_tax: self.apply_tax,
        };

        if !fits_decimal_range(&request) {
            return Err(vec!["Quote amount is too large to price".to_string()]);
        }
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::rules::ConditionalRule;
    use rust_decimal_macros::dec;

    fn service() -> ServiceDescriptor {
        ServiceDescriptor {
            service_type: "LETRAS RECORTADAS".to_string(),
            category: "PVC".to_string(),
            thickness: "3MM".to_string(),
            gauge: String::new(),
            price_per_sq_ft: dec!(40),
            with_lighting: false,
            minimum_sq_ft: dec!(1.5),
            installation_included: None,
            condition: None,
            rule: ConditionalRule::None,
        }
    }

    fn valid_input() -> QuoteInput {
        QuoteInput {
            service: Some(service()),
            height: Some(dec!(2)),
            width: Some(dec!(1)),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_input_has_no_errors() {
        let report = validate_input(&valid_input());
        assert!(report.valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_empty_input_collects_all_errors() {
        let input = QuoteInput {
            method: CalcMethod::ByLetterCount,
            ..Default::default()
        };
        let report = validate_input(&input);
        assert!(!report.valid);
        assert_eq!(
            report.errors,
            vec![
                "A service must be selected",
                "Height must be greater than 0",
                "Width must be greater than 0",
                "Letter count must be at least 1",
            ]
        );
    }

    #[test]
    fn test_non_positive_dimensions_rejected() {
        let mut input = valid_input();
        input.height = Some(dec!(0));
        input.width = Some(dec!(-3));
        let report = validate_input(&input);
        assert_eq!(report.errors.len(), 2);
    }

    #[test]
    fn test_letter_count_only_checked_for_letter_method() {
        let mut input = valid_input();
        input.letter_count = Some(0);
        assert!(validate_input(&input).valid);

        input.method = CalcMethod::ByLetterCount;
        assert!(!validate_input(&input).valid);

        input.letter_count = Some(5);
        assert!(validate_input(&input).valid);
    }

    #[test]
    fn test_into_request_by_area_ignores_letter_count() {
        let mut input = valid_input();
        input.letter_count = Some(8);
        let request = input.into_request().unwrap();
        assert_eq!(request.letter_count, 1);
        assert_eq!(request.method, CalcMethod::ByArea);
    }

    #[test]
    fn test_into_request_by_letter_count() {
        let mut input = valid_input();
        input.method = CalcMethod::ByLetterCount;
        input.letter_count = Some(6);
        let request = input.into_request().unwrap();
        assert_eq!(request.letter_count, 6);
    }

    #[test]
    fn test_letter_count_above_limit_rejected() {
        let mut input = valid_input();
        input.method = CalcMethod::ByLetterCount;
        input.letter_count = Some(5_000_000_000);

        let report = validate_input(&input);
        assert_eq!(report.errors, vec!["Letter count must be at most 10000"]);

        let errors = input.into_request().unwrap_err();
        assert_eq!(errors, vec!["Letter count must be at most 10000"]);
    }

    #[test]
    fn test_letter_count_at_limit_is_kept() {
        let mut input = valid_input();
        input.method = CalcMethod::ByLetterCount;
        input.letter_count = Some(MAX_LETTER_COUNT);
        assert_eq!(input.into_request().unwrap().letter_count, 10_000);
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        let mut input = valid_input();
        input.unit = LengthUnit::M;
        input.height = Some(dec!(100000000000000));
        input.width = Some(dec!(100000000000000));

        let report = validate_input(&input);
        assert_eq!(
            report.errors,
            vec![
                "Height must be at most 99999999.99",
                "Width must be at most 99999999.99",
            ]
        );

        input.height = Some(MAX_DIMENSION);
        input.width = Some(MAX_DIMENSION);
        assert!(validate_input(&input).valid);
        assert!(input.into_request().is_ok());
    }

    #[test]
    fn test_amount_overflow_is_a_message() {
        let mut input = valid_input();
        input.service.as_mut().unwrap().price_per_sq_ft = Decimal::MAX;

        let errors = input.into_request().unwrap_err();
        assert_eq!(errors, vec!["Quote amount is too large to price"]);
    }

    #[test]
    fn test_into_request_returns_messages() {
        let errors = QuoteInput::default().into_request().unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_input_deserializes_numbers_and_defaults() {
        let input: QuoteInput = serde_json::from_str(
            r#"{"height": 24, "width": "12", "unit": "in", "method": "by_letter_count", "letter_count": 4}"#,
        )
        .unwrap();
        assert_eq!(input.height, Some(dec!(24)));
        assert_eq!(input.width, Some(dec!(12)));
        assert_eq!(input.unit, LengthUnit::In);
        assert_eq!(input.method, CalcMethod::ByLetterCount);
        assert!(!input.custom_color);
        assert!(input.service.is_none());
    }
}
