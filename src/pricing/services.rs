//! Pricing service functions.
//!
//! Ties validation, calculation and history recording together. A failure to
//! record never invalidates a computed price.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::history::{HistoryEntry, QuoteHistory};

use super::calculators::calculate_quote;
use super::parsing::{format_money, format_number};
use super::requests::{QuoteInput, QuoteRequest};
use super::responses::{PricingErrorResponse, QuoteResult};

/// Quote priced through [`price_quote`]
#[derive(Debug, Clone, Serialize)]
pub struct PricedQuote {
    pub request: QuoteRequest,
    pub result: QuoteResult,
    /// History entry id, when recording succeeded
    pub history_id: Option<Uuid>,
    /// Non-fatal problem recording the quote
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Pricing error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    Validation { errors: Vec<String> },
}

impl std::fmt::Display for PricingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PricingError::Validation { errors } => {
                write!(f, "Invalid quote input: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for PricingError {}

impl PricingError {
    pub fn to_response(&self) -> PricingErrorResponse {
        match self {
            PricingError::Validation { errors } => PricingErrorResponse {
                error_type: "validation".to_string(),
                message: "Invalid quote input".to_string(),
                details: errors.clone(),
            },
        }
    }
}

/// Validate, price and record a quote.
///
/// # Arguments
/// * `input` - Raw form data
/// * `history` - Store the priced quote is appended to
/// * `now` - Timestamp for the history entry
///
/// # Returns
/// `PricedQuote` with the result; a history failure becomes `warning`
pub fn price_quote(
    input: QuoteInput,
    history: &mut dyn QuoteHistory,
    now: DateTime<Utc>,
) -> Result<PricedQuote, PricingError> {
    let request = input
        .into_request()
        .map_err(|errors| PricingError::Validation { errors })?;

    let result = calculate_quote(&request);
    debug!(
        "Priced {} at {} ({} ft² measured in {})",
        request.service.label(),
        format_money(result.total),
        format_number(result.total_area, 2),
        request.unit.as_str()
    );

    let entry = HistoryEntry::new(request.clone(), result.clone(), now);
    let entry_id = entry.id;

    let (history_id, warning) = match history.append(entry) {
        Ok(()) => (Some(entry_id), None),
        Err(e) => {
            warn!("Failed to record quote in history: {}", e);
            (None, Some(format!("Quote was priced but not saved: {}", e)))
        }
    };

    Ok(PricedQuote {
        request,
        result,
        history_id,
        warning,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{HistoryError, InMemoryHistory};
    use crate::pricing::models::ServiceDescriptor;
    use crate::pricing::rules::ConditionalRule;
    use rust_decimal_macros::dec;

    struct FailingHistory;

    impl QuoteHistory for FailingHistory {
        fn append(&mut self, _entry: HistoryEntry) -> Result<(), HistoryError> {
            Err(HistoryError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }

        fn entries(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
            Ok(Vec::new())
        }

        fn remove(&mut self, _id: Uuid) -> Result<bool, HistoryError> {
            Ok(false)
        }

        fn clear(&mut self) -> Result<(), HistoryError> {
            Ok(())
        }
    }

    fn input() -> QuoteInput {
        QuoteInput {
            service: Some(ServiceDescriptor {
                service_type: "LETRAS FORMADAS".to_string(),
                category: "ACRILICO".to_string(),
                thickness: String::new(),
                gauge: String::new(),
                price_per_sq_ft: dec!(40.00),
                with_lighting: false,
                minimum_sq_ft: dec!(1.5),
                installation_included: None,
                condition: None,
                rule: ConditionalRule::None,
            }),
            height: Some(dec!(2)),
            width: Some(dec!(1)),
            apply_tax: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_price_quote_records_history() {
        let mut history = InMemoryHistory::new();
        let priced = price_quote(input(), &mut history, Utc::now()).unwrap();

        assert_eq!(priced.result.total, dec!(85.60));
        assert!(priced.warning.is_none());
        let entries = history.entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(Some(entries[0].id), priced.history_id);
    }

    #[test]
    fn test_history_failure_is_a_warning() {
        let mut history = FailingHistory;
        let priced = price_quote(input(), &mut history, Utc::now()).unwrap();

        assert_eq!(priced.result.total, dec!(85.60));
        assert!(priced.history_id.is_none());
        assert!(priced.warning.unwrap().contains("read-only"));
    }

    #[test]
    fn test_invalid_input_is_rejected_before_pricing() {
        let mut history = InMemoryHistory::new();
        let mut bad = input();
        bad.height = None;

        let err = price_quote(bad, &mut history, Utc::now()).unwrap_err();
        assert_eq!(
            err,
            PricingError::Validation {
                errors: vec!["Height must be greater than 0".to_string()]
            }
        );
        assert!(history.is_empty());
    }

    #[test]
    fn test_huge_dimensions_are_rejected_not_panicking() {
        let mut history = InMemoryHistory::new();
        let mut huge = input();
        huge.unit = crate::pricing::units::LengthUnit::M;
        huge.height = Some(dec!(100000000000000));
        huge.width = Some(dec!(100000000000000));

        let err = price_quote(huge, &mut history, Utc::now()).unwrap_err();
        assert_eq!(
            err,
            PricingError::Validation {
                errors: vec![
                    "Height must be at most 99999999.99".to_string(),
                    "Width must be at most 99999999.99".to_string(),
                ]
            }
        );
        assert!(history.is_empty());
    }

    #[test]
    fn test_letter_count_beyond_u32_is_rejected() {
        let mut history = InMemoryHistory::new();
        let mut many = input();
        many.method = crate::pricing::requests::CalcMethod::ByLetterCount;
        many.letter_count = Some(5_000_000_000);

        let err = price_quote(many, &mut history, Utc::now()).unwrap_err();
        assert!(err.to_string().contains("Letter count must be at most 10000"));
        assert!(history.is_empty());
    }

    #[test]
    fn test_pricing_error_display_and_response() {
        let err = PricingError::Validation {
            errors: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(err.to_string(), "Invalid quote input: a; b");

        let response = err.to_response();
        assert_eq!(response.error_type, "validation");
        assert_eq!(response.details.len(), 2);
    }
}
