//! Quote records, numbering and approval lifecycle.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pricing::requests::{CalcMethod, QuoteRequest};
use crate::pricing::responses::QuoteResult;
use crate::pricing::units::LengthUnit;

use super::WorkflowError;

const QUOTE_PREFIX: &str = "COT";

/// Quote lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    Draft,
    Sent,
    Approved,
    Rejected,
    Expired,
    /// A work order has been opened for the quote
    InProduction,
}

impl QuoteStatus {
    pub const ALL: [QuoteStatus; 6] = [
        QuoteStatus::Draft,
        QuoteStatus::Sent,
        QuoteStatus::Approved,
        QuoteStatus::Rejected,
        QuoteStatus::Expired,
        QuoteStatus::InProduction,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteStatus::Draft => "draft",
            QuoteStatus::Sent => "sent",
            QuoteStatus::Approved => "approved",
            QuoteStatus::Rejected => "rejected",
            QuoteStatus::Expired => "expired",
            QuoteStatus::InProduction => "in_production",
        }
    }

    /// Statuses that only an administrator may set
    pub fn requires_admin(&self) -> bool {
        matches!(self, QuoteStatus::Approved | QuoteStatus::Rejected)
    }
}

impl std::fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role of the user changing a quote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Seller,
}

/// Persistable quote snapshot with its lifecycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub number: String,
    pub client_id: i64,
    pub user_id: i64,
    pub service_type: String,
    pub category: String,
    pub thickness: String,
    pub method: CalcMethod,
    #[serde(with = "rust_decimal::serde::str")]
    pub height: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub width: Decimal,
    pub unit: LengthUnit,
    pub letter_count: u32,
    pub custom_color: bool,
    pub apply_tax: bool,
    pub with_lighting: bool,
    pub result: QuoteResult,
    pub applied_condition: Option<String>,
    pub notes: Option<String>,
    pub status: QuoteStatus,
    pub created_at: DateTime<Utc>,
    pub sent_at: Option<DateTime<Utc>>,
    pub approved_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub has_ticket: bool,
}

impl Quote {
    /// Build a draft quote from a priced request
    pub fn from_result(
        number: String,
        client_id: i64,
        user_id: i64,
        request: &QuoteRequest,
        result: &QuoteResult,
        now: DateTime<Utc>,
    ) -> Self {
        let service = &request.service;
        Self {
            number,
            client_id,
            user_id,
            service_type: service.service_type.clone(),
            category: service.category.clone(),
            thickness: service.thickness.clone(),
            method: request.method,
            height: request.height,
            width: request.width,
            unit: request.unit,
            letter_count: request.letter_count,
            custom_color: request.custom_color,
            apply_tax: request.apply_tax,
            with_lighting: service.with_lighting,
            result: result.clone(),
            applied_condition: service.condition.clone(),
            notes: None,
            status: QuoteStatus::Draft,
            created_at: now,
            sent_at: None,
            approved_at: None,
            expires_at: None,
            has_ticket: false,
        }
    }

    pub fn total(&self) -> Decimal {
        self.result.total
    }

    /// Move the quote to a new status.
    ///
    /// `in_production` is reserved for ticket creation.
    pub fn change_status(
        &mut self,
        status: QuoteStatus,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<(), WorkflowError> {
        if status.requires_admin() && role != Role::Admin {
            return Err(WorkflowError::Forbidden {
                status: status.to_string(),
            });
        }
        if status == QuoteStatus::InProduction {
            return Err(WorkflowError::InvalidTransition {
                from: self.status.to_string(),
                to: status.to_string(),
            });
        }

        match status {
            QuoteStatus::Sent if self.sent_at.is_none() => self.sent_at = Some(now),
            QuoteStatus::Approved => self.approved_at = Some(now),
            _ => {}
        }

        tracing::info!("Quote {} status {} -> {}", self.number, self.status, status);
        self.status = status;
        Ok(())
    }

    /// Mark expired when past `expires_at`; returns whether it changed
    pub fn expire_if_due(&mut self, now: DateTime<Utc>) -> bool {
        let open = matches!(self.status, QuoteStatus::Draft | QuoteStatus::Sent);
        match self.expires_at {
            Some(at) if open && now >= at => {
                self.status = QuoteStatus::Expired;
                true
            }
            _ => false,
        }
    }
}

/// Next quote number in `COT-YYYY-NNNN` form.
///
/// `last` is the highest number issued so far; numbers from another year
/// or that fail to parse restart the sequence.
///
/// # Examples
/// ```
/// use cotizador::workflow::next_quote_number;
///
/// assert_eq!(next_quote_number(2025, None), "COT-2025-0001");
/// assert_eq!(next_quote_number(2025, Some("COT-2025-0041")), "COT-2025-0042");
/// ```
pub fn next_quote_number(year: i32, last: Option<&str>) -> String {
    let prefix = format!("{}-{}-", QUOTE_PREFIX, year);
    let sequence = last
        .and_then(|n| n.strip_prefix(prefix.as_str()))
        .and_then(|seq| seq.parse::<u32>().ok())
        .map_or(1, |n| n + 1);

    format!("{}{:04}", prefix, sequence)
}
