//! Work orders opened from approved quotes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::pricing::units::LengthUnit;

use super::quotes::{Quote, QuoteStatus};
use super::WorkflowError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketPriority {
    Low,
    #[default]
    Normal,
    High,
    Emergency,
}

impl TicketPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketPriority::Low => "low",
            TicketPriority::Normal => "normal",
            TicketPriority::High => "high",
            TicketPriority::Emergency => "emergency",
        }
    }
}

impl std::fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
    Pending,
    Cancelled,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::Resolved => "resolved",
            TicketStatus::Closed => "closed",
            TicketStatus::Pending => "pending",
            TicketStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quote data copied onto the ticket for the shop floor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSummary {
    pub quote_number: String,
    pub service_type: String,
    pub category: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub height: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub width: Decimal,
    pub unit: LengthUnit,
    pub letter_count: u32,
    pub thickness: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// Written by the system when the ticket changes
    Update,
    /// Free text left by a user
    Comment,
}

/// Entry in a ticket's activity log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketActivity {
    pub at: DateTime<Utc>,
    pub kind: ActivityKind,
    /// User who caused the entry, when known
    pub user_id: Option<i64>,
    pub message: String,
}

/// Data for opening a ticket
#[derive(Debug, Clone, PartialEq)]
pub struct NewTicket {
    pub number: String,
    pub department_id: i64,
    pub assignee_id: Option<i64>,
    pub created_by: i64,
    pub work: String,
    pub priority: TicketPriority,
    pub delivery_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Fields to change on a ticket; `None` leaves a field as it is
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TicketUpdate {
    pub department_id: Option<i64>,
    /// `Some(None)` unassigns the ticket
    pub assignee_id: Option<Option<i64>>,
    pub work: Option<String>,
    pub priority: Option<TicketPriority>,
    pub status: Option<TicketStatus>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Work order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub number: String,
    pub client_id: i64,
    pub department_id: i64,
    pub assignee_id: Option<i64>,
    pub created_by: i64,
    pub work: String,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    pub delivery_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub quote: Option<QuoteSummary>,
    pub created_at: DateTime<Utc>,
    pub activity: Vec<TicketActivity>,
}

impl Ticket {
    /// Open a ticket for an approved quote.
    ///
    /// The quote moves to `in_production`; a quote gets at most one ticket.
    pub fn from_quote(
        quote: &mut Quote,
        new: NewTicket,
        now: DateTime<Utc>,
    ) -> Result<Self, WorkflowError> {
        if new.work.trim().is_empty() {
            return Err(WorkflowError::MissingField {
                field: "Work description",
            });
        }
        if quote.has_ticket {
            return Err(WorkflowError::TicketExists {
                quote_number: quote.number.clone(),
            });
        }
        if quote.status != QuoteStatus::Approved {
            return Err(WorkflowError::NotApproved {
                quote_number: quote.number.clone(),
                status: quote.status.to_string(),
            });
        }

        let summary = QuoteSummary {
            quote_number: quote.number.clone(),
            service_type: quote.service_type.clone(),
            category: quote.category.clone(),
            total: quote.total(),
            height: quote.height,
            width: quote.width,
            unit: quote.unit,
            letter_count: quote.letter_count,
            thickness: quote.thickness.clone(),
        };

        quote.status = QuoteStatus::InProduction;
        quote.has_ticket = true;
        info!("Ticket {} opened from quote {}", new.number, quote.number);

        Ok(Self {
            activity: vec![TicketActivity {
                at: now,
                kind: ActivityKind::Update,
                user_id: Some(new.created_by),
                message: format!("Ticket created from quote #{}", quote.number),
            }],
            number: new.number,
            client_id: quote.client_id,
            department_id: new.department_id,
            assignee_id: new.assignee_id,
            created_by: new.created_by,
            work: new.work,
            priority: new.priority,
            status: TicketStatus::Open,
            delivery_date: new.delivery_date,
            notes: new.notes,
            quote: Some(summary),
            created_at: now,
        })
    }

    /// Change status and log the change
    pub fn change_status(&mut self, status: TicketStatus, now: DateTime<Utc>) {
        if status == self.status {
            return;
        }
        self.log(
            now,
            ActivityKind::Update,
            None,
            format!("Status changed from \"{}\" to \"{}\"", self.status, status),
        );
        self.status = status;
    }

    /// Apply `update` and log what changed.
    ///
    /// Department, assignment, priority and status changes are listed in a
    /// single `Ticket updated: ...` entry. Work, dates and notes are applied
    /// without an entry. Returns the listed changes.
    pub fn update(&mut self, update: TicketUpdate, user_id: i64, now: DateTime<Utc>) -> Vec<String> {
        let mut changes = Vec::new();

        if let Some(department_id) = update.department_id {
            if department_id != self.department_id {
                changes.push("department".to_string());
                self.department_id = department_id;
            }
        }
        if let Some(assignee_id) = update.assignee_id {
            if assignee_id != self.assignee_id {
                changes.push("assignment".to_string());
                self.assignee_id = assignee_id;
            }
        }
        if let Some(priority) = update.priority {
            if priority != self.priority {
                changes.push(format!("priority: {} → {}", self.priority, priority));
                self.priority = priority;
            }
        }
        if let Some(status) = update.status {
            if status != self.status {
                changes.push(format!("status: {} → {}", self.status, status));
                self.status = status;
            }
        }

        if let Some(work) = update.work.filter(|w| !w.trim().is_empty()) {
            self.work = work;
        }
        if update.delivery_date.is_some() {
            self.delivery_date = update.delivery_date;
        }
        if update.notes.is_some() {
            self.notes = update.notes;
        }

        if changes.is_empty() {
            debug!("Ticket {} updated without logged changes", self.number);
        } else {
            self.log(
                now,
                ActivityKind::Update,
                Some(user_id),
                format!("Ticket updated: {}", changes.join(", ")),
            );
        }
        changes
    }

    /// Add a user comment to the activity log
    pub fn add_comment(
        &mut self,
        user_id: i64,
        message: &str,
        now: DateTime<Utc>,
    ) -> Result<(), WorkflowError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(WorkflowError::MissingField { field: "Message" });
        }
        self.log(now, ActivityKind::Comment, Some(user_id), message.to_string());
        Ok(())
    }

    /// Entries of one kind, oldest first
    pub fn activity_of(&self, kind: ActivityKind) -> impl Iterator<Item = &TicketActivity> {
        self.activity.iter().filter(move |a| a.kind == kind)
    }

    fn log(&mut self, at: DateTime<Utc>, kind: ActivityKind, user_id: Option<i64>, message: String) {
        self.activity.push(TicketActivity {
            at,
            kind,
            user_id,
            message,
        });
    }
}

/// Next ticket number in `NNNNNN-YYYY` form.
///
/// `last` is the highest ticket number issued so far.
pub fn next_ticket_number(year: i32, last: Option<&str>) -> String {
    let suffix = format!("-{}", year);
    let sequence = last
        .and_then(|n| n.strip_suffix(suffix.as_str()))
        .and_then(|seq| seq.parse::<u32>().ok())
        .map_or(1, |n| n + 1);

    format!("{:06}{}", sequence, suffix)
}
