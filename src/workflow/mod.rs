//! Approval workflow: quote numbering, quote lifecycle and work orders.

pub mod quotes;
pub mod stats;
pub mod tickets;

pub use quotes::{next_quote_number, Quote, QuoteStatus, Role};
pub use stats::{quote_stats, ticket_stats, QuoteStats, StatusTotals, TicketStats};
pub use tickets::{
    next_ticket_number, ActivityKind, NewTicket, Ticket, TicketPriority, TicketStatus,
    TicketUpdate,
};

/// Workflow rule violations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowError {
    #[error("Only administrators can set a quote to {status}")]
    Forbidden { status: String },

    #[error("Cannot move quote from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Quote {quote_number} is {status}; only approved quotes can become tickets")]
    NotApproved { quote_number: String, status: String },

    #[error("Quote {quote_number} already has a ticket")]
    TicketExists { quote_number: String },

    #[error("{field} is required")]
    MissingField { field: &'static str },
}
