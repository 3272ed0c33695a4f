//! Summary counts over quotes and tickets.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::quotes::{Quote, QuoteStatus};
use super::tickets::{Ticket, TicketPriority, TicketStatus};

/// Count and summed total for one quote status
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusTotals {
    pub status: QuoteStatus,
    pub count: usize,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteStats {
    /// Statuses with at least one quote, in lifecycle order
    pub by_status: Vec<StatusTotals>,
    pub count: usize,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TicketStats {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub closed: usize,
    pub pending: usize,
    /// Tickets at emergency priority, whatever their status
    pub emergency: usize,
}

/// Count quotes and sum their totals per status.
///
/// `from` and `to` bound `created_at`, both inclusive.
pub fn quote_stats(
    quotes: &[Quote],
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> QuoteStats {
    let selected: Vec<&Quote> = quotes
        .iter()
        .filter(|q| from.map_or(true, |f| q.created_at >= f))
        .filter(|q| to.map_or(true, |t| q.created_at <= t))
        .collect();

    let by_status = QuoteStatus::ALL
        .iter()
        .filter_map(|&status| {
            let matching = selected.iter().filter(|q| q.status == status);
            let count = matching.clone().count();
            (count > 0).then(|| StatusTotals {
                status,
                count,
                total: matching.map(|q| q.total()).sum(),
            })
        })
        .collect();

    QuoteStats {
        by_status,
        count: selected.len(),
        total: selected.iter().map(|q| q.total()).sum(),
    }
}

/// Count tickets per status, optionally for one department.
pub fn ticket_stats(tickets: &[Ticket], department_id: Option<i64>) -> TicketStats {
    tickets
        .iter()
        .filter(|t| department_id.map_or(true, |d| t.department_id == d))
        .fold(TicketStats::default(), |mut stats, ticket| {
            stats.total += 1;
            match ticket.status {
                TicketStatus::Open => stats.open += 1,
                TicketStatus::InProgress => stats.in_progress += 1,
                TicketStatus::Resolved => stats.resolved += 1,
                TicketStatus::Closed => stats.closed += 1,
                TicketStatus::Pending => stats.pending += 1,
                TicketStatus::Cancelled => {}
            }
            if ticket.priority == TicketPriority::Emergency {
                stats.emergency += 1;
            }
            stats
        })
}
