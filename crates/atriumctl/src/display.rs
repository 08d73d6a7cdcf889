//! Terminal formatting for portal records

use atrium_common::priority::PriorityLevel;
use atrium_common::types::{MaintenanceTicket, TicketStatus};
use owo_colors::OwoColorize;

/// Colored priority badge: Low green, Medium yellow, High red,
/// Critical bold magenta
pub fn priority_badge(priority: PriorityLevel) -> String {
    match priority {
        PriorityLevel::Low => format!("{}", priority.as_str().green()),
        PriorityLevel::Medium => format!("{}", priority.as_str().yellow()),
        PriorityLevel::High => format!("{}", priority.as_str().red()),
        PriorityLevel::Critical => format!("{}", priority.as_str().magenta().bold()),
    }
}

pub fn status_label(status: TicketStatus) -> String {
    match status {
        TicketStatus::Open => format!("{}", status.as_str().cyan()),
        TicketStatus::Assigned => format!("{}", status.as_str().yellow()),
        TicketStatus::Resolved => format!("{}", status.as_str().green()),
    }
}

/// One-line ticket summary for list output
pub fn ticket_line(ticket: &MaintenanceTicket) -> String {
    format!(
        "{}  {:>8}  {:>8}  {}  {}",
        ticket.ticket_id,
        priority_badge(ticket.priority),
        status_label(ticket.status),
        ticket.created_at.format("%Y-%m-%d"),
        ticket.title,
    )
}
