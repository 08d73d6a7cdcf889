//! Atrium Common - Shared types and portal logic for the Atrium tenant portal
//!
//! Holds the pure request-intake core (priority classification, ticket
//! identity) plus the record types, storage port, CSV export, canned
//! assistant, and configuration shared by atriumd and atriumctl.

pub mod assistant;
pub mod config;
pub mod contacts;
pub mod csv_export;
pub mod identity;
pub mod priority;
pub mod sample_data;
pub mod store;
pub mod types;

pub use identity::{generate_ticket_id, TicketIdentity};
pub use priority::{calculate_priority, ClassificationInput, PriorityLevel};
pub use types::*;
