//! Request Intake
//!
//! Turns a submission payload into a persisted ticket: classify priority
//! from the form fields, mint the ticket identity, stamp timestamps, and
//! open the ticket. The classifier and identity generator are pure; all
//! persistence stays here.

use atrium_common::identity::{Clock, RandomTokens, SystemClock, TicketIdGenerator, TokenSource};
use atrium_common::priority::{calculate_priority, ClassificationInput};
use atrium_common::store::{PortalStore, StoreResult};
use atrium_common::types::{
    MaintenanceTicket, PreferredSchedule, RequestType, TicketStatus,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Submission payload from the request form
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub property: String,
    #[serde(default)]
    pub building: Option<String>,
    pub floor: i32,
    pub unit: String,
    pub request_type: RequestType,
    pub category: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub preferred_schedule: Option<PreferredSchedule>,
    #[serde(default)]
    pub access_instructions: Option<String>,
    pub contact_phone: String,
    #[serde(default)]
    pub photos: Vec<String>,
}

/// Build the open ticket for a submission, using the given identity generator
pub fn build_ticket<C: Clock, T: TokenSource>(
    generator: &TicketIdGenerator<C, T>,
    payload: SubmitRequest,
) -> MaintenanceTicket {
    let priority = calculate_priority(&ClassificationInput {
        request_type: payload.request_type.as_str().to_string(),
        title: payload.title.clone(),
        description: payload.description.clone(),
        category: payload.category.clone(),
        photo_count: payload.photos.len() as u32,
    });

    let identity = generator.generate(payload.floor, &payload.unit);
    let now = Utc::now();

    MaintenanceTicket {
        ticket_id: identity.ticket_id,
        hash_id: identity.hash_id,
        property: payload.property,
        building: payload.building,
        floor: payload.floor,
        unit: payload.unit,
        request_type: payload.request_type,
        category: payload.category,
        title: payload.title,
        description: payload.description,
        preferred_schedule: payload.preferred_schedule,
        access_instructions: payload.access_instructions,
        contact_phone: payload.contact_phone,
        photos: payload.photos,
        priority,
        status: TicketStatus::Open,
        created_at: now,
        updated_at: now,
    }
}

/// Classify, mint identity, and persist a submission. Also clears any saved
/// draft, since the form it came from has been submitted.
pub fn submit(store: &dyn PortalStore, payload: SubmitRequest) -> StoreResult<MaintenanceTicket> {
    let generator = TicketIdGenerator::<SystemClock, RandomTokens>::new();
    let ticket = build_ticket(&generator, payload);

    info!(
        "Opened ticket {} [{}] ({})",
        ticket.ticket_id, ticket.priority, ticket.request_type
    );

    store.add_ticket(ticket.clone())?;
    store.set_draft(None)?;
    Ok(ticket)
}

// ============================================================================
// Tests
// ============================================================================
