//! API routes for atriumd

use crate::intake::{self, SubmitRequest};
use crate::server::AppState;
use atrium_common::assistant::{canned_response, ChatMessage};
use atrium_common::contacts::{self, BuildingContact};
use atrium_common::csv_export::{self, dated_filename};
use atrium_common::types::{
    Announcement, MaintenanceTicket, RegisteredTenant, RequestDraft, TenantProfile,
    TenantRegistration, TicketStatus,
};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

type AppStateArc = Arc<AppState>;

fn store_error(e: atrium_common::store::StoreError) -> (StatusCode, String) {
    error!("  Store write failed: {}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

// ============================================================================
// Health Routes
// ============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    uptime_seconds: u64,
}

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/health", get(health_check))
}

async fn health_check(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}

// ============================================================================
// Tenant Routes
// ============================================================================

pub fn tenant_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/v1/tenants", post(register_tenant).get(list_tenants))
}

async fn register_tenant(
    State(state): State<AppStateArc>,
    Json(registration): Json<TenantRegistration>,
) -> Result<Json<RegisteredTenant>, (StatusCode, String)> {
    match state.store.register_tenant(registration).map_err(store_error)? {
        Some(tenant) => {
            info!("  Registered tenant {} ({})", tenant.registration.email, tenant.id);
            Ok(Json(tenant))
        }
        None => Err((
            StatusCode::CONFLICT,
            "A tenant with this email or unit already exists".to_string(),
        )),
    }
}

async fn list_tenants(State(state): State<AppStateArc>) -> Json<Vec<RegisteredTenant>> {
    Json(state.store.tenants())
}

// ============================================================================
// Session Routes
// ============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest {
    email: String,
    unit_number: String,
}

pub fn session_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/session", post(login).get(current_session))
}

async fn login(
    State(state): State<AppStateArc>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TenantProfile>, (StatusCode, String)> {
    let tenant = state
        .store
        .validate_login(&req.email, &req.unit_number)
        .ok_or((
            StatusCode::UNAUTHORIZED,
            "No active tenant matches that email and unit".to_string(),
        ))?;

    let r = &tenant.registration;
    let profile = TenantProfile {
        email: r.email.clone(),
        first_name: r.first_name.clone(),
        last_name: r.last_name.clone(),
        unit_no: r.unit_number.clone(),
        building: r.building.clone(),
        floor: floor_from_unit(&r.unit_number),
        property: None,
        login_time: Utc::now(),
    };
    state.store.set_profile(&profile).map_err(store_error)?;

    info!("  Tenant {} signed in", profile.email);
    Ok(Json(profile))
}

async fn current_session(
    State(state): State<AppStateArc>,
) -> Result<Json<TenantProfile>, StatusCode> {
    state.store.profile().map(Json).ok_or(StatusCode::NOT_FOUND)
}

/// Leading digits of the unit label ("12A" -> "12"); "0" when absent
fn floor_from_unit(unit_number: &str) -> String {
    let digits: String = unit_number
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        "0".to_string()
    } else {
        digits
    }
}

// ============================================================================
// Request Routes
// ============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusUpdateRequest {
    ticket_id: String,
    status: TicketStatus,
}

pub fn request_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/v1/requests", post(submit_request).get(list_requests))
        .route("/v1/requests/status", post(update_request_status))
        .route(
            "/v1/draft",
            put(save_draft).get(get_draft).delete(clear_draft),
        )
}

async fn submit_request(
    State(state): State<AppStateArc>,
    Json(payload): Json<SubmitRequest>,
) -> Result<Json<MaintenanceTicket>, (StatusCode, String)> {
    let ticket = intake::submit(state.store.as_ref(), payload).map_err(store_error)?;
    Ok(Json(ticket))
}

async fn list_requests(State(state): State<AppStateArc>) -> Json<Vec<MaintenanceTicket>> {
    Json(state.store.tickets())
}

async fn update_request_status(
    State(state): State<AppStateArc>,
    Json(req): Json<StatusUpdateRequest>,
) -> Result<Json<MaintenanceTicket>, (StatusCode, String)> {
    match state
        .store
        .update_ticket_status(&req.ticket_id, req.status)
        .map_err(store_error)?
    {
        Some(ticket) => {
            info!("  Ticket {} -> {}", ticket.ticket_id, ticket.status);
            Ok(Json(ticket))
        }
        None => Err((
            StatusCode::NOT_FOUND,
            format!("Ticket '{}' not found", req.ticket_id),
        )),
    }
}

async fn save_draft(
    State(state): State<AppStateArc>,
    Json(draft): Json<RequestDraft>,
) -> Result<StatusCode, (StatusCode, String)> {
    state.store.set_draft(Some(&draft)).map_err(store_error)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_draft(State(state): State<AppStateArc>) -> Result<Json<RequestDraft>, StatusCode> {
    state.store.draft().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn clear_draft(
    State(state): State<AppStateArc>,
) -> Result<StatusCode, (StatusCode, String)> {
    state.store.set_draft(None).map_err(store_error)?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Announcement and Contact Routes
// ============================================================================

pub fn announcement_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/v1/announcements", get(list_announcements))
        .route("/v1/contacts", get(list_contacts))
}

async fn list_announcements(State(state): State<AppStateArc>) -> Json<Vec<Announcement>> {
    Json(state.store.announcements())
}

async fn list_contacts() -> Json<Vec<BuildingContact>> {
    Json(contacts::default_directory())
}

// ============================================================================
// Chat Routes
// ============================================================================

#[derive(Deserialize)]
struct ChatRequest {
    message: String,
    #[serde(default)]
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatResponse {
    message: String,
}

pub fn chat_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/chat", post(chat))
}

async fn chat(
    State(state): State<AppStateArc>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, String)> {
    if req.message.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "No message provided".to_string()));
    }

    if !state.chat.is_configured() {
        return Ok(Json(ChatResponse {
            message: canned_response(&req.message).to_string(),
        }));
    }

    match state.chat.chat(&req.messages, &req.message).await {
        Ok(message) => Ok(Json(ChatResponse { message })),
        Err(e) => {
            // Degrade to the canned responder rather than leave the tenant
            // without an answer.
            warn!("  Chat passthrough failed, using canned reply: {}", e);
            Ok(Json(ChatResponse {
                message: canned_response(&req.message).to_string(),
            }))
        }
    }
}

// ============================================================================
// Export Routes
// ============================================================================

pub fn export_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/v1/export/tenants", get(export_tenants))
        .route("/v1/export/requests", get(export_requests))
}

fn csv_response(filename: String, csv: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        csv,
    )
        .into_response()
}

async fn export_tenants(State(state): State<AppStateArc>) -> Response {
    let doc = csv_export::tenants_csv(&state.store.tenants());
    csv_response(dated_filename("tenants"), doc.to_csv())
}

async fn export_requests(State(state): State<AppStateArc>) -> Response {
    let doc = csv_export::tickets_csv(&state.store.tickets());
    csv_response(dated_filename("requests"), doc.to_csv())
}

// ============================================================================
// Tests
// ============================================================================
