//! Core record types for the Atrium portal
//!
//! Field names serialize in camelCase to stay compatible with records
//! exported from the original portal frontend.

use crate::priority::PriorityLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Request Type and Status
// ============================================================================

/// Kind of tenant-submitted request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestType {
    #[serde(rename = "Room Maintenance")]
    RoomMaintenance,
    #[serde(rename = "Building Maintenance")]
    BuildingMaintenance,
    #[serde(rename = "Incident Report")]
    IncidentReport,
    #[serde(rename = "Service Request")]
    ServiceRequest,
    #[serde(rename = "Visitor Access / Delivery")]
    VisitorAccess,
}

impl RequestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RoomMaintenance => "Room Maintenance",
            Self::BuildingMaintenance => "Building Maintenance",
            Self::IncidentReport => "Incident Report",
            Self::ServiceRequest => "Service Request",
            Self::VisitorAccess => "Visitor Access / Delivery",
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ticket lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketStatus {
    Open,
    Assigned,
    Resolved,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Assigned => "Assigned",
            Self::Resolved => "Resolved",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Tenant Records
// ============================================================================

/// Profile of the currently signed-in tenant
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantProfile {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub unit_no: String,
    pub building: String,
    pub floor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    pub login_time: DateTime<Utc>,
}

/// Registration form payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantRegistration {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub unit_number: String,
    pub building: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_in_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lease_end_date: Option<String>,
}

/// A registration accepted by the portal
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredTenant {
    pub id: String,
    #[serde(flatten)]
    pub registration: TenantRegistration,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

impl RegisteredTenant {
    pub fn from_registration(registration: TenantRegistration) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            registration,
            created_at: Utc::now(),
            is_active: true,
        }
    }
}

// ============================================================================
// Tickets
// ============================================================================

/// Preferred visit window supplied by the tenant
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferredSchedule {
    pub date: String,
    pub time_range: String,
}

/// A persisted maintenance/incident/service/visitor ticket
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceTicket {
    pub ticket_id: String,
    pub hash_id: String,
    pub property: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building: Option<String>,
    pub floor: i32,
    pub unit: String,
    pub request_type: RequestType,
    pub category: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_schedule: Option<PreferredSchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_instructions: Option<String>,
    pub contact_phone: String,
    /// Opaque photo references; binary handling is out of scope
    pub photos: Vec<String>,
    pub priority: PriorityLevel,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partially filled request form, saved between visits
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_schedule: Option<PreferredSchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<String>>,
}

// ============================================================================
// Announcements
// ============================================================================

/// Building-wide announcement shown on the tenant dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub body: String,
    pub effective_date: String,
    pub end_date: String,
    pub priority: PriorityLevel,
    #[serde(default)]
    pub attachments: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_type_round_trip() {
        let json = serde_json::to_string(&RequestType::VisitorAccess).unwrap();
        assert_eq!(json, "\"Visitor Access / Delivery\"");
        let parsed: RequestType = serde_json::from_str("\"Incident Report\"").unwrap();
        assert_eq!(parsed, RequestType::IncidentReport);
    }

    #[test]
    fn test_ticket_serializes_camel_case() {
        let ticket = MaintenanceTicket {
            ticket_id: "12-A-20260115-abc123".to_string(),
            hash_id: "0148f26d".to_string(),
            property: "Property 1".to_string(),
            building: Some("Main Tower".to_string()),
            floor: 12,
            unit: "12A".to_string(),
            request_type: RequestType::RoomMaintenance,
            category: "Plumbing".to_string(),
            title: "Kitchen sink faucet leaking".to_string(),
            description: "dripping for 3 days".to_string(),
            preferred_schedule: None,
            access_instructions: None,
            contact_phone: "+1-555-0123".to_string(),
            photos: vec![],
            priority: PriorityLevel::Critical,
            status: TicketStatus::Open,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&ticket).unwrap();
        assert_eq!(json["ticketId"], "12-A-20260115-abc123");
        assert_eq!(json["hashId"], "0148f26d");
        assert_eq!(json["requestType"], "Room Maintenance");
        assert_eq!(json["priority"], "Critical");
        assert_eq!(json["status"], "Open");
        // Absent optionals are omitted, matching the original records.
        assert!(json.get("preferredSchedule").is_none());
    }

    #[test]
    fn test_registered_tenant_flattens_registration() {
        let tenant = RegisteredTenant::from_registration(TenantRegistration {
            email: "john.doe@email.com".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            unit_number: "12A".to_string(),
            building: "Main Tower".to_string(),
            phone: None,
            emergency_contact_name: None,
            emergency_contact_phone: None,
            move_in_date: None,
            lease_end_date: None,
        });

        assert!(tenant.is_active);
        let json = serde_json::to_value(&tenant).unwrap();
        assert_eq!(json["email"], "john.doe@email.com");
        assert_eq!(json["unitNumber"], "12A");
        assert!(json["id"].as_str().unwrap().len() >= 32);
    }

    #[test]
    fn test_draft_defaults_empty() {
        let draft: RequestDraft = serde_json::from_str("{}").unwrap();
        assert!(draft.title.is_none());
        assert!(draft.photos.is_none());
    }
}
