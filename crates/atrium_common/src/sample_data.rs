//! Sample Data Seeding
//!
//! Demo records for a fresh installation. Seeding only fills families that
//! are empty, so a portal with real data is never touched.

use crate::priority::PriorityLevel;
use crate::store::{PortalStore, StoreResult};
use crate::types::{
    Announcement, MaintenanceTicket, PreferredSchedule, RequestType, TenantProfile, TicketStatus,
};
use chrono::{TimeZone, Utc};
use tracing::info;

pub fn sample_profile() -> TenantProfile {
    TenantProfile {
        email: "john.doe@email.com".to_string(),
        first_name: "John".to_string(),
        last_name: "Doe".to_string(),
        unit_no: "12A".to_string(),
        floor: "12".to_string(),
        building: "Main Tower".to_string(),
        property: Some("Property 1".to_string()),
        login_time: Utc::now(),
    }
}

pub fn sample_tickets() -> Vec<MaintenanceTicket> {
    vec![
        MaintenanceTicket {
            ticket_id: "12-A-20241218-abc123".to_string(),
            hash_id: "hash_sample_1".to_string(),
            property: "Property 1".to_string(),
            building: Some("Main Tower".to_string()),
            floor: 12,
            unit: "12A".to_string(),
            request_type: RequestType::RoomMaintenance,
            category: "Plumbing".to_string(),
            title: "Kitchen sink faucet leaking".to_string(),
            description: "The kitchen sink faucet has been dripping constantly for the past 3 days. Water is pooling around the base and the drip rate is increasing.".to_string(),
            preferred_schedule: None,
            access_instructions: None,
            contact_phone: "+1-555-0123".to_string(),
            photos: vec![],
            priority: PriorityLevel::High,
            status: TicketStatus::Assigned,
            created_at: Utc.with_ymd_and_hms(2024, 12, 15, 10, 30, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 12, 16, 9, 15, 0).unwrap(),
        },
        MaintenanceTicket {
            ticket_id: "12-A-20241217-def456".to_string(),
            hash_id: "hash_sample_2".to_string(),
            property: "Property 1".to_string(),
            building: Some("Main Tower".to_string()),
            floor: 12,
            unit: "12A".to_string(),
            request_type: RequestType::BuildingMaintenance,
            category: "Elevator".to_string(),
            title: "Elevator making strange noises".to_string(),
            description: "The main elevator has been making grinding noises when going up past the 10th floor. It seems to hesitate between floors.".to_string(),
            preferred_schedule: None,
            access_instructions: None,
            contact_phone: "+1-555-0123".to_string(),
            photos: vec![],
            priority: PriorityLevel::Medium,
            status: TicketStatus::Open,
            created_at: Utc.with_ymd_and_hms(2024, 12, 14, 14, 20, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 12, 14, 14, 20, 0).unwrap(),
        },
        MaintenanceTicket {
            ticket_id: "12-A-20241216-ghi789".to_string(),
            hash_id: "hash_sample_3".to_string(),
            property: "Property 1".to_string(),
            building: Some("Main Tower".to_string()),
            floor: 12,
            unit: "12A".to_string(),
            request_type: RequestType::ServiceRequest,
            category: "Cleaning".to_string(),
            title: "Deep cleaning request for move-out".to_string(),
            description: "Requesting professional deep cleaning service for unit before move-out inspection. Need carpet cleaning and window washing included.".to_string(),
            preferred_schedule: Some(PreferredSchedule {
                date: "2024-12-25".to_string(),
                time_range: "09:00-17:00".to_string(),
            }),
            access_instructions: None,
            contact_phone: "+1-555-0123".to_string(),
            photos: vec![],
            priority: PriorityLevel::Low,
            status: TicketStatus::Resolved,
            created_at: Utc.with_ymd_and_hms(2024, 12, 10, 11, 45, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 12, 12, 16, 30, 0).unwrap(),
        },
    ]
}

pub fn sample_announcements() -> Vec<Announcement> {
    vec![
        Announcement {
            id: "1".to_string(),
            title: "Scheduled Elevator Maintenance".to_string(),
            body: "The main elevator will be undergoing routine maintenance on December 22nd from 8:00 AM to 12:00 PM. Please use the service elevator during this time.".to_string(),
            effective_date: "2024-12-22".to_string(),
            end_date: "2024-12-22".to_string(),
            priority: PriorityLevel::Medium,
            attachments: vec![],
        },
        Announcement {
            id: "2".to_string(),
            title: "Water System Upgrade".to_string(),
            body: "We will be upgrading the building water system on December 28th. Water service may be interrupted between 6:00 AM and 2:00 PM. Please store water in advance.".to_string(),
            effective_date: "2024-12-28".to_string(),
            end_date: "2024-12-28".to_string(),
            priority: PriorityLevel::High,
            attachments: vec!["Water Storage Guidelines.pdf".to_string()],
        },
        Announcement {
            id: "3".to_string(),
            title: "Holiday Office Hours".to_string(),
            body: "The building management office will have reduced hours during the holiday season. We will be closed December 24th-26th and January 1st.".to_string(),
            effective_date: "2024-12-24".to_string(),
            end_date: "2025-01-01".to_string(),
            priority: PriorityLevel::Low,
            attachments: vec![],
        },
    ]
}

/// Seed empty record families with the demo data
pub fn seed(store: &dyn PortalStore) -> StoreResult<()> {
    if store.profile().is_none() {
        info!("Seeding sample tenant profile");
        store.set_profile(&sample_profile())?;
    }
    if store.tickets().is_empty() {
        info!("Seeding sample tickets");
        store.set_tickets(&sample_tickets())?;
    }
    if store.announcements().is_empty() {
        info!("Seeding sample announcements");
        store.set_announcements(&sample_announcements())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_seed_fills_empty_store() {
        let store = MemoryStore::new();
        seed(&store).unwrap();
        assert_eq!(store.tickets().len(), 3);
        assert_eq!(store.announcements().len(), 3);

        let profile = store.profile().expect("profile should be seeded");
        assert_eq!(profile.email, "john.doe@email.com");
        assert_eq!(profile.unit_no, "12A");
        assert_eq!(profile.building, "Main Tower");
    }

    #[test]
    fn test_seed_keeps_existing_profile() {
        let store = MemoryStore::new();
        let mut profile = sample_profile();
        profile.email = "resident@example.com".to_string();
        store.set_profile(&profile).unwrap();

        seed(&store).unwrap();
        assert_eq!(store.profile().unwrap().email, "resident@example.com");
    }

    #[test]
    fn test_seed_leaves_existing_data_alone() {
        let store = MemoryStore::new();
        seed(&store).unwrap();

        let mut tickets = store.tickets();
        tickets.truncate(1);
        store.set_tickets(&tickets).unwrap();

        seed(&store).unwrap();
        assert_eq!(store.tickets().len(), 1);
    }
}
