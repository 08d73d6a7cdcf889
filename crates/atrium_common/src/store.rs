//! Portal Storage Port
//!
//! The original portal kept every record family under a browser local-storage
//! key. Here that keyspace is a trait with typed accessors, so the daemon can
//! run against JSON files on disk while tests use an in-memory store. The
//! classifier and identity generator never touch this layer.
//!
//! Read semantics mirror the original: a missing or unparseable record family
//! reads as empty/None rather than failing.
//!
//! The store is shared across concurrent request handlers, so the compound
//! read-modify-write operations (add_ticket, register_tenant,
//! update_ticket_status) are implemented per store under a single lock.

use crate::types::{
    Announcement, MaintenanceTicket, RegisteredTenant, RequestDraft, TenantProfile, TicketStatus,
};
use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing::warn;

/// Storage failure (writes only; reads degrade to empty)
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("record serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

// ============================================================================
// Storage Port
// ============================================================================

/// Typed access to the portal's record families
pub trait PortalStore: Send + Sync {
    fn profile(&self) -> Option<TenantProfile>;
    fn set_profile(&self, profile: &TenantProfile) -> StoreResult<()>;

    fn tickets(&self) -> Vec<MaintenanceTicket>;
    fn set_tickets(&self, tickets: &[MaintenanceTicket]) -> StoreResult<()>;

    fn draft(&self) -> Option<RequestDraft>;
    /// `None` clears the stored draft
    fn set_draft(&self, draft: Option<&RequestDraft>) -> StoreResult<()>;

    fn tenants(&self) -> Vec<RegisteredTenant>;
    fn set_tenants(&self, tenants: &[RegisteredTenant]) -> StoreResult<()>;

    fn announcements(&self) -> Vec<Announcement>;
    fn set_announcements(&self, announcements: &[Announcement]) -> StoreResult<()>;

    /// Prepend a ticket so the newest record lists first. Atomic with
    /// respect to the other compound operations on the same store.
    fn add_ticket(&self, ticket: MaintenanceTicket) -> StoreResult<()>;

    fn add_tenant(&self, tenant: RegisteredTenant) -> StoreResult<()>;

    /// Register a tenant, rejecting duplicate emails (case-insensitive) and
    /// duplicate unit+building pairs. Returns None when a duplicate exists.
    /// The duplicate check and the insert happen under one lock.
    fn register_tenant(
        &self,
        registration: crate::types::TenantRegistration,
    ) -> StoreResult<Option<RegisteredTenant>>;

    /// Update a ticket's status by id, bumping its updated_at timestamp.
    /// Returns the updated record, or None when the id is unknown.
    fn update_ticket_status(
        &self,
        ticket_id: &str,
        status: TicketStatus,
    ) -> StoreResult<Option<MaintenanceTicket>>;

    /// Find an active tenant matching the email (case-insensitive) and unit
    fn validate_login(&self, email: &str, unit_number: &str) -> Option<RegisteredTenant> {
        self.tenants().into_iter().find(|t| {
            t.is_active
                && t.registration.email.eq_ignore_ascii_case(email)
                && t.registration.unit_number == unit_number
        })
    }
}

/// Shared duplicate check for registrations: same email (case-insensitive)
/// or same unit in the same building.
fn registration_conflicts(
    tenants: &[RegisteredTenant],
    registration: &crate::types::TenantRegistration,
) -> bool {
    tenants.iter().any(|t| {
        t.registration.email.eq_ignore_ascii_case(&registration.email)
            || (t.registration.unit_number == registration.unit_number
                && t.registration.building == registration.building)
    })
}

/// Shared status mutation: set the status and bump updated_at on the
/// matching ticket, returning a copy of the updated record.
fn apply_status(
    tickets: &mut [MaintenanceTicket],
    ticket_id: &str,
    status: TicketStatus,
) -> Option<MaintenanceTicket> {
    let ticket = tickets.iter_mut().find(|t| t.ticket_id == ticket_id)?;
    ticket.status = status;
    ticket.updated_at = Utc::now();
    Some(ticket.clone())
}

// ============================================================================
// JSON File Store
// ============================================================================

/// File names under the data directory, one per record family
const PROFILE_FILE: &str = "tenant_profile.json";
const TICKETS_FILE: &str = "tenant_tickets.json";
const DRAFT_FILE: &str = "request_draft.json";
const TENANTS_FILE: &str = "registered_tenants.json";
const ANNOUNCEMENTS_FILE: &str = "announcements.json";

/// One pretty-printed JSON file per record family, written atomically
/// (temp file then rename) so a crash never leaves a half-written record.
pub struct JsonFileStore {
    data_dir: PathBuf,
    /// Serializes the compound read-modify-write operations; individual
    /// file writes are already atomic via the rename.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;
        Ok(Self {
            data_dir,
            write_lock: Mutex::new(()),
        })
    }

    fn read_json<T: DeserializeOwned>(&self, file: &str) -> Option<T> {
        let path = self.data_dir.join(file);
        let contents = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&contents) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring unparseable {}: {}", path.display(), e);
                None
            }
        }
    }

    fn write_json<T: Serialize>(&self, file: &str, value: &T) -> StoreResult<()> {
        let path = self.data_dir.join(file);
        let contents = serde_json::to_string_pretty(value)?;
        atomic_write(&path, &contents)?;
        Ok(())
    }

    fn remove(&self, file: &str) -> StoreResult<()> {
        let path = self.data_dir.join(file);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Write contents to a sibling temp file, then rename over the target
fn atomic_write(path: &Path, contents: &str) -> std::io::Result<()> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)
}

impl PortalStore for JsonFileStore {
    fn profile(&self) -> Option<TenantProfile> {
        self.read_json(PROFILE_FILE)
    }

    fn set_profile(&self, profile: &TenantProfile) -> StoreResult<()> {
        self.write_json(PROFILE_FILE, profile)
    }

    fn tickets(&self) -> Vec<MaintenanceTicket> {
        self.read_json(TICKETS_FILE).unwrap_or_default()
    }

    fn set_tickets(&self, tickets: &[MaintenanceTicket]) -> StoreResult<()> {
        self.write_json(TICKETS_FILE, &tickets)
    }

    fn draft(&self) -> Option<RequestDraft> {
        self.read_json(DRAFT_FILE)
    }

    fn set_draft(&self, draft: Option<&RequestDraft>) -> StoreResult<()> {
        match draft {
            Some(draft) => self.write_json(DRAFT_FILE, draft),
            None => self.remove(DRAFT_FILE),
        }
    }

    fn tenants(&self) -> Vec<RegisteredTenant> {
        self.read_json(TENANTS_FILE).unwrap_or_default()
    }

    fn set_tenants(&self, tenants: &[RegisteredTenant]) -> StoreResult<()> {
        self.write_json(TENANTS_FILE, &tenants)
    }

    fn announcements(&self) -> Vec<Announcement> {
        self.read_json(ANNOUNCEMENTS_FILE).unwrap_or_default()
    }

    fn set_announcements(&self, announcements: &[Announcement]) -> StoreResult<()> {
        self.write_json(ANNOUNCEMENTS_FILE, &announcements)
    }

    fn add_ticket(&self, ticket: MaintenanceTicket) -> StoreResult<()> {
        let _guard = self.write_lock.lock().unwrap();
        let mut tickets: Vec<MaintenanceTicket> =
            self.read_json(TICKETS_FILE).unwrap_or_default();
        tickets.insert(0, ticket);
        self.write_json(TICKETS_FILE, &tickets)
    }

    fn add_tenant(&self, tenant: RegisteredTenant) -> StoreResult<()> {
        let _guard = self.write_lock.lock().unwrap();
        let mut tenants: Vec<RegisteredTenant> =
            self.read_json(TENANTS_FILE).unwrap_or_default();
        tenants.push(tenant);
        self.write_json(TENANTS_FILE, &tenants)
    }

    fn register_tenant(
        &self,
        registration: crate::types::TenantRegistration,
    ) -> StoreResult<Option<RegisteredTenant>> {
        let _guard = self.write_lock.lock().unwrap();
        let mut tenants: Vec<RegisteredTenant> =
            self.read_json(TENANTS_FILE).unwrap_or_default();
        if registration_conflicts(&tenants, &registration) {
            return Ok(None);
        }
        let tenant = RegisteredTenant::from_registration(registration);
        tenants.push(tenant.clone());
        self.write_json(TENANTS_FILE, &tenants)?;
        Ok(Some(tenant))
    }

    fn update_ticket_status(
        &self,
        ticket_id: &str,
        status: TicketStatus,
    ) -> StoreResult<Option<MaintenanceTicket>> {
        let _guard = self.write_lock.lock().unwrap();
        let mut tickets: Vec<MaintenanceTicket> =
            self.read_json(TICKETS_FILE).unwrap_or_default();
        let updated = apply_status(&mut tickets, ticket_id, status);
        if updated.is_some() {
            self.write_json(TICKETS_FILE, &tickets)?;
        }
        Ok(updated)
    }
}

// ============================================================================
// Memory Store
// ============================================================================

/// In-memory store for tests and ephemeral runs
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    profile: Option<TenantProfile>,
    tickets: Vec<MaintenanceTicket>,
    draft: Option<RequestDraft>,
    tenants: Vec<RegisteredTenant>,
    announcements: Vec<Announcement>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PortalStore for MemoryStore {
    fn profile(&self) -> Option<TenantProfile> {
        self.inner.lock().unwrap().profile.clone()
    }

    fn set_profile(&self, profile: &TenantProfile) -> StoreResult<()> {
        self.inner.lock().unwrap().profile = Some(profile.clone());
        Ok(())
    }

    fn tickets(&self) -> Vec<MaintenanceTicket> {
        self.inner.lock().unwrap().tickets.clone()
    }

    fn set_tickets(&self, tickets: &[MaintenanceTicket]) -> StoreResult<()> {
        self.inner.lock().unwrap().tickets = tickets.to_vec();
        Ok(())
    }

    fn draft(&self) -> Option<RequestDraft> {
        self.inner.lock().unwrap().draft.clone()
    }

    fn set_draft(&self, draft: Option<&RequestDraft>) -> StoreResult<()> {
        self.inner.lock().unwrap().draft = draft.cloned();
        Ok(())
    }

    fn tenants(&self) -> Vec<RegisteredTenant> {
        self.inner.lock().unwrap().tenants.clone()
    }

    fn set_tenants(&self, tenants: &[RegisteredTenant]) -> StoreResult<()> {
        self.inner.lock().unwrap().tenants = tenants.to_vec();
        Ok(())
    }

    fn announcements(&self) -> Vec<Announcement> {
        self.inner.lock().unwrap().announcements.clone()
    }

    fn set_announcements(&self, announcements: &[Announcement]) -> StoreResult<()> {
        self.inner.lock().unwrap().announcements = announcements.to_vec();
        Ok(())
    }

    fn add_ticket(&self, ticket: MaintenanceTicket) -> StoreResult<()> {
        self.inner.lock().unwrap().tickets.insert(0, ticket);
        Ok(())
    }

    fn add_tenant(&self, tenant: RegisteredTenant) -> StoreResult<()> {
        self.inner.lock().unwrap().tenants.push(tenant);
        Ok(())
    }

    fn register_tenant(
        &self,
        registration: crate::types::TenantRegistration,
    ) -> StoreResult<Option<RegisteredTenant>> {
        let mut inner = self.inner.lock().unwrap();
        if registration_conflicts(&inner.tenants, &registration) {
            return Ok(None);
        }
        let tenant = RegisteredTenant::from_registration(registration);
        inner.tenants.push(tenant.clone());
        Ok(Some(tenant))
    }

    fn update_ticket_status(
        &self,
        ticket_id: &str,
        status: TicketStatus,
    ) -> StoreResult<Option<MaintenanceTicket>> {
        let mut inner = self.inner.lock().unwrap();
        Ok(apply_status(&mut inner.tickets, ticket_id, status))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::priority::PriorityLevel;
    use crate::types::RequestType;

    fn sample_ticket(ticket_id: &str) -> MaintenanceTicket {
        MaintenanceTicket {
            ticket_id: ticket_id.to_string(),
            hash_id: "0148f26d".to_string(),
            property: "Property 1".to_string(),
            building: None,
            floor: 12,
            unit: "12A".to_string(),
            request_type: RequestType::RoomMaintenance,
            category: "Plumbing".to_string(),
            title: "leaking faucet".to_string(),
            description: "dripping".to_string(),
            preferred_schedule: None,
            access_instructions: None,
            contact_phone: "+1-555-0123".to_string(),
            photos: vec![],
            priority: PriorityLevel::High,
            status: TicketStatus::Open,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_memory_store_prepends_tickets() {
        let store = MemoryStore::new();
        store.add_ticket(sample_ticket("first")).unwrap();
        store.add_ticket(sample_ticket("second")).unwrap();

        let tickets = store.tickets();
        assert_eq!(tickets[0].ticket_id, "second");
        assert_eq!(tickets[1].ticket_id, "first");
    }

    #[test]
    fn test_memory_store_status_update() {
        let store = MemoryStore::new();
        store.add_ticket(sample_ticket("t1")).unwrap();

        let updated = store
            .update_ticket_status("t1", TicketStatus::Assigned)
            .unwrap()
            .expect("ticket should exist");
        assert_eq!(updated.status, TicketStatus::Assigned);
        assert_eq!(store.tickets()[0].status, TicketStatus::Assigned);

        let missing = store
            .update_ticket_status("nope", TicketStatus::Resolved)
            .unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_register_tenant_rejects_duplicates() {
        use crate::types::TenantRegistration;

        let store = MemoryStore::new();
        let registration = TenantRegistration {
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
        };

        let first = store.register_tenant(registration.clone()).unwrap();
        assert!(first.is_some());

        // Same email, different case: rejected.
        let mut dup_email = registration.clone();
        dup_email.unit_number = "14B".to_string();
        dup_email.email = "JOHN.DOE@EMAIL.COM".to_string();
        assert!(store.register_tenant(dup_email).unwrap().is_none());

        // Same unit in the same building: rejected.
        let mut dup_unit = registration.clone();
        dup_unit.email = "jane@email.com".to_string();
        assert!(store.register_tenant(dup_unit).unwrap().is_none());

        // Same unit number in a different building is fine.
        let mut other_building = registration;
        other_building.email = "jane@email.com".to_string();
        other_building.building = "East Wing".to_string();
        assert!(store.register_tenant(other_building).unwrap().is_some());
    }

    #[test]
    fn test_validate_login() {
        use crate::types::TenantRegistration;

        let store = MemoryStore::new();
        store
            .register_tenant(TenantRegistration {
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
            })
            .unwrap();

        assert!(store.validate_login("John.Doe@Email.com", "12A").is_some());
        assert!(store.validate_login("john.doe@email.com", "14B").is_none());
        assert!(store.validate_login("nobody@email.com", "12A").is_none());

        // Deactivated tenants cannot sign in.
        let mut tenants = store.tenants();
        tenants[0].is_active = false;
        store.set_tenants(&tenants).unwrap();
        assert!(store.validate_login("john.doe@email.com", "12A").is_none());
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();

        assert!(store.tickets().is_empty());
        store.add_ticket(sample_ticket("t1")).unwrap();

        // A fresh store over the same directory sees the persisted record.
        let reopened = JsonFileStore::new(dir.path()).unwrap();
        let tickets = reopened.tickets();
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].ticket_id, "t1");
    }

    #[test]
    fn test_file_store_draft_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();

        let draft = RequestDraft {
            title: Some("half-filled".to_string()),
            ..Default::default()
        };
        store.set_draft(Some(&draft)).unwrap();
        assert_eq!(store.draft().unwrap().title.as_deref(), Some("half-filled"));

        store.set_draft(None).unwrap();
        assert!(store.draft().is_none());
        // Clearing an already-cleared draft is not an error.
        store.set_draft(None).unwrap();
    }

    #[test]
    fn test_file_store_corrupt_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();
        std::fs::write(dir.path().join(TICKETS_FILE), "not json").unwrap();

        assert!(store.tickets().is_empty());
        // And a write recovers the family.
        store.add_ticket(sample_ticket("t1")).unwrap();
        assert_eq!(store.tickets().len(), 1);
    }

    #[test]
    fn test_memory_store_concurrent_adds_keep_every_ticket() {
        use std::sync::Arc;

        const THREADS: usize = 4;
        const PER_THREAD: usize = 250;

        let store: Arc<dyn PortalStore> = Arc::new(MemoryStore::new());
        let handles: Vec<_> = (0..THREADS)
            .map(|thread| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..PER_THREAD {
                        store
                            .add_ticket(sample_ticket(&format!("{}-{}", thread, i)))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.tickets().len(), THREADS * PER_THREAD);
    }

    #[test]
    fn test_file_store_concurrent_adds_keep_every_ticket() {
        use std::sync::Arc;

        const THREADS: usize = 4;
        const PER_THREAD: usize = 25;

        let dir = tempfile::tempdir().unwrap();
        let store: Arc<dyn PortalStore> = Arc::new(JsonFileStore::new(dir.path()).unwrap());
        let handles: Vec<_> = (0..THREADS)
            .map(|thread| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..PER_THREAD {
                        store
                            .add_ticket(sample_ticket(&format!("{}-{}", thread, i)))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.tickets().len(), THREADS * PER_THREAD);
    }

    #[test]
    fn test_concurrent_registration_admits_one_tenant_per_unit() {
        use std::sync::Arc;
        use crate::types::TenantRegistration;

        let store: Arc<dyn PortalStore> = Arc::new(MemoryStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    store
                        .register_tenant(TenantRegistration {
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
                        })
                        .unwrap()
                })
            })
            .collect();

        let mut accepted = 0;
        for handle in handles {
            if handle.join().unwrap().is_some() {
                accepted += 1;
            }
        }
        assert_eq!(accepted, 1);
        assert_eq!(store.tenants().len(), 1);
    }
}
