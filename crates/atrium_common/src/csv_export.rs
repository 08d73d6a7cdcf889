//! CSV Export
//!
//! Serializes tenant and ticket records to delimited text for the management
//! office's spreadsheet workflows. Cells containing a quote, comma, or line
//! break are escaped with doubled quotes and wrapped; everything else is
//! emitted as-is. Rows are joined with `\n`.

use crate::types::{MaintenanceTicket, RegisteredTenant};
use chrono::Utc;

/// Header row plus data rows, ready to be joined into a CSV document
#[derive(Debug, Clone)]
pub struct CsvDocument {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvDocument {
    /// Render the document as CSV text
    pub fn to_csv(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(render_row(&self.headers));
        for row in &self.rows {
            lines.push(render_row(row));
        }
        lines.join("\n")
    }
}

fn render_row(cells: &[String]) -> String {
    cells
        .iter()
        .map(|cell| escape_cell(cell))
        .collect::<Vec<_>>()
        .join(",")
}

fn escape_cell(cell: &str) -> String {
    let escaped = cell.replace('"', "\"\"");
    if escaped.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", escaped)
    } else {
        escaped
    }
}

/// Default export filename with the current UTC date, e.g. `tenants_2026-08-29.csv`
pub fn dated_filename(prefix: &str) -> String {
    format!("{}_{}.csv", prefix, Utc::now().format("%Y-%m-%d"))
}

// ============================================================================
// Tenant Export
// ============================================================================

pub fn tenants_csv(tenants: &[RegisteredTenant]) -> CsvDocument {
    let headers = [
        "ID",
        "Email",
        "First Name",
        "Last Name",
        "Unit Number",
        "Building",
        "Phone",
        "Emergency Contact Name",
        "Emergency Contact Phone",
        "Move In Date",
        "Lease End Date",
        "Created At",
        "Status",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    let rows = tenants
        .iter()
        .map(|t| {
            let r = &t.registration;
            vec![
                t.id.clone(),
                r.email.clone(),
                r.first_name.clone(),
                r.last_name.clone(),
                r.unit_number.clone(),
                r.building.clone(),
                r.phone.clone().unwrap_or_default(),
                r.emergency_contact_name.clone().unwrap_or_default(),
                r.emergency_contact_phone.clone().unwrap_or_default(),
                r.move_in_date.clone().unwrap_or_default(),
                r.lease_end_date.clone().unwrap_or_default(),
                t.created_at.to_rfc3339(),
                if t.is_active { "Active" } else { "Inactive" }.to_string(),
            ]
        })
        .collect();

    CsvDocument { headers, rows }
}

// ============================================================================
// Ticket Export
// ============================================================================

pub fn tickets_csv(tickets: &[MaintenanceTicket]) -> CsvDocument {
    let headers = [
        "Ticket ID",
        "Hash ID",
        "Property",
        "Building",
        "Floor",
        "Unit",
        "Request Type",
        "Category",
        "Title",
        "Description",
        "Priority",
        "Status",
        "Contact Phone",
        "Preferred Date",
        "Preferred Time",
        "Access Instructions",
        "Photos Count",
        "Created At",
        "Updated At",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    let rows = tickets
        .iter()
        .map(|t| {
            vec![
                t.ticket_id.clone(),
                t.hash_id.clone(),
                t.property.clone(),
                t.building.clone().unwrap_or_default(),
                t.floor.to_string(),
                t.unit.clone(),
                t.request_type.to_string(),
                t.category.clone(),
                t.title.clone(),
                t.description.clone(),
                t.priority.to_string(),
                t.status.to_string(),
                t.contact_phone.clone(),
                t.preferred_schedule
                    .as_ref()
                    .map(|s| s.date.clone())
                    .unwrap_or_default(),
                t.preferred_schedule
                    .as_ref()
                    .map(|s| s.time_range.clone())
                    .unwrap_or_default(),
                t.access_instructions.clone().unwrap_or_default(),
                t.photos.len().to_string(),
                t.created_at.to_rfc3339(),
                t.updated_at.to_rfc3339(),
            ]
        })
        .collect();

    CsvDocument { headers, rows }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::priority::PriorityLevel;
    use crate::types::{RequestType, TenantRegistration, TicketStatus};

    #[test]
    fn test_plain_cells_are_unquoted() {
        let doc = CsvDocument {
            headers: vec!["A".to_string(), "B".to_string()],
            rows: vec![vec!["one".to_string(), "two".to_string()]],
        };
        assert_eq!(doc.to_csv(), "A,B\none,two");
    }

    #[test]
    fn test_cells_with_commas_quotes_and_newlines_are_escaped() {
        let doc = CsvDocument {
            headers: vec!["Title".to_string()],
            rows: vec![
                vec!["leak, kitchen".to_string()],
                vec!["said \"urgent\"".to_string()],
                vec!["line one\nline two".to_string()],
            ],
        };
        let csv = doc.to_csv();
        let lines: Vec<&str> = csv.splitn(3, '\n').collect();
        assert_eq!(lines[0], "Title");
        assert_eq!(lines[1], "\"leak, kitchen\"");
        assert!(lines[2].starts_with("\"said \"\"urgent\"\"\""));
    }

    #[test]
    fn test_tenants_csv_columns() {
        let tenant = RegisteredTenant::from_registration(TenantRegistration {
            email: "john.doe@email.com".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            unit_number: "12A".to_string(),
            building: "Main Tower".to_string(),
            phone: Some("+1-555-0123".to_string()),
            emergency_contact_name: None,
            emergency_contact_phone: None,
            move_in_date: None,
            lease_end_date: None,
        });

        let doc = tenants_csv(&[tenant]);
        assert_eq!(doc.headers.len(), 13);
        assert_eq!(doc.rows.len(), 1);
        assert_eq!(doc.rows[0].len(), doc.headers.len());
        assert_eq!(doc.rows[0][1], "john.doe@email.com");
        assert_eq!(doc.rows[0][12], "Active");
        // Missing optionals export as empty cells, not "None".
        assert_eq!(doc.rows[0][7], "");
    }

    #[test]
    fn test_tickets_csv_columns() {
        let ticket = MaintenanceTicket {
            ticket_id: "12-A-20260115-abc123".to_string(),
            hash_id: "0148f26d".to_string(),
            property: "Property 1".to_string(),
            building: Some("Main Tower".to_string()),
            floor: 12,
            unit: "12A".to_string(),
            request_type: RequestType::IncidentReport,
            category: "Other".to_string(),
            title: "smoke, hallway".to_string(),
            description: "smell of burning".to_string(),
            preferred_schedule: None,
            access_instructions: None,
            contact_phone: "+1-555-0123".to_string(),
            photos: vec!["a.jpg".to_string(), "b.jpg".to_string()],
            priority: PriorityLevel::Critical,
            status: TicketStatus::Open,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let doc = tickets_csv(&[ticket]);
        assert_eq!(doc.rows[0].len(), doc.headers.len());
        assert_eq!(doc.rows[0][6], "Incident Report");
        assert_eq!(doc.rows[0][10], "Critical");
        assert_eq!(doc.rows[0][16], "2");

        // The comma-bearing title survives a render round.
        let csv = doc.to_csv();
        assert!(csv.contains("\"smoke, hallway\""));
    }

    #[test]
    fn test_dated_filename_shape() {
        let name = dated_filename("tenants");
        assert!(name.starts_with("tenants_"));
        assert!(name.ends_with(".csv"));
        assert_eq!(name.len(), "tenants_2026-08-29.csv".len());
    }
}
