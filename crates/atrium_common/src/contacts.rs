//! Building contact directory

use serde::{Deserialize, Serialize};

/// A staff contact shown on the Contacts page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingContact {
    pub name: String,
    pub role: String,
    pub phone: String,
    pub hours: String,
    pub is_emergency: bool,
}

/// Default directory for the building
pub fn default_directory() -> Vec<BuildingContact> {
    vec![
        BuildingContact {
            name: "Building Manager".to_string(),
            role: "General inquiries, lease questions".to_string(),
            phone: "+1-555-0101".to_string(),
            hours: "Mon-Fri, 9AM-6PM".to_string(),
            is_emergency: false,
        },
        BuildingContact {
            name: "Maintenance".to_string(),
            role: "Repairs and scheduled work".to_string(),
            phone: "+1-555-0102".to_string(),
            hours: "Mon-Fri, 8AM-5PM".to_string(),
            is_emergency: false,
        },
        BuildingContact {
            name: "Security".to_string(),
            role: "Access, incidents, after-hours issues".to_string(),
            phone: "+1-555-0103".to_string(),
            hours: "24/7".to_string(),
            is_emergency: false,
        },
        BuildingContact {
            name: "Concierge".to_string(),
            role: "Deliveries and visitor assistance".to_string(),
            phone: "+1-555-0104".to_string(),
            hours: "Mon-Fri, 8AM-8PM".to_string(),
            is_emergency: false,
        },
        BuildingContact {
            name: "Emergency Hotline".to_string(),
            role: "Fire, gas, flooding, electrical hazards".to_string(),
            phone: "+1-555-0911".to_string(),
            hours: "24/7".to_string(),
            is_emergency: true,
        },
    ]
}
