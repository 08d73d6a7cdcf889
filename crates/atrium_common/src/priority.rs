//! Priority Classification
//!
//! Rule-based severity triage for incoming tenant requests. Runs once per
//! submission, before the ticket is persisted, so hazard language is never
//! under-prioritized by a mild category choice.
//!
//! Rules are evaluated in a fixed order and the first match wins:
//! 1. Critical hazard keyword in title/description -> Critical
//! 2. Incident reports -> Critical
//! 3. High keyword -> High, escalated to Critical by photo volume or a
//!    plumbing leak
//! 4. Service requests -> Low
//! 5. Three or more photos -> High
//! 6. Default -> Medium
//!
//! Keyword matching is deliberately loose: case-insensitive substring
//! containment with no word boundaries, so "leaking" matches "leak".
//! Tightening this would silently change triage outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Keyword Sets
// ============================================================================

/// Hazard language that always yields Critical, regardless of category,
/// request type, or photo count.
const CRITICAL_KEYWORDS: &[&str] = &[
    "fire",
    "gas",
    "electric spark",
    "exposed wire",
    "major leak",
    "flood",
];

/// Language that yields at least High when no critical rule fired.
const HIGH_KEYWORDS: &[&str] = &["leak", "no water", "no power", "elevator stuck"];

/// Photo count at which photo volume is treated as an escalation signal.
const PHOTO_ESCALATION_THRESHOLD: u32 = 3;

// ============================================================================
// Priority Level
// ============================================================================

/// Severity classification driving expected response time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriorityLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl PriorityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Classification Input
// ============================================================================

/// Attributes of a candidate request, assembled by the submission flow from
/// form fields. No field is validated here; empty strings and zero photos
/// are legal inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationInput {
    pub request_type: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub photo_count: u32,
}

// ============================================================================
// Classifier
// ============================================================================

/// Classify a request into exactly one priority level.
///
/// Total function: always returns a level, never fails, no side effects.
/// Identical inputs always yield the identical result.
pub fn calculate_priority(input: &ClassificationInput) -> PriorityLevel {
    let combined_text = format!("{} {}", input.title, input.description).to_lowercase();

    if contains_any(&combined_text, CRITICAL_KEYWORDS) {
        return PriorityLevel::Critical;
    }

    // Incident reports are unconditionally escalated, even with benign text.
    if input.request_type == "Incident Report" {
        return PriorityLevel::Critical;
    }

    if contains_any(&combined_text, HIGH_KEYWORDS) {
        let escalate = input.photo_count >= PHOTO_ESCALATION_THRESHOLD
            || (input.category == "Plumbing" && combined_text.contains("leak"));
        return if escalate {
            PriorityLevel::Critical
        } else {
            PriorityLevel::High
        };
    }

    // Checked before the photo rule: photo volume never escalates a
    // service request. Recorded as an open question in DESIGN.md.
    if input.request_type == "Service Request" {
        return PriorityLevel::Low;
    }

    if input.photo_count >= PHOTO_ESCALATION_THRESHOLD {
        return PriorityLevel::High;
    }

    PriorityLevel::Medium
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| text.contains(kw))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn input(
        request_type: &str,
        title: &str,
        description: &str,
        category: &str,
        photo_count: u32,
    ) -> ClassificationInput {
        ClassificationInput {
            request_type: request_type.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            photo_count,
        }
    }

    #[test]
    fn test_critical_keyword_beats_service_request() {
        // Hazard language wins even when the request type would yield Low.
        let result = calculate_priority(&input(
            "Service Request",
            "gas leak in hallway",
            "smells strongly near unit 4",
            "Other",
            0,
        ));
        assert_eq!(result, PriorityLevel::Critical);
    }

    #[test]
    fn test_incident_report_always_critical() {
        let result = calculate_priority(&input(
            "Incident Report",
            "minor noise",
            "squeaky door",
            "Other",
            0,
        ));
        assert_eq!(result, PriorityLevel::Critical);
    }

    #[test]
    fn test_plumbing_leak_escalates_without_photos() {
        let result = calculate_priority(&input(
            "Room Maintenance",
            "Kitchen sink faucet leaking",
            "dripping for 3 days",
            "Plumbing",
            0,
        ));
        assert_eq!(result, PriorityLevel::Critical);
    }

    #[test]
    fn test_high_keyword_without_escalation_stays_high() {
        let result = calculate_priority(&input(
            "Room Maintenance",
            "outlet leak",
            "water seeping near socket",
            "Electrical",
            1,
        ));
        assert_eq!(result, PriorityLevel::High);
    }

    #[test]
    fn test_high_keyword_with_photo_volume_escalates() {
        let result = calculate_priority(&input(
            "Room Maintenance",
            "no power in bedroom",
            "breaker keeps tripping",
            "Electrical",
            3,
        ));
        assert_eq!(result, PriorityLevel::Critical);
    }

    #[test]
    fn test_photo_volume_alone_is_high() {
        let result = calculate_priority(&input(
            "Room Maintenance",
            "scuffed wall",
            "paint damage in hallway",
            "General",
            3,
        ));
        assert_eq!(result, PriorityLevel::High);
    }

    #[test]
    fn test_service_request_ignores_photo_volume() {
        // The service-request rule fires before the photo rule, so photo
        // count is irrelevant for service requests.
        let result = calculate_priority(&input(
            "Service Request",
            "deep cleaning",
            "carpet cleaning before move out",
            "Cleaning",
            5,
        ));
        assert_eq!(result, PriorityLevel::Low);
    }

    #[test]
    fn test_default_is_medium() {
        let result = calculate_priority(&input(
            "Room Maintenance",
            "cabinet hinge loose",
            "kitchen cabinet door sags",
            "Carpentry",
            0,
        ));
        assert_eq!(result, PriorityLevel::Medium);
    }

    #[test]
    fn test_substring_matching_is_loose() {
        // "flooded" contains "flood"; no word-boundary check.
        let result = calculate_priority(&input(
            "Room Maintenance",
            "bathroom flooded overnight",
            "",
            "Plumbing",
            0,
        ));
        assert_eq!(result, PriorityLevel::Critical);
    }

    #[test]
    fn test_keyword_can_span_title_and_description() {
        // Title and description are joined with a single space, so "major"
        // ending the title and "leak" starting the description form the
        // critical phrase "major leak".
        let result = calculate_priority(&input(
            "Room Maintenance",
            "major",
            "leak under sink",
            "Electrical",
            0,
        ));
        assert_eq!(result, PriorityLevel::Critical);
    }

    #[test]
    fn test_empty_input_is_medium() {
        let result = calculate_priority(&input("", "", "", "", 0));
        assert_eq!(result, PriorityLevel::Medium);
    }

    #[test]
    fn test_level_ordering() {
        assert!(PriorityLevel::Low < PriorityLevel::Medium);
        assert!(PriorityLevel::Medium < PriorityLevel::High);
        assert!(PriorityLevel::High < PriorityLevel::Critical);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let a = input("Room Maintenance", "no water", "since this morning", "Plumbing", 2);
        assert_eq!(calculate_priority(&a), calculate_priority(&a.clone()));
    }

    #[test]
    fn test_serde_uses_display_strings() {
        let json = serde_json::to_string(&PriorityLevel::Critical).unwrap();
        assert_eq!(json, "\"Critical\"");
        let parsed: PriorityLevel = serde_json::from_str("\"Low\"").unwrap();
        assert_eq!(parsed, PriorityLevel::Low);
    }
}
