//! Building Assistant
//!
//! Two answer paths share this module: the canned keyword responder, which
//! needs no network, and the wire types plus prompt policy for the LLM
//! passthrough the daemon performs when an API key is configured.
//!
//! The canned responder is first-match-wins over the topic list, using the
//! same loose substring matching as the priority rules.

use serde::{Deserialize, Serialize};

/// Topic restriction for the LLM path. Off-topic questions get the fixed
/// refusal sentence rather than an answer.
pub const SYSTEM_PROMPT: &str = "You are a helpful property management assistant. You ONLY assist with property management related topics.

You specialize in helping tenants and property managers with:
- Maintenance requests and procedures
- Property policies and rules
- Tenant services and amenities
- Building information and facilities
- Emergency procedures
- Lease and rental information
- Utility and service issues
- Property management best practices
- Tenant rights and responsibilities
- Building safety and security

IMPORTANT: If a user asks about topics unrelated to property management (such as general knowledge, entertainment, cooking, sports, politics, etc.), you MUST respond with: \"I'm sorry, but I can only assist with property management queries.\"

Keep your responses concise, helpful, and friendly. Always prioritize safety and proper procedures in your advice.";

/// Conversation turns kept as context for the LLM path
pub const HISTORY_WINDOW: usize = 10;

/// Reply used when the LLM returns no usable choice
pub const EMPTY_REPLY_FALLBACK: &str =
    "I'm sorry, I couldn't process your request. Please try again.";

// ============================================================================
// Chat Wire Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Build the message list for a completion call: system prompt, the last
/// [`HISTORY_WINDOW`] prior turns, then the new user message.
pub fn build_chat_messages(history: &[ChatMessage], user_message: &str) -> Vec<ChatMessage> {
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    let mut messages = Vec::with_capacity(history.len() - start + 2);
    messages.push(ChatMessage::system(SYSTEM_PROMPT));
    messages.extend(history[start..].iter().cloned());
    messages.push(ChatMessage::user(user_message));
    messages
}

// ============================================================================
// Canned Responder
// ============================================================================

struct CannedTopic {
    keywords: &'static [&'static str],
    response: &'static str,
}

const CANNED_TOPICS: &[CannedTopic] = &[
    CannedTopic {
        keywords: &["file", "request", "submit", "create", "maintenance"],
        response: "To file a maintenance request:\n\n1. Click 'New Request' in the navigation or dashboard\n2. Fill out all required fields including location and description\n3. Upload photos if helpful (up to 5 images)\n4. Submit your request\n\nYou'll receive a ticket ID and can track progress in 'My Requests'.",
    },
    CannedTopic {
        keywords: &["status", "track", "progress", "ticket", "request"],
        response: "To check your ticket status:\n\n1. Go to 'My Requests' in the navigation\n2. Find your ticket in the list\n3. Click on it to see detailed status and timeline\n\nTicket statuses:\n- Open: Just submitted, awaiting review\n- Assigned: Technician assigned, work scheduled\n- Resolved: Work completed",
    },
    CannedTopic {
        keywords: &["emergency", "urgent", "fire", "gas", "flood", "electrical"],
        response: "For EMERGENCIES, do NOT use this chat!\n\nCall Emergency Hotline: +1-555-0911\n\nEmergencies include:\n- Fire or smoke\n- Gas leaks\n- Electrical hazards\n- Flooding\n- Security threats\n\nFor urgent but non-emergency issues, call Security: +1-555-0103",
    },
    CannedTopic {
        keywords: &["contact", "phone", "email", "hours", "manager"],
        response: "Key contacts:\n\nBuilding Manager: +1-555-0101 (Mon-Fri, 9AM-6PM)\nMaintenance: +1-555-0102 (Mon-Fri, 8AM-5PM)\nSecurity: +1-555-0103 (24/7 Available)\nEmergency: +1-555-0911 (24/7 Emergency Line)\n\nSee 'Contacts' page for complete directory.",
    },
    CannedTopic {
        keywords: &["hours", "time", "when", "schedule", "office"],
        response: "Building service hours:\n\nManagement Office: Mon-Fri, 9AM-6PM\nMaintenance: Mon-Fri, 8AM-5PM\nSecurity: 24/7\nConcierge: Mon-Fri, 8AM-8PM\n\nEmergency services are available 24/7.\nNon-emergency requests submitted after hours will be reviewed the next business day.",
    },
];

const FALLBACK_RESPONSE: &str = "I'm sorry, I didn't understand that. I can help with:\n\n- Filing maintenance requests\n- Checking ticket status\n- Emergency contacts\n- Building hours\n- General contact information\n\nTry asking about one of these topics, or contact the Building Manager at +1-555-0101 for personalized assistance.";

/// Greeting shown when a chat session opens
pub const WELCOME_MESSAGE: &str = "Hi! I'm your building assistant. I can help with:\n\n- How to file maintenance requests\n- Checking ticket status\n- Emergency numbers\n- Contact information\n- Building hours\n\nWhat can I help you with?";

/// Answer a message from the canned topic list. First topic with any
/// case-insensitive substring match wins; unknown topics get the fallback.
pub fn canned_response(user_message: &str) -> &'static str {
    let message = user_message.to_lowercase();
    for topic in CANNED_TOPICS {
        if topic.keywords.iter().any(|kw| message.contains(kw)) {
            return topic.response;
        }
    }
    FALLBACK_RESPONSE
}

// ============================================================================
// Tests
// ============================================================================
