use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{
    JournalEntry, Language, Message, MessageType, Mood, Report, SupportChannel,
};

// -- Auth --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub anonymous_mode: bool,
    #[serde(default)]
    pub language_preference: Language,
}

/// Token response shared by login and register.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user_id: String,
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

fn default_expires_in() -> u64 {
    604_800
}

// -- Communities --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommunityRequest {
    pub name: String,
    pub topic: String,
    /// Required by the backend, may be empty.
    pub description: String,
    #[serde(default = "default_true")]
    pub anonymous_allowed: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommunityResponse {
    pub community_id: String,
    pub name: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Plain acknowledgement body, e.g. `{"message": "Successfully joined community"}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusMessage {
    #[serde(default)]
    pub message: String,
}

// -- Messages --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub sender_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub community_id: Option<String>,
    pub content: String,
    #[serde(default)]
    pub message_type: MessageType,
}

/// Server echo of a sent message. Older deployments answer with a bare
/// acknowledgement, so the echoed message is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendMessageResponse {
    #[serde(default)]
    pub message_id: Option<String>,
    #[serde(default)]
    pub data: Option<Message>,
}

/// Message listings come either bare or wrapped with paging metadata.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MessageList {
    Bare(Vec<Message>),
    Page { messages: Vec<Message> },
}

impl MessageList {
    pub fn into_vec(self) -> Vec<Message> {
        match self {
            MessageList::Bare(messages) | MessageList::Page { messages } => messages,
        }
    }
}

// -- Therapist chat --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartSessionRequest {
    pub user_id: String,
    #[serde(default)]
    pub language: Language,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartSessionResponse {
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessageRequest {
    pub user_id: String,
    pub message: String,
    #[serde(default)]
    pub language: Language,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub needs_support: bool,
    #[serde(default)]
    pub support_message: Option<String>,
}

/// One stored exchange from `GET /chat/history`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatHistoryEntry {
    pub user_message: String,
    pub bot_response: String,
    #[serde(deserialize_with = "crate::time::lenient")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechToTextRequest {
    pub audio_base64: String,
    #[serde(default)]
    pub language: Language,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechToTextResponse {
    pub text: String,
}

// -- Reports --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitReportRequest {
    #[serde(flatten)]
    pub report: Report,
    /// Omitted for anonymous reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporter_id: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmitReportResponse {
    #[serde(default)]
    pub report_id: Option<String>,
    #[serde(default)]
    pub message: String,
}

// -- Journal --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJournalRequest {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub is_private: bool,
    #[serde(default)]
    pub language: Language,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateJournalResponse {
    pub entry_id: String,
    #[serde(default)]
    pub message: String,
    /// Follow-up suggestions produced by content analysis, when it ran.
    #[serde(default)]
    pub recommendations: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JournalPage {
    #[serde(default)]
    pub entries: Vec<JournalEntry>,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub has_more: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JournalPrompts {
    #[serde(default)]
    pub prompts: Vec<String>,
    #[serde(default)]
    pub mood: Option<String>,
}

// -- Professionals --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportRequest {
    pub user_id: String,
    pub professional_id: String,
    pub request_type: SupportChannel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub emergency: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupportRequestAck {
    #[serde(default, alias = "id")]
    pub request_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// -- Mood --

/// A stored mood event. The backend may record sentiments outside the six
/// picker moods (e.g. from text analysis), so the label stays a string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodEvent {
    #[serde(alias = "sentiment")]
    pub mood: String,
    #[serde(deserialize_with = "crate::time::lenient")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoodHistory {
    #[serde(default)]
    pub period_days: u32,
    #[serde(default)]
    pub total_events: u32,
    #[serde(default)]
    pub events: Vec<MoodEvent>,
}

// -- Errors --

/// FastAPI-style error body. `detail` is usually a string but validation
/// failures carry a list of objects.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub detail: serde_json::Value,
}

impl ErrorBody {
    pub fn detail_text(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Array(items) => items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect::<Vec<_>>()
                .join("; "),
            other => other.to_string(),
        }
    }
}
