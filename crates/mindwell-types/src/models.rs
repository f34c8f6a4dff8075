use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// -- Users --

/// Profile as the backend returns it. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_pro: bool,
    #[serde(default)]
    pub streak: u32,
}

impl User {
    /// Display name when set, username otherwise.
    pub fn name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

// -- Communities --

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Community {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub member_count: u32,
    #[serde(default)]
    pub unread_count: u32,
    #[serde(default)]
    pub is_member: bool,
}

// -- Messages --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    #[default]
    Text,
    Voice,
    AvatarJump,
    /// Any type this client does not render yet.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(alias = "_id")]
    pub id: String,
    pub sender_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub community_id: Option<String>,
    pub content: String,
    #[serde(deserialize_with = "crate::time::lenient")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub message_type: MessageType,
}

// -- Mood --

/// The six moods offered on the home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Calm,
    Neutral,
    Sad,
    Anxious,
    Angry,
}

impl Mood {
    pub const ALL: [Mood; 6] = [
        Mood::Happy,
        Mood::Calm,
        Mood::Neutral,
        Mood::Sad,
        Mood::Anxious,
        Mood::Angry,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Calm => "Calm",
            Mood::Neutral => "Okay",
            Mood::Sad => "Sad",
            Mood::Anxious => "Anxious",
            Mood::Angry => "Angry",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Mood::Happy => "😊",
            Mood::Calm => "😌",
            Mood::Neutral => "😐",
            Mood::Sad => "😢",
            Mood::Anxious => "😰",
            Mood::Angry => "😠",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Calm => "calm",
            Mood::Neutral => "neutral",
            Mood::Sad => "sad",
            Mood::Anxious => "anxious",
            Mood::Angry => "angry",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown mood '{}'", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub mood: Mood,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

// -- Reports --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    #[default]
    Domestic,
    Gang,
    Firearms,
    Murder,
    /// Violence that is being planned but has not happened yet.
    Planned,
}

impl ReportType {
    pub const ALL: [ReportType; 5] = [
        ReportType::Domestic,
        ReportType::Gang,
        ReportType::Firearms,
        ReportType::Murder,
        ReportType::Planned,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReportType::Domestic => "domestic",
            ReportType::Gang => "gang",
            ReportType::Firearms => "firearms",
            ReportType::Murder => "murder",
            ReportType::Planned => "planned",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReportType::Domestic => "Domestic violence",
            ReportType::Gang => "Gang activity",
            ReportType::Firearms => "Firearms",
            ReportType::Murder => "Murder",
            ReportType::Planned => "Planned violence",
        }
    }
}

impl FromStr for ReportType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown report type '{}'", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// What happened, in the reporter's words.
    #[serde(rename = "content")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub anonymous: bool,
    pub report_type: ReportType,
}

// -- Journal --

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    #[serde(alias = "_id")]
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
    #[serde(default)]
    pub mood: Option<Mood>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_private")]
    pub is_private: bool,
    #[serde(default)]
    pub word_count: u32,
    #[serde(deserialize_with = "crate::time::lenient")]
    pub created_at: DateTime<Utc>,
}

fn default_private() -> bool {
    true
}

// -- Professionals --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfessionType {
    Psychologist,
    Doctor,
    SocialWorker,
    Police,
}

impl ProfessionType {
    pub const ALL: [ProfessionType; 4] = [
        ProfessionType::Psychologist,
        ProfessionType::Doctor,
        ProfessionType::SocialWorker,
        ProfessionType::Police,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProfessionType::Psychologist => "psychologist",
            ProfessionType::Doctor => "doctor",
            ProfessionType::SocialWorker => "social_worker",
            ProfessionType::Police => "police",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProfessionType::Psychologist => "Psychologist",
            ProfessionType::Doctor => "Doctor",
            ProfessionType::SocialWorker => "Social worker",
            ProfessionType::Police => "Police",
        }
    }
}

impl FromStr for ProfessionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_");
        ProfessionType::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| format!("unknown profession '{}'", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Professional {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub profession: ProfessionType,
    #[serde(default)]
    pub credentials: String,
    #[serde(default)]
    pub availability: Vec<String>,
    #[serde(default)]
    pub contact_methods: Vec<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub rating: Option<f64>,
}

/// How the user wants to meet a professional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportChannel {
    #[default]
    Chat,
    Call,
    Video,
    InPerson,
}

impl FromStr for SupportChannel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().replace('-', "_").to_ascii_lowercase().as_str() {
            "chat" => Ok(SupportChannel::Chat),
            "call" => Ok(SupportChannel::Call),
            "video" => Ok(SupportChannel::Video),
            "in_person" => Ok(SupportChannel::InPerson),
            other => Err(format!("unknown support channel '{}'", other)),
        }
    }
}

// -- Therapist chat --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub speaker: Speaker,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Languages the chatbot understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Patois,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Patois => "patois",
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "patois" => Ok(Language::Patois),
            other => Err(format!("unsupported language '{}'", other)),
        }
    }
}
