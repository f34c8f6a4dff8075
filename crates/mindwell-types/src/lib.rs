pub mod api;
pub mod models;
pub mod time;

pub use models::{
    ChatTurn, Community, JournalEntry, Language, Message, MessageType, Mood, MoodEntry,
    ProfessionType, Professional, Report, ReportType, Speaker, SupportChannel, User,
};
