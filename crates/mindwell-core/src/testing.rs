//! In-memory backend for screen tests.

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;

use mindwell_client::{ClientError, Result, WellnessBackend};
use mindwell_types::api::{
    AuthResponse, ChatHistoryEntry, ChatMessageRequest, ChatReply, CreateCommunityRequest,
    CreateCommunityResponse, CreateJournalRequest, CreateJournalResponse, JournalPage,
    JournalPrompts, LoginRequest, MoodEvent, MoodHistory, RegisterRequest, SendMessageRequest,
    SendMessageResponse, SpeechToTextRequest, SpeechToTextResponse, StartSessionRequest,
    StartSessionResponse, StatusMessage, SubmitReportRequest, SubmitReportResponse,
    SupportRequest, SupportRequestAck,
};
use mindwell_types::{
    Community, JournalEntry, Language, Message, MessageType, Mood, MoodEntry, ProfessionType,
    Professional, User,
};

use crate::session::Session;

#[derive(Default)]
pub struct FakeState {
    /// Every call fails.
    pub fail_all: bool,
    /// Only the named operation fails.
    pub fail_on: Option<&'static str>,
    pub token: Option<String>,
    pub logins: Vec<LoginRequest>,
    pub registrations: Vec<RegisterRequest>,
    pub user: Option<User>,
    pub communities: Vec<Community>,
    pub created: Vec<CreateCommunityRequest>,
    pub joined: Vec<(String, String)>,
    pub left: Vec<(String, String)>,
    pub messages: Vec<Message>,
    /// Rooms whose history was fetched, as `community:<id>` or `direct:<id>`.
    pub opened: Vec<String>,
    pub sent: Vec<SendMessageRequest>,
    pub sessions_started: u32,
    pub chat_requests: Vec<ChatMessageRequest>,
    pub reply: ChatReply,
    pub history: Vec<ChatHistoryEntry>,
    pub audio_uploads: Vec<SpeechToTextRequest>,
    pub transcript: String,
    pub reports: Vec<SubmitReportRequest>,
    pub moods: Vec<(String, MoodEntry)>,
    pub mood_events: Vec<MoodEvent>,
    pub journal: Vec<JournalEntry>,
    pub journal_created: Vec<CreateJournalRequest>,
    pub journal_deleted: Vec<String>,
    /// `(limit, skip)` of every journal page request.
    pub journal_pages: Vec<(u32, u32)>,
    pub prompts: Vec<String>,
    pub prompt_requests: Vec<(Option<Mood>, Language)>,
    pub professionals: Vec<Professional>,
    pub profession_filters: Vec<Option<ProfessionType>>,
    pub support_requests: Vec<SupportRequest>,
}

#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<FakeState>,
}

impl FakeBackend {
    pub fn new() -> Self {
        let backend = Self::default();
        backend.state().reply = ChatReply {
            response: "I'm listening.".into(),
            ..Default::default()
        };
        backend
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    pub fn failing() -> Self {
        let backend = Self::new();
        backend.state().fail_all = true;
        backend
    }

    fn check(&self, op: &'static str) -> Result<()> {
        let state = self.state();
        if state.fail_all || state.fail_on == Some(op) {
            return Err(ClientError::Status {
                status: 503,
                detail: format!("{} unavailable", op),
            });
        }
        Ok(())
    }
}

pub fn session() -> Session {
    Session {
        user_id: "u1".into(),
        username: "kemar".into(),
        display_name: Some("Kemar".into()),
    }
}

pub fn community(id: &str, is_member: bool) -> Community {
    Community {
        id: id.into(),
        name: format!("Community {}", id),
        description: None,
        topic: None,
        member_count: 3,
        unread_count: 0,
        is_member,
    }
}

pub fn journal_entry(id: &str, content: &str) -> JournalEntry {
    JournalEntry {
        id: id.into(),
        user_id: "u1".into(),
        title: None,
        content: content.into(),
        mood: None,
        tags: Vec::new(),
        is_private: true,
        word_count: content.split_whitespace().count() as u32,
        created_at: Utc::now(),
    }
}

pub fn professional(id: &str, profession: ProfessionType, verified: bool) -> Professional {
    Professional {
        id: id.into(),
        name: format!("Dr. {}", id),
        profession,
        credentials: "Licensed".into(),
        availability: vec!["weekdays".into()],
        contact_methods: vec!["chat".into(), "call".into()],
        bio: None,
        verified,
        rating: Some(4.5),
    }
}

pub fn message(id: &str, content: &str) -> Message {
    Message {
        id: id.into(),
        sender_id: "u2".into(),
        recipient_id: None,
        community_id: Some("c1".into()),
        content: content.into(),
        timestamp: Utc::now(),
        message_type: MessageType::Text,
    }
}

fn auth_response(username: &str) -> AuthResponse {
    AuthResponse {
        access_token: "tok".into(),
        token_type: "bearer".into(),
        user_id: "u1".into(),
        username: username.into(),
        display_name: Some("Kemar".into()),
        expires_in: 604_800,
    }
}

impl WellnessBackend for FakeBackend {
    async fn login(&self, req: &LoginRequest) -> Result<AuthResponse> {
        self.check("login")?;
        let mut state = self.state();
        state.logins.push(req.clone());
        state.token = Some("tok".into());
        Ok(auth_response(&req.username))
    }

    async fn register(&self, req: &RegisterRequest) -> Result<AuthResponse> {
        self.check("register")?;
        let mut state = self.state();
        state.registrations.push(req.clone());
        state.token = Some("tok".into());
        Ok(auth_response(&req.username))
    }

    fn logout(&self) {
        self.state().token = None;
    }

    async fn get_user(&self, user_id: &str) -> Result<User> {
        self.check("get_user")?;
        self.state().user.clone().ok_or_else(|| ClientError::Status {
            status: 404,
            detail: format!("User {} not found", user_id),
        })
    }

    async fn list_communities(&self) -> Result<Vec<Community>> {
        self.check("list_communities")?;
        Ok(self.state().communities.clone())
    }

    async fn create_community(
        &self,
        req: &CreateCommunityRequest,
    ) -> Result<CreateCommunityResponse> {
        self.check("create_community")?;
        let mut state = self.state();
        let id = format!("c{}", state.communities.len() + 1);
        state.created.push(req.clone());
        state.communities.push(Community {
            id: id.clone(),
            name: req.name.clone(),
            description: Some(req.description.clone()),
            topic: Some(req.topic.clone()),
            member_count: 1,
            unread_count: 0,
            is_member: true,
        });
        Ok(CreateCommunityResponse {
            community_id: id,
            name: req.name.clone(),
            message: Some("Community created successfully".into()),
        })
    }

    async fn join_community(&self, community_id: &str, user_id: &str) -> Result<StatusMessage> {
        self.check("join_community")?;
        self.state()
            .joined
            .push((community_id.to_string(), user_id.to_string()));
        Ok(StatusMessage {
            message: "Successfully joined community".into(),
        })
    }

    async fn leave_community(&self, community_id: &str, user_id: &str) -> Result<StatusMessage> {
        self.check("leave_community")?;
        self.state()
            .left
            .push((community_id.to_string(), user_id.to_string()));
        Ok(StatusMessage {
            message: "Successfully left community".into(),
        })
    }

    async fn community_messages(&self, community_id: &str) -> Result<Vec<Message>> {
        self.check("community_messages")?;
        let mut state = self.state();
        state.opened.push(format!("community:{}", community_id));
        Ok(state.messages.clone())
    }

    async fn direct_messages(&self, user_id: &str) -> Result<Vec<Message>> {
        self.check("direct_messages")?;
        let mut state = self.state();
        state.opened.push(format!("direct:{}", user_id));
        Ok(state.messages.clone())
    }

    async fn send_message(&self, req: &SendMessageRequest) -> Result<SendMessageResponse> {
        self.check("send_message")?;
        self.state().sent.push(req.clone());
        Ok(SendMessageResponse::default())
    }

    async fn start_chat_session(
        &self,
        _req: &StartSessionRequest,
    ) -> Result<StartSessionResponse> {
        self.check("start_chat_session")?;
        let mut state = self.state();
        state.sessions_started += 1;
        Ok(StartSessionResponse {
            session_id: format!("s{}", state.sessions_started),
        })
    }

    async fn send_chat_message(&self, req: &ChatMessageRequest) -> Result<ChatReply> {
        self.check("send_chat_message")?;
        let mut state = self.state();
        state.chat_requests.push(req.clone());
        Ok(state.reply.clone())
    }

    async fn chat_history(&self, _session_id: &str) -> Result<Vec<ChatHistoryEntry>> {
        self.check("chat_history")?;
        Ok(self.state().history.clone())
    }

    async fn speech_to_text(&self, req: &SpeechToTextRequest) -> Result<SpeechToTextResponse> {
        self.check("speech_to_text")?;
        let mut state = self.state();
        state.audio_uploads.push(req.clone());
        Ok(SpeechToTextResponse {
            text: state.transcript.clone(),
        })
    }

    async fn submit_report(&self, req: &SubmitReportRequest) -> Result<SubmitReportResponse> {
        self.check("submit_report")?;
        self.state().reports.push(req.clone());
        Ok(SubmitReportResponse {
            report_id: Some("r1".into()),
            message: "Report received".into(),
        })
    }

    async fn submit_mood(&self, user_id: &str, entry: &MoodEntry) -> Result<StatusMessage> {
        self.check("submit_mood")?;
        self.state()
            .moods
            .push((user_id.to_string(), entry.clone()));
        Ok(StatusMessage {
            message: "Mood recorded".into(),
        })
    }

    async fn mood_history(&self, _user_id: &str, days: u32) -> Result<MoodHistory> {
        self.check("mood_history")?;
        let events = self.state().mood_events.clone();
        Ok(MoodHistory {
            period_days: days,
            total_events: events.len() as u32,
            events,
        })
    }

    async fn create_journal_entry(
        &self,
        req: &CreateJournalRequest,
    ) -> Result<CreateJournalResponse> {
        self.check("create_journal_entry")?;
        let mut state = self.state();
        let id = format!("j{}", state.journal_created.len() + 1);
        state.journal_created.push(req.clone());
        let mut entry = journal_entry(&id, &req.content);
        entry.title = req.title.clone();
        entry.mood = req.mood;
        entry.tags = req.tags.clone();
        entry.is_private = req.is_private;
        state.journal.insert(0, entry);
        Ok(CreateJournalResponse {
            entry_id: id,
            message: "Journal entry created successfully".into(),
            recommendations: None,
        })
    }

    async fn journal_entries(&self, _user_id: &str, limit: u32, skip: u32) -> Result<JournalPage> {
        self.check("journal_entries")?;
        let mut state = self.state();
        state.journal_pages.push((limit, skip));
        let entries: Vec<JournalEntry> = state
            .journal
            .iter()
            .skip(skip as usize)
            .take(limit as usize)
            .cloned()
            .collect();
        let total = state.journal.len() as u32;
        Ok(JournalPage {
            has_more: skip + (entries.len() as u32) < total,
            entries,
            total,
        })
    }

    async fn delete_journal_entry(&self, entry_id: &str) -> Result<StatusMessage> {
        self.check("delete_journal_entry")?;
        let mut state = self.state();
        let before = state.journal.len();
        state.journal.retain(|e| e.id != entry_id);
        if state.journal.len() == before {
            return Err(ClientError::Status {
                status: 404,
                detail: "Journal entry not found".into(),
            });
        }
        state.journal_deleted.push(entry_id.to_string());
        Ok(StatusMessage {
            message: "Journal entry deleted successfully".into(),
        })
    }

    async fn journal_prompts(
        &self,
        mood: Option<Mood>,
        language: Language,
    ) -> Result<JournalPrompts> {
        self.check("journal_prompts")?;
        let mut state = self.state();
        state.prompt_requests.push((mood, language));
        Ok(JournalPrompts {
            prompts: state.prompts.clone(),
            mood: mood.map(|m| m.as_str().to_string()),
        })
    }

    async fn list_professionals(
        &self,
        profession: Option<ProfessionType>,
    ) -> Result<Vec<Professional>> {
        self.check("list_professionals")?;
        let mut state = self.state();
        state.profession_filters.push(profession);
        Ok(state
            .professionals
            .iter()
            .filter(|p| profession.is_none_or(|wanted| p.profession == wanted))
            .cloned()
            .collect())
    }

    async fn request_support(&self, req: &SupportRequest) -> Result<SupportRequestAck> {
        self.check("request_support")?;
        let mut state = self.state();
        let verified = state
            .professionals
            .iter()
            .any(|p| p.id == req.professional_id && p.verified);
        if !verified {
            return Err(ClientError::Status {
                status: 400,
                detail: "Professional not verified".into(),
            });
        }
        state.support_requests.push(req.clone());
        Ok(SupportRequestAck {
            request_id: Some(format!("sr{}", state.support_requests.len())),
            status: Some("pending".into()),
            message: Some("Support request sent".into()),
        })
    }
}
