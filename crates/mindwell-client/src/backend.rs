use std::future::Future;

use tracing::info;

use mindwell_types::api::{
    AuthResponse, ChatHistoryEntry, ChatMessageRequest, ChatReply, CreateCommunityRequest,
    CreateCommunityResponse, CreateJournalRequest, CreateJournalResponse, JournalPage,
    JournalPrompts, LoginRequest, MessageList, MoodHistory, RegisterRequest, SendMessageRequest,
    SendMessageResponse, SpeechToTextRequest, SpeechToTextResponse, StartSessionRequest,
    StartSessionResponse, StatusMessage, SubmitReportRequest, SubmitReportResponse,
    SupportRequest, SupportRequestAck,
};
use mindwell_types::{
    Community, Language, Message, Mood, MoodEntry, ProfessionType, Professional, User,
};

use crate::client::ApiClient;
use crate::error::Result;

/// Every backend call the screens make.
///
/// `login` and `register` are expected to remember the returned token so later
/// calls are authenticated; `logout` forgets it.
pub trait WellnessBackend: Send + Sync {
    // -- Auth --
    fn login(&self, req: &LoginRequest) -> impl Future<Output = Result<AuthResponse>> + Send;
    fn register(&self, req: &RegisterRequest)
    -> impl Future<Output = Result<AuthResponse>> + Send;
    fn logout(&self);

    // -- Users --
    fn get_user(&self, user_id: &str) -> impl Future<Output = Result<User>> + Send;

    // -- Communities --
    fn list_communities(&self) -> impl Future<Output = Result<Vec<Community>>> + Send;
    fn create_community(
        &self,
        req: &CreateCommunityRequest,
    ) -> impl Future<Output = Result<CreateCommunityResponse>> + Send;
    fn join_community(
        &self,
        community_id: &str,
        user_id: &str,
    ) -> impl Future<Output = Result<StatusMessage>> + Send;
    fn leave_community(
        &self,
        community_id: &str,
        user_id: &str,
    ) -> impl Future<Output = Result<StatusMessage>> + Send;

    // -- Messages --
    fn community_messages(
        &self,
        community_id: &str,
    ) -> impl Future<Output = Result<Vec<Message>>> + Send;
    fn direct_messages(&self, user_id: &str) -> impl Future<Output = Result<Vec<Message>>> + Send;
    fn send_message(
        &self,
        req: &SendMessageRequest,
    ) -> impl Future<Output = Result<SendMessageResponse>> + Send;

    // -- Therapist chat --
    fn start_chat_session(
        &self,
        req: &StartSessionRequest,
    ) -> impl Future<Output = Result<StartSessionResponse>> + Send;
    fn send_chat_message(
        &self,
        req: &ChatMessageRequest,
    ) -> impl Future<Output = Result<ChatReply>> + Send;
    fn chat_history(
        &self,
        session_id: &str,
    ) -> impl Future<Output = Result<Vec<ChatHistoryEntry>>> + Send;
    fn speech_to_text(
        &self,
        req: &SpeechToTextRequest,
    ) -> impl Future<Output = Result<SpeechToTextResponse>> + Send;

    // -- Reports --
    fn submit_report(
        &self,
        req: &SubmitReportRequest,
    ) -> impl Future<Output = Result<SubmitReportResponse>> + Send;

    // -- Mood --
    fn submit_mood(
        &self,
        user_id: &str,
        entry: &MoodEntry,
    ) -> impl Future<Output = Result<StatusMessage>> + Send;
    fn mood_history(
        &self,
        user_id: &str,
        days: u32,
    ) -> impl Future<Output = Result<MoodHistory>> + Send;

    // -- Journal --
    fn create_journal_entry(
        &self,
        req: &CreateJournalRequest,
    ) -> impl Future<Output = Result<CreateJournalResponse>> + Send;
    fn journal_entries(
        &self,
        user_id: &str,
        limit: u32,
        skip: u32,
    ) -> impl Future<Output = Result<JournalPage>> + Send;
    fn delete_journal_entry(&self, entry_id: &str)
    -> impl Future<Output = Result<StatusMessage>> + Send;
    fn journal_prompts(
        &self,
        mood: Option<Mood>,
        language: Language,
    ) -> impl Future<Output = Result<JournalPrompts>> + Send;

    // -- Professionals --
    fn list_professionals(
        &self,
        profession: Option<ProfessionType>,
    ) -> impl Future<Output = Result<Vec<Professional>>> + Send;
    fn request_support(
        &self,
        req: &SupportRequest,
    ) -> impl Future<Output = Result<SupportRequestAck>> + Send;
}

impl WellnessBackend for ApiClient {
    async fn login(&self, req: &LoginRequest) -> Result<AuthResponse> {
        let url = self.endpoint(&["auth", "login"])?;
        let resp: AuthResponse = self.post_json(url, req).await?;
        self.set_token(Some(resp.access_token.clone()));
        info!("Logged in as {}", resp.username);
        Ok(resp)
    }

    async fn register(&self, req: &RegisterRequest) -> Result<AuthResponse> {
        let url = self.endpoint(&["auth", "register"])?;
        let resp: AuthResponse = self.post_json(url, req).await?;
        self.set_token(Some(resp.access_token.clone()));
        info!("Registered {}", resp.username);
        Ok(resp)
    }

    fn logout(&self) {
        self.set_token(None);
    }

    async fn get_user(&self, user_id: &str) -> Result<User> {
        let url = self.endpoint(&["users", user_id])?;
        self.get_json(url).await
    }

    async fn list_communities(&self) -> Result<Vec<Community>> {
        let url = self.endpoint(&["communities"])?;
        self.get_json(url).await
    }

    async fn create_community(
        &self,
        req: &CreateCommunityRequest,
    ) -> Result<CreateCommunityResponse> {
        let url = self.endpoint(&["communities"])?;
        self.post_json(url, req).await
    }

    async fn join_community(&self, community_id: &str, user_id: &str) -> Result<StatusMessage> {
        let mut url = self.endpoint(&["communities", community_id, "join"])?;
        url.query_pairs_mut().append_pair("user_id", user_id);
        self.post_empty(url).await
    }

    async fn leave_community(&self, community_id: &str, user_id: &str) -> Result<StatusMessage> {
        let mut url = self.endpoint(&["communities", community_id, "leave"])?;
        url.query_pairs_mut().append_pair("user_id", user_id);
        self.post_empty(url).await
    }

    async fn community_messages(&self, community_id: &str) -> Result<Vec<Message>> {
        let url = self.endpoint(&["communities", community_id, "messages"])?;
        let list: MessageList = self.get_json(url).await?;
        Ok(list.into_vec())
    }

    async fn direct_messages(&self, user_id: &str) -> Result<Vec<Message>> {
        let url = self.endpoint(&["messages", user_id])?;
        let list: MessageList = self.get_json(url).await?;
        Ok(list.into_vec())
    }

    async fn send_message(&self, req: &SendMessageRequest) -> Result<SendMessageResponse> {
        let url = self.endpoint(&["messages"])?;
        self.post_json(url, req).await
    }

    async fn start_chat_session(
        &self,
        req: &StartSessionRequest,
    ) -> Result<StartSessionResponse> {
        let url = self.endpoint(&["chat", "session", "start"])?;
        self.post_json(url, req).await
    }

    async fn send_chat_message(&self, req: &ChatMessageRequest) -> Result<ChatReply> {
        let url = self.endpoint(&["chat", "message"])?;
        self.post_json(url, req).await
    }

    async fn chat_history(&self, session_id: &str) -> Result<Vec<ChatHistoryEntry>> {
        let mut url = self.endpoint(&["chat", "history"])?;
        url.query_pairs_mut().append_pair("session_id", session_id);
        self.get_json(url).await
    }

    async fn speech_to_text(&self, req: &SpeechToTextRequest) -> Result<SpeechToTextResponse> {
        let url = self.endpoint(&["speech-to-text"])?;
        self.post_json(url, req).await
    }

    async fn submit_report(&self, req: &SubmitReportRequest) -> Result<SubmitReportResponse> {
        let url = self.endpoint(&["reports"])?;
        self.post_json(url, req).await
    }

    async fn submit_mood(&self, user_id: &str, entry: &MoodEntry) -> Result<StatusMessage> {
        let url = self.endpoint(&["mood", "history", user_id])?;
        self.post_json(url, entry).await
    }

    async fn mood_history(&self, user_id: &str, days: u32) -> Result<MoodHistory> {
        let mut url = self.endpoint(&["mood", "history", user_id])?;
        url.query_pairs_mut()
            .append_pair("days", &days.to_string());
        self.get_json(url).await
    }

    async fn create_journal_entry(
        &self,
        req: &CreateJournalRequest,
    ) -> Result<CreateJournalResponse> {
        let url = self.endpoint(&["journal", "create"])?;
        self.post_json(url, req).await
    }

    async fn journal_entries(&self, user_id: &str, limit: u32, skip: u32) -> Result<JournalPage> {
        let mut url = self.endpoint(&["journal", "entries", user_id])?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("skip", &skip.to_string());
        self.get_json(url).await
    }

    async fn delete_journal_entry(&self, entry_id: &str) -> Result<StatusMessage> {
        let url = self.endpoint(&["journal", "delete", entry_id])?;
        self.delete_json(url).await
    }

    async fn journal_prompts(
        &self,
        mood: Option<Mood>,
        language: Language,
    ) -> Result<JournalPrompts> {
        let mut url = self.endpoint(&["journal", "prompts"])?;
        {
            let mut query = url.query_pairs_mut();
            if let Some(mood) = mood {
                query.append_pair("mood", mood.as_str());
            }
            query.append_pair("language", language.as_str());
        }
        self.get_json(url).await
    }

    async fn list_professionals(
        &self,
        profession: Option<ProfessionType>,
    ) -> Result<Vec<Professional>> {
        let mut url = self.endpoint(&["professionals"])?;
        if let Some(profession) = profession {
            url.query_pairs_mut()
                .append_pair("profession", profession.as_str());
        }
        self.get_json(url).await
    }

    async fn request_support(&self, req: &SupportRequest) -> Result<SupportRequestAck> {
        let url = self.endpoint(&["professionals", "support-request"])?;
        let ack: SupportRequestAck = self.post_json(url, req).await?;
        info!("Support request sent to {}", req.professional_id);
        Ok(ack)
    }
}
