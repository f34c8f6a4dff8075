use chrono::Utc;
use tracing::{error, info, warn};

use mindwell_client::WellnessBackend;
use mindwell_types::api::{ChatMessageRequest, ChatReply, StartSessionRequest};
use mindwell_types::{ChatTurn, Language, Speaker};

use crate::error::{CoreError, Result, ValidationError};
use crate::session::Session;
use crate::voice::{Microphone, VoiceInput, transcribe};

pub const SEED_GREETING: &str =
    "Hi, I'm your MindWell companion. This is a safe space. How are you feeling today?";
pub const MESSAGE_MAX: usize = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    Idle,
    AwaitingReply,
}

/// Three-dot "typing" animation shown while a reply is pending.
pub struct TypingIndicator;

impl TypingIndicator {
    const FRAMES: [&'static str; 3] = [".", "..", "..."];

    pub fn frame(tick: usize) -> &'static str {
        Self::FRAMES[tick % Self::FRAMES.len()]
    }
}

#[derive(Debug)]
pub struct TherapistChat {
    transcript: Vec<ChatTurn>,
    session_id: Option<String>,
    state: ChatState,
    language: Language,
    pub draft: String,
    suggestions: Vec<String>,
    support_message: Option<String>,
}

impl TherapistChat {
    pub fn new(language: Language) -> Self {
        Self {
            transcript: vec![seed_turn()],
            session_id: None,
            state: ChatState::Idle,
            language,
            draft: String::new(),
            suggestions: Vec::new(),
            support_message: None,
        }
    }

    pub fn transcript(&self) -> &[ChatTurn] {
        &self.transcript
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn support_message(&self) -> Option<&str> {
        self.support_message.as_deref()
    }

    /// Indicator frame while awaiting a reply, `None` otherwise.
    pub fn indicator(&self, tick: usize) -> Option<&'static str> {
        (self.state == ChatState::AwaitingReply).then(|| TypingIndicator::frame(tick))
    }

    /// Append the user's turn and enter the awaiting state.
    pub fn begin(&mut self, text: &str) -> Result<String> {
        if self.state == ChatState::AwaitingReply {
            return Err(CoreError::Busy);
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::single("message", "Message cannot be empty").into());
        }
        if text.chars().count() > MESSAGE_MAX {
            return Err(ValidationError::single(
                "message",
                format!("Message too long (max {} characters)", MESSAGE_MAX),
            )
            .into());
        }

        self.transcript.push(ChatTurn {
            speaker: Speaker::User,
            text: text.to_string(),
            timestamp: Utc::now(),
        });
        self.state = ChatState::AwaitingReply;
        Ok(text.to_string())
    }

    /// Append the bot's turn and go idle.
    pub fn finish(&mut self, reply: ChatReply) {
        if reply.needs_support {
            warn!("Reply flagged the user as needing support");
        }
        self.transcript.push(ChatTurn {
            speaker: Speaker::Bot,
            text: reply.response,
            timestamp: Utc::now(),
        });
        self.suggestions = reply.suggestions;
        self.support_message = reply.support_message.filter(|_| reply.needs_support);
        self.state = ChatState::Idle;
    }

    /// Undo `begin` after a failed request.
    pub fn abort(&mut self) {
        if self.state != ChatState::AwaitingReply {
            return;
        }
        if let Some(pos) = self
            .transcript
            .iter()
            .rposition(|t| t.speaker == Speaker::User)
        {
            self.transcript.remove(pos);
        }
        self.state = ChatState::Idle;
    }

    /// Start the chat session on first use; later calls reuse the id.
    pub async fn ensure_session<B: WellnessBackend>(
        &mut self,
        backend: &B,
        session: &Session,
    ) -> Result<String> {
        if let Some(id) = &self.session_id {
            return Ok(id.clone());
        }
        let resp = backend
            .start_chat_session(&StartSessionRequest {
                user_id: session.user_id.clone(),
                language: self.language,
            })
            .await
            .inspect_err(|e| error!("Failed to start chat session: {}", e))?;
        info!("Chat session {} started", resp.session_id);
        self.session_id = Some(resp.session_id.clone());
        Ok(resp.session_id)
    }

    pub async fn send<B: WellnessBackend>(
        &mut self,
        backend: &B,
        session: &Session,
        text: &str,
    ) -> Result<()> {
        let message = self.begin(text)?;

        let session_id = match self.ensure_session(backend, session).await {
            Ok(id) => id,
            Err(e) => {
                self.abort();
                return Err(e);
            }
        };

        let req = ChatMessageRequest {
            user_id: session.user_id.clone(),
            message,
            language: self.language,
            session_id: Some(session_id),
        };
        match backend.send_chat_message(&req).await {
            Ok(reply) => {
                self.finish(reply);
                Ok(())
            }
            Err(e) => {
                error!("Chat message failed: {}", e);
                self.abort();
                Err(e.into())
            }
        }
    }

    /// Send whatever is in the draft, clearing it on success.
    pub async fn send_draft<B: WellnessBackend>(
        &mut self,
        backend: &B,
        session: &Session,
    ) -> Result<()> {
        let draft = self.draft.clone();
        self.send(backend, session, &draft).await?;
        self.draft.clear();
        Ok(())
    }

    /// Toggle voice capture. Stopping transcribes the take into the draft and
    /// returns the text.
    pub async fn toggle_recording<B, M>(
        &mut self,
        backend: &B,
        voice: &mut VoiceInput<M>,
    ) -> Result<Option<String>>
    where
        B: WellnessBackend,
        M: Microphone,
    {
        let Some(audio) = voice.toggle()? else {
            return Ok(None);
        };
        let text = transcribe(backend, &audio, self.language).await?;
        self.draft = text.clone();
        Ok(Some(text))
    }

    /// Rebuild the transcript from stored history of the current session.
    /// Returns the number of exchanges loaded.
    pub async fn load_history<B: WellnessBackend>(&mut self, backend: &B) -> Result<usize> {
        let Some(session_id) = self.session_id.clone() else {
            return Ok(0);
        };
        let entries = backend
            .chat_history(&session_id)
            .await
            .inspect_err(|e| error!("Failed to load chat history: {}", e))?;

        let mut transcript = vec![seed_turn()];
        for entry in &entries {
            transcript.push(ChatTurn {
                speaker: Speaker::User,
                text: entry.user_message.clone(),
                timestamp: entry.timestamp,
            });
            transcript.push(ChatTurn {
                speaker: Speaker::Bot,
                text: entry.bot_response.clone(),
                timestamp: entry.timestamp,
            });
        }
        self.transcript = transcript;
        Ok(entries.len())
    }
}

fn seed_turn() -> ChatTurn {
    ChatTurn {
        speaker: Speaker::Bot,
        text: SEED_GREETING.to_string(),
        timestamp: Utc::now(),
    }
}
