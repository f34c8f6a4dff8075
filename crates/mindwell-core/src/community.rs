use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use mindwell_client::WellnessBackend;
use mindwell_types::api::{CreateCommunityRequest, SendMessageRequest};
use mindwell_types::{Community, Message, MessageType};

use crate::alert::Alert;
use crate::error::{Result, ValidationError};
use crate::session::Session;

pub const NAME_MIN: usize = 3;
pub const NAME_MAX: usize = 100;
pub const TOPIC_MAX: usize = 50;
pub const DESCRIPTION_MAX: usize = 1000;
pub const MESSAGE_MAX: usize = 5000;

/// Split a fetched list into joined and recommended, keeping fetch order.
pub fn partition(communities: Vec<Community>) -> (Vec<Community>, Vec<Community>) {
    communities.into_iter().partition(|c| c.is_member)
}

#[derive(Debug, Default)]
pub struct CommunityScreen {
    my_communities: Vec<Community>,
    recommended: Vec<Community>,
    loaded: bool,
}

impl CommunityScreen {
    pub fn my_communities(&self) -> &[Community] {
        &self.my_communities
    }

    pub fn recommended(&self) -> &[Community] {
        &self.recommended
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub async fn load<B: WellnessBackend>(&mut self, backend: &B) -> Result<()> {
        let list = backend
            .list_communities()
            .await
            .inspect_err(|e| error!("Failed to load communities: {}", e))?;
        let (mine, recommended) = partition(list);
        info!(
            "Loaded {} joined and {} recommended communities",
            mine.len(),
            recommended.len()
        );
        self.my_communities = mine;
        self.recommended = recommended;
        self.loaded = true;
        Ok(())
    }

    pub async fn create<B: WellnessBackend>(
        &mut self,
        backend: &B,
        name: &str,
        topic: &str,
        description: &str,
    ) -> Result<Alert> {
        let req = validate_community(name, topic, description).inspect_err(|e| {
            warn!("Community form rejected: {}", e);
        })?;

        let resp = backend
            .create_community(&req)
            .await
            .inspect_err(|e| error!("Failed to create community: {}", e))?;
        info!("Created community {}", resp.community_id);

        // The community exists now; a failed refresh only leaves the old list on screen.
        if let Err(e) = self.load(backend).await {
            warn!("Community list refresh after create failed: {}", e);
        }

        Ok(Alert::info(
            "Community created",
            format!("\"{}\" is ready.", resp.name),
        ))
    }

    pub async fn join<B: WellnessBackend>(
        &mut self,
        backend: &B,
        session: &Session,
        community_id: &str,
    ) -> Result<Alert> {
        if self.my_communities.iter().any(|c| c.id == community_id) {
            return Ok(Alert::info("Already joined", "You're already a member."));
        }

        let ack = backend
            .join_community(community_id, &session.user_id)
            .await
            .inspect_err(|e| error!("Failed to join {}: {}", community_id, e))?;

        if let Some(pos) = self.recommended.iter().position(|c| c.id == community_id) {
            let mut community = self.recommended.remove(pos);
            community.is_member = true;
            community.member_count += 1;
            self.my_communities.push(community);
        }
        info!("Joined community {}", community_id);
        Ok(Alert::info("Joined", message_or(ack.message, "Welcome to the community!")))
    }

    pub async fn leave<B: WellnessBackend>(
        &mut self,
        backend: &B,
        session: &Session,
        community_id: &str,
    ) -> Result<Alert> {
        let ack = backend
            .leave_community(community_id, &session.user_id)
            .await
            .inspect_err(|e| error!("Failed to leave {}: {}", community_id, e))?;

        if let Some(pos) = self.my_communities.iter().position(|c| c.id == community_id) {
            let mut community = self.my_communities.remove(pos);
            community.is_member = false;
            community.member_count = community.member_count.saturating_sub(1);
            self.recommended.push(community);
        }
        info!("Left community {}", community_id);
        Ok(Alert::info("Left community", message_or(ack.message, "You left the community.")))
    }
}

fn validate_community(
    name: &str,
    topic: &str,
    description: &str,
) -> std::result::Result<CreateCommunityRequest, ValidationError> {
    let name = name.trim();
    let topic = topic.trim();
    let description = description.trim();
    let mut errors = ValidationError::default();

    let name_len = name.chars().count();
    if name_len == 0 {
        errors.push("name", "Community name is required");
    } else if !(NAME_MIN..=NAME_MAX).contains(&name_len) {
        errors.push(
            "name",
            format!("Community name must be {}-{} characters", NAME_MIN, NAME_MAX),
        );
    }
    if topic.is_empty() {
        errors.push("topic", "Pick a topic for the community");
    } else if topic.chars().count() > TOPIC_MAX {
        errors.push("topic", format!("Topic must be at most {} characters", TOPIC_MAX));
    }
    if description.chars().count() > DESCRIPTION_MAX {
        errors.push(
            "description",
            format!("Description must be at most {} characters", DESCRIPTION_MAX),
        );
    }

    errors.finish(CreateCommunityRequest {
        name: name.to_string(),
        topic: topic.to_string(),
        description: description.to_string(),
        anonymous_allowed: true,
    })
}

fn message_or(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

// -- Chat --

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatTarget {
    Community(String),
    Direct(String),
}

/// A locally appended message waiting for the server.
#[derive(Debug, Clone)]
pub struct PendingMessage {
    pub local_id: String,
    pub request: SendMessageRequest,
}

#[derive(Debug)]
pub struct ChatRoom {
    target: ChatTarget,
    messages: Vec<Message>,
}

impl ChatRoom {
    pub fn new(target: ChatTarget) -> Self {
        Self {
            target,
            messages: Vec::new(),
        }
    }

    pub fn target(&self) -> &ChatTarget {
        &self.target
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Fetch the conversation, replacing whatever is shown. Messages are kept
    /// oldest first whatever order the server sends them in.
    pub async fn open<B: WellnessBackend>(&mut self, backend: &B) -> Result<()> {
        let mut fetched = match &self.target {
            ChatTarget::Community(id) => backend.community_messages(id).await,
            ChatTarget::Direct(user_id) => backend.direct_messages(user_id).await,
        }
        .inspect_err(|e| error!("Failed to load messages for {:?}: {}", self.target, e))?;
        fetched.sort_by_key(|m| m.timestamp);
        self.messages = fetched;
        Ok(())
    }

    /// Append the optimistic local copy and build the request for it.
    pub fn stage(
        &mut self,
        sender_id: &str,
        text: &str,
    ) -> std::result::Result<PendingMessage, ValidationError> {
        let content = text.trim();
        if content.is_empty() {
            return Err(ValidationError::single("message", "Message cannot be empty"));
        }
        if content.chars().count() > MESSAGE_MAX {
            return Err(ValidationError::single(
                "message",
                format!("Message must be at most {} characters", MESSAGE_MAX),
            ));
        }

        let (community_id, recipient_id) = match &self.target {
            ChatTarget::Community(id) => (Some(id.clone()), None),
            ChatTarget::Direct(user_id) => (None, Some(user_id.clone())),
        };
        let local_id = format!("local-{}", Uuid::new_v4());

        self.messages.push(Message {
            id: local_id.clone(),
            sender_id: sender_id.to_string(),
            recipient_id: recipient_id.clone(),
            community_id: community_id.clone(),
            content: content.to_string(),
            timestamp: Utc::now(),
            message_type: MessageType::Text,
        });

        Ok(PendingMessage {
            local_id,
            request: SendMessageRequest {
                sender_id: sender_id.to_string(),
                recipient_id,
                community_id,
                content: content.to_string(),
                message_type: MessageType::Text,
            },
        })
    }

    /// Drop a staged message the server refused.
    pub fn rollback(&mut self, pending: &PendingMessage) {
        self.messages.retain(|m| m.id != pending.local_id);
    }

    /// Send a message. The local copy stays on success; no attempt is made to
    /// match it against a server echo.
    pub async fn send<B: WellnessBackend>(
        &mut self,
        backend: &B,
        session: &Session,
        text: &str,
    ) -> Result<()> {
        let pending = self.stage(&session.user_id, text)?;
        match backend.send_message(&pending.request).await {
            Ok(_) => Ok(()),
            Err(e) => {
                error!("Failed to send message: {}", e);
                self.rollback(&pending);
                Err(e.into())
            }
        }
    }
}
