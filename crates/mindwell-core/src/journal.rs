use tracing::{error, info, warn};

use mindwell_client::WellnessBackend;
use mindwell_types::api::CreateJournalRequest;
use mindwell_types::{JournalEntry, Language, Mood};

use crate::alert::Alert;
use crate::error::{Result, ValidationError};
use crate::session::Session;

pub const CONTENT_MAX: usize = 10_000;
pub const TITLE_MAX: usize = 200;
pub const PAGE_SIZE: u32 = 20;

/// The entry being written. Entries are private unless the user opts out.
#[derive(Debug, Clone)]
pub struct JournalDraft {
    pub title: String,
    pub content: String,
    pub mood: Option<Mood>,
    pub tags: Vec<String>,
    pub is_private: bool,
}

impl Default for JournalDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            mood: None,
            tags: Vec::new(),
            is_private: true,
        }
    }
}

impl JournalDraft {
    pub fn validate(
        &self,
        user_id: &str,
        language: Language,
    ) -> std::result::Result<CreateJournalRequest, ValidationError> {
        let title = self.title.trim();
        let content = self.content.trim();
        let mut errors = ValidationError::default();
        if title.chars().count() > TITLE_MAX {
            errors.push(
                "title",
                format!("Title must be at most {} characters", TITLE_MAX),
            );
        }
        if content.is_empty() {
            errors.push("content", "Write something before saving");
        } else if content.chars().count() > CONTENT_MAX {
            errors.push(
                "content",
                format!("Entries must be at most {} characters", CONTENT_MAX),
            );
        }

        let mut tags: Vec<String> = Vec::new();
        for tag in &self.tags {
            let tag = tag.trim().to_lowercase();
            if !tag.is_empty() && !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        errors.finish(CreateJournalRequest {
            user_id: user_id.to_string(),
            title: (!title.is_empty()).then(|| title.to_string()),
            content: content.to_string(),
            mood: self.mood,
            tags,
            is_private: self.is_private,
            language,
        })
    }
}

/// Private journal: newest entries first, paged [`PAGE_SIZE`] at a time.
#[derive(Debug, Default)]
pub struct JournalScreen {
    pub draft: JournalDraft,
    entries: Vec<JournalEntry>,
    total: u32,
    has_more: bool,
    prompts: Vec<String>,
}

impl JournalScreen {
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Fetch the first page, replacing whatever was shown.
    pub async fn load<B: WellnessBackend>(
        &mut self,
        backend: &B,
        session: &Session,
    ) -> Result<()> {
        let page = backend
            .journal_entries(&session.user_id, PAGE_SIZE, 0)
            .await
            .inspect_err(|e| error!("Failed to load journal: {}", e))?;
        self.entries = page.entries;
        self.total = page.total;
        self.has_more = page.has_more;
        Ok(())
    }

    /// Append the next page. Returns how many entries were added.
    pub async fn load_more<B: WellnessBackend>(
        &mut self,
        backend: &B,
        session: &Session,
    ) -> Result<usize> {
        if !self.has_more {
            return Ok(0);
        }
        let skip = self.entries.len() as u32;
        let page = backend
            .journal_entries(&session.user_id, PAGE_SIZE, skip)
            .await
            .inspect_err(|e| error!("Failed to load more journal entries: {}", e))?;
        let added = page.entries.len();
        self.entries.extend(page.entries);
        self.total = page.total;
        self.has_more = page.has_more && added > 0;
        Ok(added)
    }

    /// Save the draft. On success the draft is cleared and the first page
    /// reloaded; a failed reload keeps the previous listing.
    pub async fn save<B: WellnessBackend>(
        &mut self,
        backend: &B,
        session: &Session,
        language: Language,
    ) -> Result<Alert> {
        let req = self
            .draft
            .validate(&session.user_id, language)
            .inspect_err(|e| warn!("Journal entry rejected: {}", e))?;
        let resp = backend
            .create_journal_entry(&req)
            .await
            .inspect_err(|e| error!("Failed to save journal entry: {}", e))?;
        info!("Journal entry {} saved", resp.entry_id);
        self.draft = JournalDraft::default();

        if let Err(e) = self.load(backend, session).await {
            warn!("Journal saved but refresh failed: {}", e);
        }
        let message = if resp.message.is_empty() {
            "Your entry has been saved.".to_string()
        } else {
            resp.message
        };
        Ok(Alert::info("Saved", message))
    }

    pub async fn delete<B: WellnessBackend>(
        &mut self,
        backend: &B,
        entry_id: &str,
    ) -> Result<Alert> {
        backend
            .delete_journal_entry(entry_id)
            .await
            .inspect_err(|e| error!("Failed to delete journal entry {}: {}", entry_id, e))?;
        let before = self.entries.len();
        self.entries.retain(|e| e.id != entry_id);
        if self.entries.len() < before {
            self.total = self.total.saturating_sub(1);
        }
        Ok(Alert::info("Deleted", "The entry has been removed."))
    }

    /// Writing prompts, tuned to `mood` when one is given.
    pub async fn load_prompts<B: WellnessBackend>(
        &mut self,
        backend: &B,
        mood: Option<Mood>,
        language: Language,
    ) -> Result<&[String]> {
        let resp = backend
            .journal_prompts(mood, language)
            .await
            .inspect_err(|e| warn!("Failed to load journal prompts: {}", e))?;
        self.prompts = resp.prompts;
        Ok(&self.prompts)
    }
}
