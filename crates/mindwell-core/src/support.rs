use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use mindwell_client::WellnessBackend;
use mindwell_types::api::SupportRequest;
use mindwell_types::{ProfessionType, Professional, SupportChannel};

use crate::alert::Alert;
use crate::error::{Result, ValidationError};
use crate::session::Session;

pub const NOTES_MAX: usize = 1000;

#[derive(Debug, Clone, Default)]
pub struct SupportForm {
    pub channel: SupportChannel,
    pub notes: String,
    pub emergency: bool,
    pub preferred_time: Option<DateTime<Utc>>,
}

impl SupportForm {
    pub fn validate(
        &self,
        user_id: &str,
        professional: &Professional,
    ) -> std::result::Result<SupportRequest, ValidationError> {
        let notes = self.notes.trim();
        let mut errors = ValidationError::default();
        if !professional.verified {
            errors.push(
                "professional",
                format!("{} has not been verified yet", professional.name),
            );
        }
        if notes.chars().count() > NOTES_MAX {
            errors.push(
                "notes",
                format!("Notes must be at most {} characters", NOTES_MAX),
            );
        }
        errors.finish(SupportRequest {
            user_id: user_id.to_string(),
            professional_id: professional.id.clone(),
            request_type: self.channel,
            preferred_time: self.preferred_time,
            notes: (!notes.is_empty()).then(|| notes.to_string()),
            emergency: self.emergency,
        })
    }
}

/// Directory of professionals and the request form for the selected one.
#[derive(Debug, Default)]
pub struct SupportScreen {
    pub form: SupportForm,
    professionals: Vec<Professional>,
    filter: Option<ProfessionType>,
    selected: Option<String>,
}

impl SupportScreen {
    pub fn professionals(&self) -> &[Professional] {
        &self.professionals
    }

    pub fn filter(&self) -> Option<ProfessionType> {
        self.filter
    }

    pub fn selected(&self) -> Option<&Professional> {
        let id = self.selected.as_deref()?;
        self.professionals.iter().find(|p| p.id == id)
    }

    /// Load the directory, optionally narrowed to one profession. Verified
    /// professionals are listed first.
    pub async fn load<B: WellnessBackend>(
        &mut self,
        backend: &B,
        profession: Option<ProfessionType>,
    ) -> Result<()> {
        let mut list = backend
            .list_professionals(profession)
            .await
            .inspect_err(|e| error!("Failed to load professionals: {}", e))?;
        list.sort_by_key(|p| !p.verified);
        self.professionals = list;
        self.filter = profession;
        if self.selected().is_none() {
            self.selected = None;
        }
        Ok(())
    }

    /// Select a listed professional. Returns false for an unknown id.
    pub fn select(&mut self, professional_id: &str) -> bool {
        let known = self.professionals.iter().any(|p| p.id == professional_id);
        if known {
            self.selected = Some(professional_id.to_string());
        }
        known
    }

    /// Send the form to the selected professional. On success the form and
    /// the selection are cleared.
    pub async fn request<B: WellnessBackend>(
        &mut self,
        backend: &B,
        session: &Session,
    ) -> Result<Alert> {
        let Some(professional) = self.selected() else {
            let err = ValidationError::single("professional", "Choose someone to contact");
            return Err(err.into());
        };
        let name = professional.name.clone();
        let req = self
            .form
            .validate(&session.user_id, professional)
            .inspect_err(|e| warn!("Support request rejected: {}", e))?;

        let ack = backend
            .request_support(&req)
            .await
            .inspect_err(|e| error!("Failed to send support request: {}", e))?;
        info!(
            "Support request {} sent",
            ack.request_id.as_deref().unwrap_or("(no id)")
        );
        let emergency = req.emergency;
        self.form = SupportForm::default();
        self.selected = None;

        let mut message = ack
            .message
            .unwrap_or_else(|| format!("{} will get back to you soon.", name));
        if emergency {
            message.push_str(" If you are in danger right now, call 119.");
        }
        Ok(Alert::info("Request sent", message))
    }
}
