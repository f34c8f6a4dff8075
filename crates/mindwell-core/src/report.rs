use chrono::Utc;
use tracing::{error, info, warn};

use mindwell_client::WellnessBackend;
use mindwell_types::api::SubmitReportRequest;
use mindwell_types::{Report, ReportType};

use crate::alert::Alert;
use crate::error::{Result, ValidationError};
use crate::session::Session;

pub const DESCRIPTION_MIN: usize = 10;
pub const DESCRIPTION_MAX: usize = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    Call { number: &'static str },
    Report,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotlineCard {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub action: CardAction,
}

pub const HOTLINES: &[HotlineCard] = &[
    HotlineCard {
        id: "suicide-prevention",
        title: "Mental Health & Suicide Prevention",
        description: "Free, confidential support 24 hours a day",
        action: CardAction::Call {
            number: "888-639-5433",
        },
    },
    HotlineCard {
        id: "police",
        title: "Police Emergency",
        description: "Immediate danger or a crime in progress",
        action: CardAction::Call { number: "119" },
    },
    HotlineCard {
        id: "ambulance",
        title: "Ambulance & Fire",
        description: "Medical emergencies and fire",
        action: CardAction::Call { number: "110" },
    },
    HotlineCard {
        id: "domestic-violence",
        title: "Domestic Violence Crisis Line",
        description: "Help for anyone experiencing abuse at home",
        action: CardAction::Call {
            number: "876-929-2997",
        },
    },
    HotlineCard {
        id: "report",
        title: "Report an Incident",
        description: "Tell us what happened. You can stay anonymous.",
        action: CardAction::Report,
    },
];

/// Request to open the device dialer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialIntent {
    pub uri: String,
}

/// `tel:` URI with formatting stripped; a leading `+` is kept.
pub fn dial_uri(number: &str) -> String {
    let trimmed = number.trim();
    let mut uri = String::from("tel:");
    if trimmed.starts_with('+') {
        uri.push('+');
    }
    uri.extend(trimmed.chars().filter(char::is_ascii_digit));
    uri
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardOutcome {
    /// Ask before dialing.
    ConfirmCall(Alert),
    FormOpened,
}

#[derive(Debug, Clone, Default)]
pub struct ReportForm {
    pub description: String,
    pub location: String,
    pub anonymous: bool,
    pub report_type: ReportType,
}

impl ReportForm {
    pub fn validate(&self) -> std::result::Result<Report, ValidationError> {
        let description = self.description.trim();
        let mut errors = ValidationError::default();
        if description.is_empty() {
            errors.push("description", "Please describe what happened");
        } else if description.chars().count() < DESCRIPTION_MIN {
            errors.push(
                "description",
                format!(
                    "Please add a bit more detail (at least {} characters)",
                    DESCRIPTION_MIN
                ),
            );
        } else if description.chars().count() > DESCRIPTION_MAX {
            errors.push(
                "description",
                format!("Please keep it under {} characters", DESCRIPTION_MAX),
            );
        }
        let location = self.location.trim();
        errors.finish(Report {
            description: description.to_string(),
            location: (!location.is_empty()).then(|| location.to_string()),
            anonymous: self.anonymous,
            report_type: self.report_type,
        })
    }
}

#[derive(Debug, Default)]
pub struct SafeReportScreen {
    pub form: ReportForm,
    form_visible: bool,
    pending_call: Option<&'static HotlineCard>,
}

impl SafeReportScreen {
    pub fn cards(&self) -> &'static [HotlineCard] {
        HOTLINES
    }

    pub fn is_form_visible(&self) -> bool {
        self.form_visible
    }

    /// Handle a card tap. `None` for an unknown card id.
    pub fn tap(&mut self, card_id: &str) -> Option<CardOutcome> {
        let card = HOTLINES.iter().find(|c| c.id == card_id)?;
        match card.action {
            CardAction::Call { number } => {
                self.pending_call = Some(card);
                Some(CardOutcome::ConfirmCall(Alert::confirm(
                    format!("Call {}?", card.title),
                    format!("This will open your phone's dialer to call {}.", number),
                )))
            }
            CardAction::Report => {
                self.form_visible = true;
                Some(CardOutcome::FormOpened)
            }
        }
    }

    pub fn confirm_call(&mut self) -> Option<DialIntent> {
        let card = self.pending_call.take()?;
        let CardAction::Call { number } = card.action else {
            return None;
        };
        info!("Dialing {}", card.title);
        Some(DialIntent {
            uri: dial_uri(number),
        })
    }

    pub fn cancel_call(&mut self) {
        self.pending_call = None;
    }

    pub fn close_form(&mut self) {
        self.form_visible = false;
    }

    /// Submit the report. The reporter is only attached when signed in and
    /// not anonymous. On success the form is cleared and hidden.
    pub async fn submit<B: WellnessBackend>(
        &mut self,
        backend: &B,
        session: Option<&Session>,
    ) -> Result<Alert> {
        let report = self.form.validate().inspect_err(|e| {
            warn!("Report form rejected: {}", e);
        })?;

        let reporter_id = if report.anonymous {
            None
        } else {
            session.map(|s| s.user_id.clone())
        };
        let req = SubmitReportRequest {
            report,
            reporter_id,
            submitted_at: Utc::now(),
        };
        let resp = backend
            .submit_report(&req)
            .await
            .inspect_err(|e| error!("Report submission failed: {}", e))?;

        info!(
            "Report submitted ({})",
            resp.report_id.as_deref().unwrap_or("no id")
        );
        self.form = ReportForm::default();
        self.form_visible = false;
        Ok(Alert::info(
            "Report sent",
            "Thank you for speaking up. Our team will review your report.",
        ))
    }
}
