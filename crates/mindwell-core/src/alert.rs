use mindwell_client::ClientError;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Info,
    Error,
    /// Needs an explicit confirm/cancel answer.
    Confirm,
}

/// A blocking dialog for the UI shell to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn confirm(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Confirm,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn from_error(err: &CoreError) -> Self {
        match err {
            CoreError::Validation(v) => Alert::error("Please check your details", v.to_string()),
            CoreError::Backend(ClientError::Network(_)) => Alert::error(
                "Network error",
                "We couldn't reach the server. Check your connection and try again.",
            ),
            CoreError::Backend(ClientError::Status { detail, .. }) => {
                Alert::error("Something went wrong", detail.clone())
            }
            CoreError::Backend(ClientError::Decode(_)) => Alert::error(
                "Something went wrong",
                "The server sent a response we couldn't read.",
            ),
            CoreError::Backend(ClientError::NotAuthenticated) | CoreError::NoSession => {
                Alert::error("Not signed in", "Please log in to continue.")
            }
            CoreError::Backend(ClientError::Config(msg)) => {
                Alert::error("Setup problem", msg.clone())
            }
            CoreError::Busy => Alert::info("One moment", "Still waiting for a reply."),
            CoreError::Microphone(e) => Alert::error("Microphone unavailable", e.to_string()),
        }
    }
}

impl From<&CoreError> for Alert {
    fn from(err: &CoreError) -> Self {
        Alert::from_error(err)
    }
}
