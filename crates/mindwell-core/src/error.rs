use std::fmt;

use thiserror::Error;

use mindwell_client::ClientError;

use crate::voice::MicrophoneError;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Backend(#[from] ClientError),

    #[error("sign in first")]
    NoSession,

    /// A reply is still pending; the send button is disabled meanwhile.
    #[error("still waiting for a reply")]
    Busy,

    #[error(transparent)]
    Microphone(#[from] MicrophoneError),
}

/// One failed form rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: &'static str,
    pub message: String,
}

/// All failing rules of a form, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut err = Self::default();
        err.push(field, message);
        err
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.issues.push(FieldIssue {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.issues.iter().any(|i| i.field == field)
    }

    /// `Ok(value)` when no rule failed.
    pub fn finish<T>(self, value: T) -> std::result::Result<T, ValidationError> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<&str> = self.issues.iter().map(|i| i.message.as_str()).collect();
        f.write_str(&lines.join("\n"))
    }
}

impl std::error::Error for ValidationError {}
