//! Screen logic for the MindWell app.
//!
//! Each screen owns its state and talks to the backend through
//! [`mindwell_client::WellnessBackend`]. A failed action returns a
//! [`CoreError`] and leaves the screen as it was; [`Alert::from_error`] turns
//! the error into the dialog the UI shows.

pub mod alert;
pub mod auth;
pub mod community;
pub mod error;
pub mod home;
pub mod journal;
pub mod navigation;
pub mod profile;
pub mod report;
pub mod session;
pub mod support;
pub mod therapist;
pub mod voice;

#[cfg(test)]
mod testing;

pub use alert::{Alert, AlertKind};
pub use error::{CoreError, Result, ValidationError};
pub use navigation::{BottomNav, Route, Router, Tab};
pub use session::Session;
