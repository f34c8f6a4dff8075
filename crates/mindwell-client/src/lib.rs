//! REST client for the MindWell backend.
//!
//! [`ApiClient`] is the reqwest-backed implementation; screens in
//! `mindwell-core` are written against the [`WellnessBackend`] trait so they can
//! run against an in-memory backend in tests.

pub mod backend;
pub mod client;
pub mod config;
pub mod error;

pub use backend::WellnessBackend;
pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
