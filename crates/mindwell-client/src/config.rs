use std::time::Duration;

use mindwell_types::Language;

use crate::error::{ClientError, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub language: Language,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            language: Language::En,
        }
    }
}

impl ClientConfig {
    /// Build from `MINDWELL_API_URL`, `MINDWELL_TIMEOUT_SECS` and
    /// `MINDWELL_LANGUAGE`, loading `.env` first if one exists.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let base_url =
            std::env::var("MINDWELL_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
        let timeout_secs: u64 = std::env::var("MINDWELL_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .map_err(|e| ClientError::Config(format!("MINDWELL_TIMEOUT_SECS: {}", e)))?;
        let language = match std::env::var("MINDWELL_LANGUAGE") {
            Ok(raw) => raw.parse().map_err(ClientError::Config)?,
            Err(_) => Language::En,
        };

        Self::new(base_url, Duration::from_secs(timeout_secs), language)
    }

    pub fn new(base_url: impl Into<String>, timeout: Duration, language: Language) -> Result<Self> {
        let base_url = normalize_base_url(&base_url.into())?;
        if timeout.is_zero() {
            return Err(ClientError::Config("timeout must be greater than zero".into()));
        }
        Ok(Self {
            base_url,
            timeout,
            language,
        })
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ClientError::Config(format!(
            "API URL must start with http:// or https://, got '{}'",
            raw
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_dropped() {
        let cfg = ClientConfig::new(
            "https://mindwell.onrender.com/ ",
            Duration::from_secs(5),
            Language::En,
        )
        .unwrap();
        assert_eq!(cfg.base_url, "https://mindwell.onrender.com");
    }

    #[test]
    fn rejects_bare_host_and_zero_timeout() {
        assert!(matches!(
            ClientConfig::new("localhost:8000", Duration::from_secs(5), Language::En),
            Err(ClientError::Config(_))
        ));
        assert!(matches!(
            ClientConfig::new("http://localhost:8000", Duration::ZERO, Language::En),
            Err(ClientError::Config(_))
        ));
    }
}
