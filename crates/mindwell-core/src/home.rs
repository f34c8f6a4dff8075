use std::collections::HashMap;

use chrono::{Local, Timelike, Utc};
use tracing::{error, info, warn};

use mindwell_client::WellnessBackend;
use mindwell_types::api::MoodEvent;
use mindwell_types::{Mood, MoodEntry};

use crate::alert::Alert;
use crate::error::{Result, ValidationError};
use crate::session::Session;

/// Sentiments counted towards the wellness score. `joy` only comes from text
/// analysis; the picker never sends it.
pub const POSITIVE_SENTIMENTS: [&str; 3] = ["happy", "calm", "joy"];

/// Greeting for an hour of the day (0-23).
pub fn greeting(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Good morning",
        12..=16 => "Good afternoon",
        17..=20 => "Good evening",
        _ => "Good night",
    }
}

pub fn greeting_for(name: Option<&str>, hour: u32) -> String {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => format!("{}, {}", greeting(hour), name),
        None => greeting(hour).to_string(),
    }
}

/// Greeting for the device's local time.
pub fn current_greeting(name: Option<&str>) -> String {
    greeting_for(name, Local::now().hour())
}

/// The six mood buttons. At most one is highlighted.
#[derive(Debug, Default)]
pub struct MoodPicker {
    selected: Option<Mood>,
}

impl MoodPicker {
    pub fn select(&mut self, mood: Mood) {
        self.selected = Some(mood);
    }

    pub fn selected(&self) -> Option<Mood> {
        self.selected
    }

    pub fn is_selected(&self, mood: Mood) -> bool {
        self.selected == Some(mood)
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Submit the highlighted mood. Nothing is kept locally afterwards.
    pub async fn submit<B: WellnessBackend>(
        &self,
        backend: &B,
        session: &Session,
        note: Option<String>,
    ) -> Result<Alert> {
        let Some(mood) = self.selected else {
            warn!("Mood submit with nothing selected");
            return Err(ValidationError::single("mood", "Pick how you're feeling first").into());
        };

        let entry = MoodEntry {
            mood,
            timestamp: Utc::now(),
            note: note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
        };
        backend
            .submit_mood(&session.user_id, &entry)
            .await
            .inspect_err(|e| error!("Mood submit failed: {}", e))?;

        info!("Mood {} recorded for {}", mood, session.user_id);
        Ok(Alert::info(
            "Mood saved",
            format!(
                "Thanks for checking in. You're feeling {} {}",
                mood.label().to_lowercase(),
                mood.emoji()
            ),
        ))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoodSummary {
    pub total: usize,
    pub positive: usize,
    /// Share of positive entries, in percent, one decimal.
    pub wellness_score: f64,
    pub most_common: Option<String>,
}

pub fn summarize(events: &[MoodEvent]) -> MoodSummary {
    let positive = events
        .iter()
        .filter(|e| {
            POSITIVE_SENTIMENTS
                .iter()
                .any(|p| p.eq_ignore_ascii_case(e.mood.trim()))
        })
        .count();

    let wellness_score = if events.is_empty() {
        0.0
    } else {
        (positive as f64 / events.len() as f64 * 1000.0).round() / 10.0
    };

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for e in events {
        *counts.entry(e.mood.as_str()).or_default() += 1;
    }
    // Ties go to the alphabetically first label.
    let most_common = counts
        .into_iter()
        .max_by(|(a_mood, a), (b_mood, b)| a.cmp(b).then_with(|| b_mood.cmp(a_mood)))
        .map(|(mood, _)| mood.to_string());

    MoodSummary {
        total: events.len(),
        positive,
        wellness_score,
        most_common,
    }
}

pub async fn mood_summary<B: WellnessBackend>(
    backend: &B,
    session: &Session,
    days: u32,
) -> Result<MoodSummary> {
    let history = backend
        .mood_history(&session.user_id, days)
        .await
        .inspect_err(|e| error!("Mood history failed: {}", e))?;
    Ok(summarize(&history.events))
}
