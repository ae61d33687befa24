//! Diary entries — one line per care action, with the resulting mood.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Mood;

/// A single diary line ("Feed Momo", with the mood that resulted).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryEntry {
    /// When the event happened.
    pub timestamp: DateTime<Utc>,
    /// Short event description.
    pub event: String,
    /// The pet's mood after the event.
    pub mood: Mood,
}

impl DiaryEntry {
    /// Create a diary entry.
    #[must_use]
    pub fn new(event: impl Into<String>, mood: Mood, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            event: event.into(),
            mood,
        }
    }
}
