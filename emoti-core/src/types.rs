//! Core type definitions for the EMOTI pet model.
//!
//! All types are serializable; moods and care actions use a lowercase
//! string vocabulary in their stored representations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::PetError;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Unique identifier for an authenticated user. Each pet is scoped to
/// exactly one user; persisted pet state is keyed by this ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Create a new random user ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Mood
// ---------------------------------------------------------------------------

/// Categorical label summarizing a pet's current well-being.
///
/// Always derived from stats and care recency — never set directly by a
/// caller, except the `Neutral` initial value at creation and the transient
/// `Evolving` label set by the evolution gate (cleared on the next mood
/// recomputation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    /// Weighted score ≥ 90, or a recent play action.
    Excited,
    /// Weighted score ≥ 75.
    Happy,
    /// Weighted score ≥ 50.
    Neutral,
    /// Weighted score ≥ 25.
    Lonely,
    /// Weighted score ≥ 10.
    Tired,
    /// Weighted score < 10.
    Sick,
    /// Transient label set when the pet just advanced an evolution stage.
    Evolving,
}

impl Mood {
    /// Lowercase string form, matching the stored representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Excited => "excited",
            Self::Happy => "happy",
            Self::Neutral => "neutral",
            Self::Lonely => "lonely",
            Self::Tired => "tired",
            Self::Sick => "sick",
            Self::Evolving => "evolving",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Care actions
// ---------------------------------------------------------------------------

/// A discrete user-triggered care interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CareAction {
    /// Raises hunger (satiety), costs a little energy.
    Feed,
    /// Raises cleanliness, costs a little energy.
    Clean,
    /// Raises happiness, costs more energy.
    Play,
    /// Restores energy.
    Rest,
}

impl CareAction {
    /// All actions, in presentation order.
    pub const ALL: [Self; 4] = [Self::Feed, Self::Clean, Self::Play, Self::Rest];

    /// Lowercase label, matching the stored representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Feed => "feed",
            Self::Clean => "clean",
            Self::Play => "play",
            Self::Rest => "rest",
        }
    }

    /// Capitalized verb for diary entries ("Feed Momo").
    #[must_use]
    pub fn verb(self) -> &'static str {
        match self {
            Self::Feed => "Feed",
            Self::Clean => "Clean",
            Self::Play => "Play",
            Self::Rest => "Rest",
        }
    }
}

impl fmt::Display for CareAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CareAction {
    type Err = PetError;

    /// Parse a care-action label, case-insensitively.
    ///
    /// # Errors
    /// Returns [`PetError::UnknownAction`] for labels outside the
    /// `feed|clean|play|rest` vocabulary.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "feed" => Ok(Self::Feed),
            "clean" => Ok(Self::Clean),
            "play" => Ok(Self::Play),
            "rest" => Ok(Self::Rest),
            _ => Err(PetError::UnknownAction(s.to_string())),
        }
    }
}

/// The most recent care action and when it happened.
///
/// Overwritten, never appended, by each new action — the model keeps no
/// care history beyond this single event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CareEvent {
    /// Which action was performed.
    #[serde(rename = "type")]
    pub action: CareAction,
    /// When it was performed.
    pub timestamp: DateTime<Utc>,
}

impl CareEvent {
    /// Minutes elapsed between this event and `now`.
    #[must_use]
    pub fn minutes_before<Tz: chrono::TimeZone>(&self, now: DateTime<Tz>) -> f32 {
        now.signed_duration_since(self.timestamp).num_seconds() as f32 / 60.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn care_action_labels_round_trip() {
        for action in CareAction::ALL {
            assert_eq!(action.as_str().parse::<CareAction>().unwrap(), action);
        }
    }

    #[test]
    fn care_action_parse_is_case_insensitive() {
        assert_eq!("FEED".parse::<CareAction>().unwrap(), CareAction::Feed);
        assert_eq!("Play".parse::<CareAction>().unwrap(), CareAction::Play);
        assert_eq!(" rest ".parse::<CareAction>().unwrap(), CareAction::Rest);
    }

    #[test]
    fn unknown_action_is_rejected() {
        let err = "cuddle".parse::<CareAction>().unwrap_err();
        assert!(matches!(err, PetError::UnknownAction(label) if label == "cuddle"));
    }

    #[test]
    fn mood_serializes_lowercase() {
        let json = serde_json::to_string(&Mood::Evolving).unwrap();
        assert_eq!(json, "\"evolving\"");
        let back: Mood = serde_json::from_str("\"lonely\"").unwrap();
        assert_eq!(back, Mood::Lonely);
    }

    #[test]
    fn care_event_minutes_before() {
        let now = Utc::now();
        let event = CareEvent {
            action: CareAction::Feed,
            timestamp: now - chrono::Duration::minutes(5),
        };
        assert!((event.minutes_before(now) - 5.0).abs() < 0.01);
    }
}
