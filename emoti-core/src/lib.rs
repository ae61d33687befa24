//! # EMOTI Core Library
//!
//! State-evolution model for a virtual pet: the pure transition functions
//! behind feed/clean/play/rest care loops.
//!
//! A [`Pet`] has four stats (hunger, happiness, cleanliness, energy) that
//! decay over elapsed real time, a derived [`Mood`], and an evolution stage
//! unlocked by sustained good care. All computation is client-side and
//! recomputed opportunistically; there is no server-side simulation
//! authority.
//!
//! The model is synchronous and side-effect-free apart from the caller's
//! clock and an injectable random source. Callers compose the transitions
//! in a fixed order:
//!
//! - user-initiated care: decay → stat delta → record → evolution check
//!   ([`care::apply_care`])
//! - passive read: decay → mood ([`decay::decay_stats`])
//!
//! [`session::PetSession`] packages that composition with local SQLite
//! persistence for callers that want a ready-made single owner per user.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod care;
pub mod config;
pub mod decay;
pub mod diary;
pub mod error;
pub mod evolution;
pub mod mood;
pub mod persistence;
pub mod pet;
pub mod session;
pub mod types;

pub use care::{apply_care, record_care_action};
pub use config::PetConfig;
pub use decay::decay_stats;
pub use diary::DiaryEntry;
pub use error::{PetError, Result};
pub use evolution::check_evolution;
pub use mood::update_mood;
pub use persistence::PetStore;
pub use pet::{Pet, Stats};
pub use session::PetSession;
pub use types::{CareAction, CareEvent, Mood, UserId};
