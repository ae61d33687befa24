//! Single-owner session for one user's pet.
//!
//! The model functions are pure; something still has to serialize reads,
//! transitions and writes for a given pet. [`PetSession`] is that owner: it
//! holds the pet, a seedable random source for decay, the configuration and
//! the store, and funnels every mutation through itself. Persisted writes
//! are last-write-wins at the store, so concurrent sessions for the same
//! user are the caller's mistake to avoid.
//!
//! Remote mirroring stays outside this crate: the session persists locally
//! and the surrounding application ships the returned pet wherever else it
//! wants.

use chrono::{DateTime, Local, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::care;
use crate::config::PetConfig;
use crate::decay;
use crate::diary::DiaryEntry;
use crate::error::{PetError, Result};
use crate::persistence::PetStore;
use crate::pet::Pet;
use crate::types::{CareAction, UserId};

/// Owns one user's pet state and serializes all transitions to it.
pub struct PetSession {
    user_id: UserId,
    pet: Option<Pet>,
    rng: StdRng,
    config: PetConfig,
    store: PetStore,
}

impl std::fmt::Debug for PetSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PetSession")
            .field("user_id", &self.user_id)
            .field("pet", &self.pet)
            .finish_non_exhaustive()
    }
}

impl PetSession {
    /// Open a session for `user_id`, loading the stored pet if one exists.
    ///
    /// # Errors
    /// Returns a [`PetError`] if the stored pet cannot be read.
    pub fn open(store: PetStore, user_id: UserId, config: PetConfig) -> Result<Self> {
        let pet = store.load_pet(&user_id)?;
        match &pet {
            Some(pet) => info!(user = %user_id, pet = %pet.name, "Session opened"),
            None => debug!(user = %user_id, "Session opened with no pet"),
        }
        Ok(Self {
            user_id,
            pet,
            rng: StdRng::from_entropy(),
            config,
            store,
        })
    }

    /// Like [`PetSession::open`], but with a fixed RNG seed so decay amounts
    /// are reproducible.
    ///
    /// # Errors
    /// Returns a [`PetError`] if the stored pet cannot be read.
    pub fn open_seeded(
        store: PetStore,
        user_id: UserId,
        config: PetConfig,
        seed: u64,
    ) -> Result<Self> {
        let mut session = Self::open(store, user_id, config)?;
        session.rng = StdRng::seed_from_u64(seed);
        Ok(session)
    }

    /// The session's user.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// The current pet, if one has been created.
    #[must_use]
    pub fn pet(&self) -> Option<&Pet> {
        self.pet.as_ref()
    }

    /// Create and persist a new pet at the baseline, replacing any previous
    /// one for this user.
    ///
    /// # Errors
    /// Returns [`PetError::InvalidName`] for a bad name, or a persistence
    /// error if the save fails.
    pub fn create(&mut self, name: &str, now: DateTime<Utc>) -> Result<&Pet> {
        let pet = Pet::new(name, now)?;
        self.store.save_pet(&self.user_id, &pet)?;
        info!(user = %self.user_id, pet = %pet.name, "Pet created");
        Ok(self.pet.insert(pet))
    }

    /// Passive read path: decay → mood, persisted.
    ///
    /// # Errors
    /// Returns [`PetError::PetNotFound`] if no pet exists, or a persistence
    /// error if the save fails.
    pub fn refresh(&mut self, now: DateTime<Local>) -> Result<&Pet> {
        let pet = self
            .pet
            .as_ref()
            .ok_or(PetError::PetNotFound(self.user_id))?;
        let updated = decay::decay_stats(pet, now, &mut self.rng, &self.config);
        self.store.save_pet(&self.user_id, &updated)?;
        Ok(self.pet.insert(updated))
    }

    /// User-initiated care path: decay → delta → record → evolution check,
    /// persisted, with a diary entry for the action.
    ///
    /// # Errors
    /// Returns [`PetError::PetNotFound`] if no pet exists, or a persistence
    /// error if the save fails.
    pub fn care(&mut self, action: CareAction, now: DateTime<Local>) -> Result<&Pet> {
        let pet = self
            .pet
            .as_ref()
            .ok_or(PetError::PetNotFound(self.user_id))?;
        let stage_before = pet.evolution_stage;

        let updated = care::apply_care(pet, action, now, &mut self.rng, &self.config);
        self.store.save_pet(&self.user_id, &updated)?;

        let entry = DiaryEntry::new(
            format!("{} {}", action.verb(), updated.name),
            updated.mood,
            now.with_timezone(&Utc),
        );
        self.store.append_diary(&self.user_id, &entry)?;

        if updated.evolution_stage != stage_before {
            info!(
                user = %self.user_id,
                pet = %updated.name,
                stage = updated.evolution_stage,
                "Pet evolved, state persisted"
            );
        }

        Ok(self.pet.insert(updated))
    }

    /// The user's diary, oldest first.
    ///
    /// # Errors
    /// Returns a persistence error if the read fails.
    pub fn diary(&self) -> Result<Vec<DiaryEntry>> {
        self.store.load_diary(&self.user_id)
    }

    /// Remove everything stored for this user and drop the in-memory pet.
    ///
    /// # Errors
    /// Returns a persistence error if the deletion fails.
    pub fn delete_account(&mut self) -> Result<()> {
        self.store.delete_account(&self.user_id)?;
        self.pet = None;
        Ok(())
    }
}
