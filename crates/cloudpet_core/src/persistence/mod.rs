//! Snapshot persistence between the pet collection and its durable slot.
//!
//! # Responsibility
//! - Encode the whole collection as one JSON array and write it to a slot.
//! - Rehydrate the collection at startup, falling back to the seed set.
//!
//! # Invariants
//! - `save` always writes the full collection, never a diff.
//! - `load` never fails: an absent, unreadable or malformed slot yields the
//!   seed collection and a logged reason.
//! - Loaded records pass `Pet::validate()` and carry unique ids; anything
//!   else counts as malformed.

pub mod seed;

use crate::model::pet::{Pet, PetId, PetValidationError};
use crate::repo::slot_repo::{RepoError, SlotRepository};
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use seed::seed_collection;

/// Slot key used when the caller does not choose one.
pub const DEFAULT_SLOT_KEY: &str = "cloudPets";

/// Malformed durable-slot contents.
///
/// Absorbed by `SnapshotStore::load`; only surfaced by `decode_snapshot`.
#[derive(Debug)]
pub enum SnapshotError {
    Malformed(serde_json::Error),
    InvalidRecord {
        index: usize,
        source: PetValidationError,
    },
    DuplicateId(PetId),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(err) => write!(f, "malformed pet snapshot: {err}"),
            Self::InvalidRecord { index, source } => {
                write!(f, "invalid pet record at index {index}: {source}")
            }
            Self::DuplicateId(id) => write!(f, "duplicate pet id in snapshot: {id}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Malformed(err) => Some(err),
            Self::InvalidRecord { source, .. } => Some(source),
            Self::DuplicateId(_) => None,
        }
    }
}

/// Write-path failure.
#[derive(Debug)]
pub enum PersistenceError {
    Encode(serde_json::Error),
    Repo(RepoError),
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode pet snapshot: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for PersistenceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Why the seed collection was used instead of stored state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedReason {
    /// The slot was never written.
    Absent,
    /// The slot holds a value that does not decode to a valid collection.
    Corrupt,
    /// The storage backend failed to read the slot.
    Unreadable,
}

impl SeedReason {
    fn as_str(self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Corrupt => "corrupt",
            Self::Unreadable => "unreadable",
        }
    }
}

/// Where a loaded collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    Stored,
    Seeded(SeedReason),
}

/// Decodes one slot value into validated pets.
///
/// # Errors
/// - `SnapshotError::Malformed` for structurally invalid JSON.
/// - `SnapshotError::InvalidRecord` for a record violating pet invariants.
/// - `SnapshotError::DuplicateId` when two records share an id.
pub fn decode_snapshot(raw: &str) -> Result<Vec<Pet>, SnapshotError> {
    let pets: Vec<Pet> = serde_json::from_str(raw).map_err(SnapshotError::Malformed)?;

    let mut seen = HashSet::with_capacity(pets.len());
    for (index, pet) in pets.iter().enumerate() {
        pet.validate()
            .map_err(|source| SnapshotError::InvalidRecord { index, source })?;
        if !seen.insert(pet.id.as_str()) {
            return Err(SnapshotError::DuplicateId(pet.id.clone()));
        }
    }

    Ok(pets)
}

/// Encodes pets into the slot wire form.
pub fn encode_snapshot(pets: &[Pet]) -> Result<String, serde_json::Error> {
    serde_json::to_string(pets)
}

/// Persistence adapter bound to one named slot.
pub struct SnapshotStore<R: SlotRepository> {
    repo: R,
    slot_key: String,
}

impl<R: SlotRepository> SnapshotStore<R> {
    /// Creates an adapter over `DEFAULT_SLOT_KEY`.
    pub fn new(repo: R) -> Self {
        Self::with_slot_key(repo, DEFAULT_SLOT_KEY)
    }

    pub fn with_slot_key(repo: R, slot_key: impl Into<String>) -> Self {
        Self {
            repo,
            slot_key: slot_key.into(),
        }
    }

    pub fn slot_key(&self) -> &str {
        &self.slot_key
    }

    /// Loads the stored collection, or the seed collection on any failure.
    pub fn load(&self) -> Vec<Pet> {
        self.load_with_origin().0
    }

    /// Same as `load`, also reporting which path produced the pets.
    pub fn load_with_origin(&self) -> (Vec<Pet>, LoadOrigin) {
        let raw = match self.repo.read_slot(&self.slot_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return self.fall_back(SeedReason::Absent, None),
            Err(err) => {
                return self.fall_back(SeedReason::Unreadable, Some(&err as &dyn Error));
            }
        };

        match decode_snapshot(&raw) {
            Ok(pets) => {
                info!(
                    "event=slot_load module=persistence status=ok slot={} pets={}",
                    self.slot_key,
                    pets.len()
                );
                (pets, LoadOrigin::Stored)
            }
            Err(err) => self.fall_back(SeedReason::Corrupt, Some(&err as &dyn Error)),
        }
    }

    /// Overwrites the slot with the full collection.
    ///
    /// Saving the same collection twice leaves an equivalent slot value.
    pub fn save(&self, pets: &[Pet]) -> Result<(), PersistenceError> {
        let encoded = encode_snapshot(pets).map_err(PersistenceError::Encode)?;
        self.repo.write_slot(&self.slot_key, &encoded)?;
        debug!(
            "event=slot_save module=persistence status=ok slot={} pets={} bytes={}",
            self.slot_key,
            pets.len(),
            encoded.len()
        );
        Ok(())
    }

    /// Drops the stored value so the next load starts from the seed set.
    pub fn clear(&self) -> Result<bool, PersistenceError> {
        Ok(self.repo.clear_slot(&self.slot_key)?)
    }

    fn fall_back(&self, reason: SeedReason, cause: Option<&dyn Error>) -> (Vec<Pet>, LoadOrigin) {
        match cause {
            Some(cause) if reason == SeedReason::Unreadable => error!(
                "event=slot_load module=persistence status=fallback slot={} reason={} error={}",
                self.slot_key,
                reason.as_str(),
                cause
            ),
            Some(cause) => warn!(
                "event=slot_load module=persistence status=fallback slot={} reason={} error={}",
                self.slot_key,
                reason.as_str(),
                cause
            ),
            None => info!(
                "event=slot_load module=persistence status=fallback slot={} reason={}",
                self.slot_key,
                reason.as_str()
            ),
        }
        (seed_collection(), LoadOrigin::Seeded(reason))
    }
}
