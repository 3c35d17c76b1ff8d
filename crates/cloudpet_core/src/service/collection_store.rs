//! Pet collection use-case service.
//!
//! # Responsibility
//! - Own the in-memory, insertion-ordered pet list for the current user.
//! - Apply adoption and interaction intents.
//! - Write the full collection through to the durable slot after every change.
//!
//! # Invariants
//! - Pet ids are unique within the collection.
//! - Only `add` and `apply_interaction` mutate; both persist synchronously.
//! - A mutation whose write-through fails is undone, so `Err` means the
//!   collection is unchanged.
//! - Readers get shared borrows only; no `&mut Pet` leaves this type.
//!
//! # See also
//! - `crate::persistence::SnapshotStore` for the slot format and fallback.

use crate::catalog::{find_type, list_types};
use crate::factory::PetFactory;
use crate::model::archetype::PetArchetype;
use crate::model::pet::{normalize_pet_name, Pet, PetId, PetValidationError};
use crate::persistence::{LoadOrigin, PersistenceError, SnapshotStore};
use crate::progression::{apply_interaction, InteractionOutcome};
use crate::repo::slot_repo::SlotRepository;
use crate::service::intent::{IntentOutcome, PetIntent};
use log::{debug, error, info};
use rand::Rng;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Capacity points contributed by each pet level on the status board.
const CAPACITY_PER_LEVEL: u32 = 10;

pub type StoreResult<T> = Result<T, StoreError>;

/// Collection-level failure.
#[derive(Debug)]
pub enum StoreError {
    /// Invalid adoption input or invalid pet record.
    Validation(PetValidationError),
    /// A pet with this id is already in the collection.
    DuplicatePet(PetId),
    /// The write-through failed; the in-memory mutation was rolled back.
    Persistence(PersistenceError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicatePet(id) => write!(f, "pet already in collection: {id}"),
            Self::Persistence(err) => write!(f, "failed to persist pet collection: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::DuplicatePet(_) => None,
            Self::Persistence(err) => Some(err),
        }
    }
}

impl From<PetValidationError> for StoreError {
    fn from(value: PetValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<PersistenceError> for StoreError {
    fn from(value: PersistenceError) -> Self {
        Self::Persistence(value)
    }
}

/// Per-archetype status line for dashboards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceStatus {
    pub type_id: &'static str,
    pub cloud_service: &'static str,
    pub pet_count: usize,
    /// `sum(level) * 10` over pets of this type. Not clamped.
    pub capacity: u32,
}

/// Owned, write-through pet collection.
pub struct PetCollection<R: SlotRepository> {
    pets: Vec<Pet>,
    snapshots: SnapshotStore<R>,
    origin: LoadOrigin,
}

impl<R: SlotRepository> PetCollection<R> {
    /// Loads the collection from `snapshots`.
    ///
    /// Never fails; an absent or malformed slot yields the seed collection.
    pub fn open(snapshots: SnapshotStore<R>) -> Self {
        let (pets, origin) = snapshots.load_with_origin();
        info!(
            "event=collection_open module=store status=ok pets={} origin={:?}",
            pets.len(),
            origin
        );
        Self {
            pets,
            snapshots,
            origin,
        }
    }

    /// Where the startup collection came from.
    pub fn load_origin(&self) -> LoadOrigin {
        self.origin
    }

    /// Read view in adoption order.
    pub fn all(&self) -> &[Pet] {
        &self.pets
    }

    pub fn get(&self, id: &str) -> Option<&Pet> {
        self.pets.iter().find(|pet| pet.id.as_str() == id)
    }

    /// Resolves the archetype of one pet.
    pub fn archetype_of(&self, id: &str) -> Option<&'static PetArchetype> {
        self.get(id).and_then(|pet| find_type(&pet.type_id))
    }

    pub fn len(&self) -> usize {
        self.pets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pets.is_empty()
    }

    /// Appends a pet and writes the collection through.
    ///
    /// # Errors
    /// - `StoreError::Validation` when the record breaks a pet invariant.
    /// - `StoreError::DuplicatePet` when the id is already present.
    /// - `StoreError::Persistence` when the write fails; the pet is removed
    ///   again, so any `Err` leaves the collection unchanged.
    pub fn add(&mut self, pet: Pet) -> StoreResult<()> {
        pet.validate()?;
        if self.get(pet.id.as_str()).is_some() {
            error!(
                "event=pet_add module=store status=error error_code=duplicate_id pet_id={}",
                pet.id
            );
            return Err(StoreError::DuplicatePet(pet.id));
        }

        let pet_id = pet.id.clone();
        let type_id = pet.type_id.clone();
        self.pets.push(pet);
        if let Err(err) = self.persist("pet_add") {
            self.pets.pop();
            return Err(err);
        }
        info!(
            "event=pet_add module=store status=ok pet_id={} type_id={} pets={}",
            pet_id,
            type_id,
            self.pets.len()
        );
        Ok(())
    }

    /// Creates a pet through `factory` and adds it.
    ///
    /// Returns the id of the adopted pet.
    pub fn adopt<G: Rng>(
        &mut self,
        factory: &mut PetFactory<G>,
        name: &str,
        type_id: &str,
    ) -> StoreResult<PetId> {
        let pet = factory.create_pet(name, type_id)?;
        let pet_id = pet.id.clone();
        self.add(pet)?;
        Ok(pet_id)
    }

    /// Adopts a previously shown preview under the user-entered `name`.
    ///
    /// Keeps the preview's id, type, traits and creation time.
    pub fn adopt_preview(&mut self, preview: Pet, name: &str) -> StoreResult<PetId> {
        let name = normalize_pet_name(name)?;
        let pet = Pet { name, ..preview };
        let pet_id = pet.id.clone();
        self.add(pet)?;
        Ok(pet_id)
    }

    /// Applies one interaction to the pet with `id`.
    ///
    /// Returns `Ok(None)` and writes nothing when no such pet exists.
    ///
    /// # Errors
    /// - `StoreError::Persistence` when the write fails; the pet is restored
    ///   to its pre-interaction state.
    pub fn apply_interaction(&mut self, id: &str) -> StoreResult<Option<InteractionOutcome>> {
        let Some(index) = self.pets.iter().position(|pet| pet.id.as_str() == id) else {
            debug!("event=pet_interact module=store status=not_found pet_id={id}");
            return Ok(None);
        };

        let before = self.pets[index].clone();
        let outcome = apply_interaction(&mut self.pets[index]);
        if let Err(err) = self.persist("pet_interact") {
            self.pets[index] = before;
            return Err(err);
        }
        info!(
            "event=pet_interact module=store status=ok pet_id={} level={} leveled_up={} happiness={} experience={}",
            id,
            outcome.level,
            outcome.leveled_up(),
            outcome.happiness,
            outcome.experience
        );
        Ok(Some(outcome))
    }

    /// Applies one inbound intent from the presentation layer.
    pub fn dispatch<G: Rng>(
        &mut self,
        factory: &mut PetFactory<G>,
        intent: PetIntent,
    ) -> StoreResult<IntentOutcome> {
        match intent {
            PetIntent::AdoptPet { name, type_id } => {
                let pet_id = self.adopt(factory, &name, &type_id)?;
                Ok(IntentOutcome::Adopted(pet_id))
            }
            PetIntent::InteractWithPet { id } => Ok(match self.apply_interaction(id.as_str())? {
                Some(outcome) => IntentOutcome::Interacted(outcome),
                None => IntentOutcome::Ignored,
            }),
        }
    }

    /// Status line for every archetype, in catalog order.
    pub fn service_status(&self) -> Vec<ServiceStatus> {
        list_types()
            .iter()
            .map(|archetype| {
                let (pet_count, level_sum) = self
                    .pets
                    .iter()
                    .filter(|pet| pet.type_id == archetype.id)
                    .fold((0usize, 0u32), |(count, sum), pet| {
                        (count + 1, sum.saturating_add(pet.level))
                    });
                ServiceStatus {
                    type_id: archetype.id,
                    cloud_service: archetype.cloud_service,
                    pet_count,
                    capacity: level_sum.saturating_mul(CAPACITY_PER_LEVEL),
                }
            })
            .collect()
    }

    fn persist(&self, event: &'static str) -> StoreResult<()> {
        self.snapshots.save(&self.pets).map_err(|err| {
            error!(
                "event={event} module=store status=error error_code=write_through_failed error={err}"
            );
            StoreError::Persistence(err)
        })
    }
}
