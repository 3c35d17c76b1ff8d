//! Pet creation with randomized cosmetic traits.
//!
//! # Responsibility
//! - Build new pet records bound to a catalog archetype.
//! - Roll the four cosmetic traits independently and uniformly.
//!
//! # Invariants
//! - New pets start at `level = 1`, `happiness = 100`, `experience = 0`.
//! - Ids are UUID v4 strings (OS randomness); the trait generator never
//!   influences identity.
//! - Creating a pet has no side effects; insertion is a separate step.

use crate::catalog::find_type;
use crate::model::pet::{
    normalize_pet_name, Accessory, Customizations, EyeStyle, MouthStyle, Pattern, Pet, PetId,
    PetValidationError, STAT_MAX,
};
use chrono::Utc;
use log::debug;
use rand::rngs::ThreadRng;
use rand::Rng;

/// Name used for previews before the user types one.
pub const PREVIEW_NAME: &str = "Preview";

/// Creates pets, drawing cosmetic traits from `G`.
pub struct PetFactory<G: Rng = ThreadRng> {
    rng: G,
}

impl PetFactory<ThreadRng> {
    /// Creates a factory backed by the thread-local generator.
    pub fn new() -> Self {
        Self::with_rng(rand::thread_rng())
    }
}

impl Default for PetFactory<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Rng> PetFactory<G> {
    /// Creates a factory over a caller-provided generator.
    ///
    /// Seeded generators make trait rolls reproducible in tests.
    pub fn with_rng(rng: G) -> Self {
        Self { rng }
    }

    /// Creates a fresh, uncommitted pet.
    ///
    /// # Errors
    /// - `PetValidationError::EmptyName` when `name` is blank after trimming.
    /// - `PetValidationError::UnknownType` when `type_id` is not in the catalog.
    pub fn create_pet(&mut self, name: &str, type_id: &str) -> Result<Pet, PetValidationError> {
        let name = normalize_pet_name(name)?;
        let archetype = find_type(type_id)
            .ok_or_else(|| PetValidationError::UnknownType(type_id.to_string()))?;

        let pet = Pet {
            id: PetId::generate(),
            name,
            type_id: archetype.id.to_string(),
            level: 1,
            happiness: STAT_MAX,
            experience: 0,
            created_at: Utc::now(),
            customizations: self.roll_customizations(),
        };
        debug!(
            "event=pet_create module=factory status=ok pet_id={} type_id={}",
            pet.id, pet.type_id
        );
        Ok(pet)
    }

    /// Creates an uncommitted preview pet for `type_id`.
    ///
    /// Falls back to `PREVIEW_NAME` when `draft_name` is blank, so a preview
    /// can be shown before the user has typed anything.
    pub fn preview(&mut self, draft_name: &str, type_id: &str) -> Result<Pet, PetValidationError> {
        if draft_name.trim().is_empty() {
            self.create_pet(PREVIEW_NAME, type_id)
        } else {
            self.create_pet(draft_name, type_id)
        }
    }

    /// Rolls one cosmetic trait set, each trait independently uniform.
    pub fn roll_customizations(&mut self) -> Customizations {
        Customizations {
            eye_style: EyeStyle::ALL[self.rng.gen_range(0..EyeStyle::ALL.len())],
            mouth_style: MouthStyle::ALL[self.rng.gen_range(0..MouthStyle::ALL.len())],
            accessory: Accessory::ALL[self.rng.gen_range(0..Accessory::ALL.len())],
            pattern: Pattern::ALL[self.rng.gen_range(0..Pattern::ALL.len())],
        }
    }
}
