//! Deterministic seed collection.
//!
//! Used whenever no valid persisted state exists. Ids, timestamps and trait
//! rolls are fixed so every fallback yields the same three pets.

use crate::factory::PetFactory;
use crate::model::pet::{Pet, PetId, STAT_MAX};
use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const SEED_TRAIT_STREAM: u64 = 0x00C1_0D9E_7F00_0001;
/// 2025-01-01T00:00:00Z.
const SEED_CREATED_AT_SECS: i64 = 1_735_689_600;

const SEED_PETS: [(&str, &str, &str); 3] = [
    ("5eed0001-0000-4000-8000-000000000001", "Cloudy", "compute"),
    ("5eed0002-0000-4000-8000-000000000002", "Stormy", "storage"),
    ("5eed0003-0000-4000-8000-000000000003", "Droplet", "database"),
];

/// Returns the fixed three-pet seed collection.
pub fn seed_collection() -> Vec<Pet> {
    let mut factory = PetFactory::with_rng(ChaCha8Rng::seed_from_u64(SEED_TRAIT_STREAM));
    let created_at = DateTime::<Utc>::from_timestamp(SEED_CREATED_AT_SECS, 0).unwrap_or_default();

    SEED_PETS
        .iter()
        .map(|&(id, name, type_id)| Pet {
            id: PetId::from(id),
            name: name.to_string(),
            type_id: type_id.to_string(),
            level: 1,
            happiness: STAT_MAX,
            experience: 0,
            created_at,
            customizations: factory.roll_customizations(),
        })
        .collect()
}
