//! Core pet lifecycle and persistence engine for CloudPet.
//! This crate is the single source of truth for pet invariants.

pub mod catalog;
pub mod db;
pub mod factory;
pub mod logging;
pub mod model;
pub mod persistence;
pub mod progression;
pub mod repo;
pub mod service;

pub use catalog::{find_type, list_types};
pub use factory::{PetFactory, PREVIEW_NAME};
pub use logging::{init_logging, logging_status, LogLevel};
pub use model::archetype::PetArchetype;
pub use model::pet::{
    parse_pet_id, Accessory, Customizations, EyeStyle, MouthStyle, Pattern, Pet, PetId,
    PetValidationError, STAT_MAX,
};
pub use persistence::{
    seed_collection, LoadOrigin, PersistenceError, SeedReason, SnapshotError, SnapshotStore,
    DEFAULT_SLOT_KEY,
};
pub use progression::{apply_interaction, estimate_level, live_level, InteractionOutcome};
pub use repo::slot_repo::{RepoError, RepoResult, SlotRepository, SqliteSlotRepository};
pub use service::collection_store::{PetCollection, ServiceStatus, StoreError, StoreResult};
pub use service::intent::{IntentOutcome, PetIntent};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
