//! Intents raised by the presentation layer and their outcomes.

use crate::model::pet::PetId;
use crate::progression::InteractionOutcome;

/// User intent accepted by `PetCollection::dispatch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PetIntent {
    /// Create a pet of `type_id` named `name` and add it.
    AdoptPet { name: String, type_id: String },
    /// Interact once with the pet `id`.
    InteractWithPet { id: PetId },
}

/// What a dispatched intent did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentOutcome {
    Adopted(PetId),
    Interacted(InteractionOutcome),
    /// The intent targeted an unknown pet; nothing changed.
    Ignored,
}
