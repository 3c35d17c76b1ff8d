//! Domain model for pets and their archetypes.
//!
//! # Responsibility
//! - Define the canonical pet record and its cosmetic trait set.
//! - Define the immutable archetype template shape used by the catalog.
//!
//! # Invariants
//! - Every pet is identified by a stable `PetId` that is never reused.
//! - Cosmetic traits are chosen once at creation and never evolve.
//!
//! # See also
//! - `crate::catalog` for the fixed archetype registry.

pub mod archetype;
pub mod pet;
