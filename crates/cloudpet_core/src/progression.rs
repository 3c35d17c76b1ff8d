//! Level, experience and happiness rules.
//!
//! # Responsibility
//! - Estimate an archetype-scaled display level from experience.
//! - Apply the authoritative per-interaction state transition.
//!
//! # Invariants
//! - `level` never decreases across interactions.
//! - `experience` and `happiness` are clamped to `STAT_MAX`.
//!
//! Two level formulas coexist and disagree. `estimate_level` scales a square
//! root curve by the archetype growth rate; `apply_interaction` uses a linear
//! threshold and ignores the growth rate entirely. Both are kept as-is; which
//! one is intended is unresolved, so do not unify them.

use crate::model::pet::{Pet, STAT_MAX};

/// Experience granted by one interaction.
pub const INTERACTION_EXPERIENCE_GAIN: u8 = 10;
/// Happiness granted by one interaction.
pub const INTERACTION_HAPPINESS_GAIN: u8 = 5;
/// Experience span of one live level.
pub const EXPERIENCE_PER_LEVEL: u8 = 20;

/// Archetype-scaled display level: `floor(sqrt(xp / 100) * growth_rate) + 1`.
///
/// Used for catalog display and estimation only, never written to a pet.
pub fn estimate_level(experience: u32, growth_rate: f64) -> u32 {
    let scaled = (f64::from(experience) / 100.0).sqrt() * growth_rate;
    // Float-to-int `as` saturates, so a non-positive product yields level 1.
    scaled.floor() as u32 + 1
}

/// Live level implied by `experience`: `floor(xp / 20) + 1`.
///
/// Ignores the archetype growth rate; see the module docs.
pub fn live_level(experience: u8) -> u32 {
    u32::from(experience / EXPERIENCE_PER_LEVEL) + 1
}

/// Result of one applied interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionOutcome {
    pub previous_level: u32,
    pub level: u32,
    pub happiness: u8,
    pub experience: u8,
}

impl InteractionOutcome {
    pub fn leveled_up(&self) -> bool {
        self.level > self.previous_level
    }
}

/// Applies one interaction to `pet` in place.
///
/// Touches only `experience`, `happiness` and `level`.
pub fn apply_interaction(pet: &mut Pet) -> InteractionOutcome {
    let previous_level = pet.level;

    pet.experience = pet
        .experience
        .saturating_add(INTERACTION_EXPERIENCE_GAIN)
        .min(STAT_MAX);
    pet.happiness = pet
        .happiness
        .saturating_add(INTERACTION_HAPPINESS_GAIN)
        .min(STAT_MAX);
    pet.level = previous_level.max(live_level(pet.experience));

    InteractionOutcome {
        previous_level,
        level: pet.level,
        happiness: pet.happiness,
        experience: pet.experience,
    }
}
