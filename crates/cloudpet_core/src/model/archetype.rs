//! Archetype (pet type) template.

use crate::progression::estimate_level;
use serde::Serialize;

/// Immutable pet type template, one per cloud-service theme.
///
/// Instances only exist inside the static catalog; nothing mutates them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PetArchetype {
    /// Stable key referenced by `Pet::type_id`.
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Cloud service label this archetype stands for.
    pub cloud_service: &'static str,
    pub service_description: &'static str,
    /// Visual identity token consumed by renderers (e.g. `bg-blue-400`).
    pub base_color: &'static str,
    /// Ordered ability labels; never empty.
    pub abilities: &'static [&'static str],
    /// Positive coefficient scaling the display level estimate.
    pub growth_rate: f64,
    pub icon: &'static str,
}

impl PetArchetype {
    /// Display-only level estimate for this archetype at `experience`.
    ///
    /// Not the authoritative live level; see `crate::progression`.
    pub fn estimate_level(&self, experience: u32) -> u32 {
        estimate_level(experience, self.growth_rate)
    }
}
