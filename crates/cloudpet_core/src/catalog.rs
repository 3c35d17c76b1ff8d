//! Static archetype registry.
//!
//! # Responsibility
//! - Own the fixed, ordered list of pet archetypes.
//! - Resolve `type_id` keys to archetypes.
//!
//! # Invariants
//! - Archetype ids are unique.
//! - Order and content are fixed at compile time; nothing mutates them.

use crate::model::archetype::PetArchetype;

const ARCHETYPES: &[PetArchetype] = &[
    PetArchetype {
        id: "compute",
        name: "Cumulus",
        description: "A fast, energetic cloud pet that loves to process tasks quickly!",
        cloud_service: "Compute Engine",
        service_description: "Virtual machines that handle processing tasks",
        base_color: "bg-blue-400",
        abilities: &["Quick processing", "Auto-scaling", "Multi-tasking"],
        growth_rate: 1.2,
        icon: "⚡",
    },
    PetArchetype {
        id: "storage",
        name: "Nimbus",
        description: "A fluffy, expandable cloud that can store lots of treasures inside!",
        cloud_service: "Cloud Storage",
        service_description: "Scalable storage for all your data needs",
        base_color: "bg-purple-400",
        abilities: &["Expandable size", "Data protection", "Treasure holding"],
        growth_rate: 0.8,
        icon: "💾",
    },
    PetArchetype {
        id: "database",
        name: "Stratus",
        description: "An organized, structured cloud that remembers everything!",
        cloud_service: "Database Services",
        service_description: "Organized data storage with quick retrieval",
        base_color: "bg-green-400",
        abilities: &["Perfect memory", "Fast retrieval", "Pattern recognition"],
        growth_rate: 1.0,
        icon: "🗃️",
    },
    PetArchetype {
        id: "ai",
        name: "Cirrus",
        description: "A clever cloud with problem-solving abilities!",
        cloud_service: "AI & Machine Learning",
        service_description: "Intelligent services that learn and adapt",
        base_color: "bg-yellow-400",
        abilities: &["Learning", "Pattern recognition", "Prediction"],
        growth_rate: 1.5,
        icon: "🧠",
    },
    PetArchetype {
        id: "network",
        name: "Nebulus",
        description: "A social cloud that connects easily with others!",
        cloud_service: "Networking",
        service_description: "Fast connections between services",
        base_color: "bg-red-400",
        abilities: &["Fast connections", "Secure channels", "Global reach"],
        growth_rate: 1.1,
        icon: "🌐",
    },
];

/// Returns all archetypes in stable catalog order.
pub fn list_types() -> &'static [PetArchetype] {
    ARCHETYPES
}

/// Looks up one archetype by id.
///
/// Returns `None` when `id` is unknown; that is not an error.
pub fn find_type(id: &str) -> Option<&'static PetArchetype> {
    ARCHETYPES.iter().find(|archetype| archetype.id == id)
}

#[cfg(test)]
mod tests {
    use super::{find_type, list_types};
    use std::collections::HashSet;

    #[test]
    fn archetype_ids_are_unique() {
        let ids: HashSet<_> = list_types().iter().map(|archetype| archetype.id).collect();
        assert_eq!(ids.len(), list_types().len());
    }

    #[test]
    fn every_archetype_has_abilities_and_positive_growth() {
        for archetype in list_types() {
            assert!(!archetype.abilities.is_empty(), "{} has no abilities", archetype.id);
            assert!(archetype.growth_rate > 0.0, "{} growth rate", archetype.id);
        }
    }

    #[test]
    fn find_type_is_case_sensitive() {
        assert!(find_type("compute").is_some());
        assert!(find_type("Compute").is_none());
        assert!(find_type("").is_none());
    }
}
