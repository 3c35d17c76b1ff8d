//! Pet domain model.
//!
//! # Responsibility
//! - Define the canonical pet record persisted in the durable slot.
//! - Define the four cosmetic trait enumerations and their wire names.
//! - Validate records before they enter the collection.
//!
//! # Invariants
//! - `id` is stable and never reused for another pet.
//! - `level >= 1`, `happiness` and `experience` stay within `[0, 100]`.
//! - `type_id` always resolves in the catalog.
//!
//! # See also
//! - `crate::progression` for the only mutation path.

use crate::catalog::find_type;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable, opaque identifier for every pet.
///
/// New ids are UUID v4 strings, but any non-empty token read back from the
/// slot is kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PetId(String);

impl PetId {
    /// Generates a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for PetId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PetId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for PetId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for PetId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Upper bound shared by happiness and experience.
pub const STAT_MAX: u8 = 100;

/// Parses a pet id received from the presentation layer.
///
/// Returns `None` when nothing but whitespace was given.
pub fn parse_pet_id(value: &str) -> Option<PetId> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| PetId::from(trimmed))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EyeStyle {
    Happy,
    Round,
    Sleepy,
    Wink,
}

impl EyeStyle {
    pub const ALL: [Self; 4] = [Self::Happy, Self::Round, Self::Sleepy, Self::Wink];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouthStyle {
    Smile,
    Open,
    Surprised,
    Smirk,
}

impl MouthStyle {
    pub const ALL: [Self; 4] = [Self::Smile, Self::Open, Self::Surprised, Self::Smirk];
}

/// Optional headwear/eyewear. `None` is a real choice, stored as `"none"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accessory {
    Bow,
    Glasses,
    Hat,
    None,
}

impl Accessory {
    pub const ALL: [Self; 4] = [Self::Bow, Self::Glasses, Self::Hat, Self::None];
}

/// Body pattern. `None` is a real choice, stored as `"none"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pattern {
    Dots,
    Stripes,
    Stars,
    None,
}

impl Pattern {
    pub const ALL: [Self; 4] = [Self::Dots, Self::Stripes, Self::Stars, Self::None];
}

/// Cosmetic trait set fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customizations {
    pub eye_style: EyeStyle,
    pub mouth_style: MouthStyle,
    /// A persisted `null` reads back as `Accessory::None`.
    #[serde(deserialize_with = "nullable_accessory")]
    pub accessory: Accessory,
    /// A persisted `null` reads back as `Pattern::None`.
    #[serde(deserialize_with = "nullable_pattern")]
    pub pattern: Pattern,
}

fn nullable_accessory<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Accessory, D::Error> {
    Ok(Option::<Accessory>::deserialize(deserializer)?.unwrap_or(Accessory::None))
}

fn nullable_pattern<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Pattern, D::Error> {
    Ok(Option::<Pattern>::deserialize(deserializer)?.unwrap_or(Pattern::None))
}

/// Canonical pet record.
///
/// Serialized field names follow the durable slot layout
/// (`typeId`, `createdAt`, ...). `created_at` travels as an RFC 3339 string
/// and reads back to the exact same instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: PetId,
    pub name: String,
    /// Foreign key into the archetype catalog.
    pub type_id: String,
    pub level: u32,
    pub happiness: u8,
    pub experience: u8,
    pub created_at: DateTime<Utc>,
    pub customizations: Customizations,
}

impl Pet {
    /// Checks every record-level invariant.
    ///
    /// # Errors
    /// - Returns the first violated invariant as `PetValidationError`.
    pub fn validate(&self) -> Result<(), PetValidationError> {
        if self.id.is_empty() {
            return Err(PetValidationError::EmptyId);
        }
        if self.name.trim().is_empty() {
            return Err(PetValidationError::EmptyName);
        }
        if find_type(&self.type_id).is_none() {
            return Err(PetValidationError::UnknownType(self.type_id.clone()));
        }
        if self.level == 0 {
            return Err(PetValidationError::LevelBelowOne);
        }
        if self.happiness > STAT_MAX {
            return Err(PetValidationError::HappinessOutOfRange(self.happiness));
        }
        if self.experience > STAT_MAX {
            return Err(PetValidationError::ExperienceOutOfRange(self.experience));
        }
        Ok(())
    }
}

/// Normalizes a user-supplied pet name.
///
/// # Errors
/// - Returns `PetValidationError::EmptyName` when nothing but whitespace remains.
pub fn normalize_pet_name(name: &str) -> Result<String, PetValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(PetValidationError::EmptyName);
    }
    Ok(trimmed.to_string())
}

/// Invalid input or invalid record state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PetValidationError {
    EmptyName,
    UnknownType(String),
    EmptyId,
    LevelBelowOne,
    HappinessOutOfRange(u8),
    ExperienceOutOfRange(u8),
}

impl Display for PetValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "pet name cannot be empty"),
            Self::UnknownType(type_id) => write!(f, "unknown pet type `{type_id}`"),
            Self::EmptyId => write!(f, "pet id cannot be empty"),
            Self::LevelBelowOne => write!(f, "pet level must be >= 1"),
            Self::HappinessOutOfRange(value) => {
                write!(f, "happiness ({value}) must be within 0..={STAT_MAX}")
            }
            Self::ExperienceOutOfRange(value) => {
                write!(f, "experience ({value}) must be within 0..={STAT_MAX}")
            }
        }
    }
}

impl Error for PetValidationError {}

#[cfg(test)]
mod tests {
    use super::{normalize_pet_name, parse_pet_id, PetId, PetValidationError};

    #[test]
    fn normalize_pet_name_trims_and_rejects_blank() {
        assert_eq!(normalize_pet_name("  Cloudy ").unwrap(), "Cloudy");
        assert_eq!(
            normalize_pet_name(" \t\n").unwrap_err(),
            PetValidationError::EmptyName
        );
    }

    #[test]
    fn parse_pet_id_keeps_opaque_tokens_and_rejects_blank() {
        assert_eq!(parse_pet_id(" k3j4h5g6f7d8s ").unwrap().as_str(), "k3j4h5g6f7d8s");
        assert!(parse_pet_id("   ").is_none());
    }

    #[test]
    fn generated_ids_are_uuid_strings() {
        let id = PetId::generate();
        assert!(uuid::Uuid::parse_str(id.as_str()).is_ok());
        assert_eq!(serde_json::to_value(&id).unwrap(), id.as_str());
    }
}
