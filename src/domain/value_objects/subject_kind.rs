use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::BonusType;

/// Equipment slot a piece of gear occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentSlot {
    Weapon,
    Top,
    Hat,
    Shoes,
}

impl EquipmentSlot {
    pub const ALL: [EquipmentSlot; 4] = [Self::Weapon, Self::Top, Self::Hat, Self::Shoes];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weapon => "weapon",
            Self::Top => "top",
            Self::Hat => "hat",
            Self::Shoes => "shoes",
        }
    }

    /// Bonus type used when the model names none or an unknown one
    pub fn default_bonus_type(&self) -> BonusType {
        match self {
            Self::Weapon => BonusType::AttackBonus,
            Self::Top => BonusType::DefenseBonus,
            Self::Hat => BonusType::HpBonus,
            Self::Shoes => BonusType::SpeedBonus,
        }
    }

    /// Noun used in prompts ("a weapon", "a pair of shoes")
    pub fn display_noun(&self) -> &'static str {
        match self {
            Self::Weapon => "weapon",
            Self::Top => "body armor top",
            Self::Hat => "hat",
            Self::Shoes => "pair of shoes",
        }
    }
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EquipmentSlot {
    type Err = UnknownSlot;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| UnknownSlot(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a valid equipment slot")]
pub struct UnknownSlot(pub String);

/// What a generation request describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubjectKind {
    Character,
    Equipment(EquipmentSlot),
}

impl fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Character => f.write_str("character"),
            Self::Equipment(slot) => slot.fmt(f),
        }
    }
}

/// Ephemeral input to one pipeline invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub kind: SubjectKind,
    pub name: String,
    pub description: String,
}

impl GenerationRequest {
    pub fn character(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: SubjectKind::Character,
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn equipment(
        slot: EquipmentSlot,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind: SubjectKind::Equipment(slot),
            name: name.into(),
            description: description.into(),
        }
    }
}
