//! Equipment stat block entity

use serde::Serialize;

use crate::domain::value_objects::{BonusType, StatValue};

/// Validated bonus data for one piece of gear
///
/// Field order is part of the wire contract: downstream consumers expect
/// `bonusType`, `bonusType_reason`, `bonusValue`, `effects`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquipmentBlock {
    #[serde(rename = "bonusType")]
    pub bonus_type: BonusType,
    #[serde(rename = "bonusType_reason", skip_serializing_if = "Option::is_none")]
    pub bonus_type_reason: Option<String>,
    #[serde(rename = "bonusValue")]
    pub bonus_value: StatValue,
    pub effects: Vec<EffectEntry>,
}

/// A timed effect the gear may trigger
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectEntry {
    #[serde(rename = "type")]
    pub effect_type: String,
    #[serde(rename = "type_reason", skip_serializing_if = "Option::is_none")]
    pub type_reason: Option<String>,
    /// Trigger probability, 0-1
    pub chance: StatValue,
    /// Turns the effect stays active
    pub duration: StatValue,
    #[serde(rename = "bonusIncreasePerTurn")]
    pub bonus_increase_per_turn: StatValue,
}
