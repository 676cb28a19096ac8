//! Domain entities - Validated output blocks handed to the game engine

mod equipment_block;
mod stat_block;

use serde::Serialize;

pub use equipment_block::{EffectEntry, EquipmentBlock};
pub use stat_block::{StatBlock, StatEntry};

/// Output of one generation pipeline run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ValidatedBlock {
    Character(StatBlock),
    Equipment(EquipmentBlock),
}
