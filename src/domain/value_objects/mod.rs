//! Value objects - Immutable objects defined by their attributes

mod stat_schema;
mod subject_kind;

pub use stat_schema::{
    BonusType, StatValue, CHARACTER_STATS, EFFECT_BONUS_PER_TURN, EFFECT_CHANCE, EFFECT_DURATION,
    EFFECT_FIELDS, MAX_REASON_CHARS,
};
pub use subject_kind::{EquipmentSlot, GenerationRequest, SubjectKind, UnknownSlot};
