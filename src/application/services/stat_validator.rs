//! Stat validator - turns an untrusted model payload into a schema-valid block
//!
//! Nothing in here fails: every problem is absorbed locally. A bad field gets
//! its canonical default, a bad reason string is dropped, an unusable payload
//! is replaced by the default block.

use std::sync::LazyLock;

use regex_lite::Regex;
use serde_json::{Map, Value};

use crate::domain::entities::{EffectEntry, EquipmentBlock, StatBlock, StatEntry, ValidatedBlock};
use crate::domain::value_objects::{
    BonusType, EquipmentSlot, SubjectKind, CHARACTER_STATS, EFFECT_BONUS_PER_TURN, EFFECT_CHANCE,
    EFFECT_DURATION, MAX_REASON_CHARS,
};

static SUSPICIOUS_CONTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)```|json|output|return|system|prompt|\{[^}]*\}|\[[^\]]*\]")
        .expect("valid regex")
});

/// Validate a parsed payload against the schema of `kind`
pub fn validate(parsed: &Value, kind: SubjectKind) -> ValidatedBlock {
    match kind {
        SubjectKind::Character => ValidatedBlock::Character(validate_stat_block(parsed)),
        SubjectKind::Equipment(slot) => {
            ValidatedBlock::Equipment(validate_equipment_block(parsed, slot))
        }
    }
}

/// Canonical fallback block for `kind`
pub fn defaults(kind: SubjectKind) -> ValidatedBlock {
    match kind {
        SubjectKind::Character => ValidatedBlock::Character(default_stat_block()),
        SubjectKind::Equipment(slot) => ValidatedBlock::Equipment(default_equipment_block(slot)),
    }
}

pub fn default_stat_block() -> StatBlock {
    StatBlock::from_entries(
        CHARACTER_STATS
            .iter()
            .map(|spec| StatEntry {
                name: spec.name,
                value: spec.default_value(),
                reason: None,
            })
            .collect(),
    )
}

pub fn default_equipment_block(slot: EquipmentSlot) -> EquipmentBlock {
    let bonus_type = slot.default_bonus_type();
    EquipmentBlock {
        bonus_type,
        bonus_type_reason: None,
        bonus_value: bonus_type.spec().default_value(),
        effects: Vec::new(),
    }
}

pub fn validate_stat_block(parsed: &Value) -> StatBlock {
    let Some(fields) = parsed.as_object() else {
        tracing::warn!("Character payload is not a JSON object, using defaults");
        return default_stat_block();
    };

    let entries = CHARACTER_STATS
        .iter()
        .map(|spec| StatEntry {
            name: spec.name,
            value: spec.coerce(fields.get(spec.name)),
            reason: reason_for(fields, spec.name),
        })
        .collect();

    StatBlock::from_entries(entries)
}

pub fn validate_equipment_block(parsed: &Value, slot: EquipmentSlot) -> EquipmentBlock {
    let Some(fields) = unwrap_slot_envelope(parsed, slot).as_object() else {
        tracing::warn!("{} payload is not a JSON object, using defaults", slot);
        return default_equipment_block(slot);
    };

    let bonus_type = match fields.get("bonusType") {
        Some(Value::String(tag)) => BonusType::from_tag(tag.trim()),
        _ => None,
    }
    .unwrap_or_else(|| {
        tracing::warn!(
            "Missing or unknown bonusType for {}, using {}",
            slot,
            slot.default_bonus_type().tag()
        );
        slot.default_bonus_type()
    });

    let effects = fields
        .get("effects")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(validate_effect).collect())
        .unwrap_or_default();

    EquipmentBlock {
        bonus_type,
        bonus_type_reason: reason_for(fields, "bonusType"),
        bonus_value: bonus_type.spec().coerce(fields.get("bonusValue")),
        effects,
    }
}

/// `{"weapon": {...}}` is the shape older prompts asked for
fn unwrap_slot_envelope(parsed: &Value, slot: EquipmentSlot) -> &Value {
    match parsed.as_object() {
        Some(fields) if fields.len() == 1 => match fields.get(slot.as_str()) {
            Some(inner @ Value::Object(_)) => inner,
            _ => parsed,
        },
        _ => parsed,
    }
}

fn validate_effect(item: &Value) -> Option<EffectEntry> {
    let fields = item.as_object()?;
    let effect_type = clean_effect_type(fields.get("type")?.as_str()?)?;
    let bonus_per_turn = fields
        .get("bonusIncreasePerTurn")
        .or_else(|| fields.get("damageForTurn"));

    Some(EffectEntry {
        effect_type,
        type_reason: reason_for(fields, "type"),
        chance: EFFECT_CHANCE.coerce(fields.get("chance")),
        duration: EFFECT_DURATION.coerce(fields.get("duration")),
        bonus_increase_per_turn: EFFECT_BONUS_PER_TURN.coerce(bonus_per_turn),
    })
}

/// Effect tags are free-form; only a blank tag is unusable
fn clean_effect_type(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        tracing::warn!("Dropping effect with blank type tag");
        return None;
    }
    Some(trimmed.to_string())
}

/// Reason attached to `field`, read from `<field>_reason` or `<field>Reason`
fn reason_for(fields: &Map<String, Value>, field: &str) -> Option<String> {
    let raw = fields
        .get(&format!("{}_reason", field))
        .or_else(|| fields.get(&format!("{}Reason", field)))?
        .as_str()?;
    let reason = clean_reason(raw);
    if reason.is_none() {
        tracing::warn!("Dropped reason for {}", field);
    }
    reason
}

/// Truncate a narrative string and reject it if it carries suspicious content
pub fn clean_reason(raw: &str) -> Option<String> {
    let reason = truncate_chars(raw.trim(), MAX_REASON_CHARS).trim_end().to_string();
    if reason.is_empty() || is_suspicious(&reason) {
        return None;
    }
    Some(reason)
}

fn is_suspicious(text: &str) -> bool {
    SUSPICIOUS_CONTENT.is_match(text)
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
