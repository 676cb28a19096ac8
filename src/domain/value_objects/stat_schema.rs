//! Stat schema tables
//!
//! Every numeric field the engine emits is described by a [`FieldSpec`]: its wire
//! name, closed interval, precision and canonical default. The prompt compiler
//! renders these tables into the generation instruction and the validator enforces
//! them, so both always agree.

use serde::{Deserialize, Serialize};

/// Numeric precision of a stat field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    /// Whole numbers, fractional part discarded
    Integer,
    /// Fixed number of decimal places, rounded half away from zero
    Decimals(u32),
}

impl Precision {
    /// Human-readable label used in generation instructions
    pub fn describe(&self) -> String {
        match self {
            Self::Integer => "integer".to_string(),
            Self::Decimals(1) => "1 decimal".to_string(),
            Self::Decimals(places) => format!("{} decimals", places),
        }
    }

    fn format(&self, value: f64) -> String {
        match self {
            Self::Integer => format!("{}", value as i64),
            Self::Decimals(places) => format!("{:.*}", *places as usize, value),
        }
    }
}

/// A validated numeric value, tagged with the precision it was coerced to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Int(i64),
    Decimal(f64),
}

impl StatValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Int(v) => *v as f64,
            Self::Decimal(v) => *v,
        }
    }
}

/// Schema entry for one numeric field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub precision: Precision,
    pub default: f64,
}

impl FieldSpec {
    const fn new(name: &'static str, min: f64, max: f64, precision: Precision, default: f64) -> Self {
        Self {
            name,
            min,
            max,
            precision,
            default,
        }
    }

    /// Clamp into `[min, max]`, then apply the field's precision.
    pub fn clamp(&self, value: f64) -> StatValue {
        let bounded = value.clamp(self.min, self.max);
        match self.precision {
            Precision::Integer => StatValue::Int(bounded.trunc() as i64),
            Precision::Decimals(places) => {
                let factor = 10f64.powi(places as i32);
                // adding zero turns a rounded -0.0 into 0.0
                StatValue::Decimal((bounded * factor).round() / factor + 0.0)
            }
        }
    }

    /// The canonical fallback value, already in the field's precision
    pub fn default_value(&self) -> StatValue {
        self.clamp(self.default)
    }

    /// Coerce an untrusted JSON value into this field.
    ///
    /// Numbers and numeric strings are clamped; anything else (absent, boolean,
    /// non-finite, unparsable) yields the canonical default.
    pub fn coerce(&self, raw: Option<&serde_json::Value>) -> StatValue {
        match raw.and_then(coerce_number) {
            Some(value) => self.clamp(value),
            None => self.default_value(),
        }
    }

    /// Range row as rendered in generation instructions
    pub fn describe_range(&self) -> String {
        format!(
            "{}: {} ~ {} ({})",
            self.name,
            self.precision.format(self.min),
            self.precision.format(self.max),
            self.precision.describe()
        )
    }
}

fn coerce_number(value: &serde_json::Value) -> Option<f64> {
    let number = match value {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

/// Character stats, in emission order
pub const CHARACTER_STATS: [FieldSpec; 8] = [
    FieldSpec::new("hp", 50.0, 200.0, Precision::Integer, 100.0),
    FieldSpec::new("attack", 5.0, 25.0, Precision::Integer, 10.0),
    FieldSpec::new("defense", 3.0, 20.0, Precision::Integer, 8.0),
    FieldSpec::new("criticalChance", 0.01, 0.30, Precision::Decimals(2), 0.10),
    FieldSpec::new("criticalDamage", 1.2, 3.0, Precision::Decimals(1), 1.5),
    FieldSpec::new("speed", 10.0, 90.0, Precision::Integer, 50.0),
    FieldSpec::new("dodgeChance", 0.01, 0.25, Precision::Decimals(2), 0.05),
    FieldSpec::new("accuracy", 0.70, 0.98, Precision::Decimals(2), 0.85),
];

pub const EFFECT_CHANCE: FieldSpec = FieldSpec::new("chance", 0.0, 1.0, Precision::Decimals(2), 0.10);
pub const EFFECT_DURATION: FieldSpec = FieldSpec::new("duration", 1.0, 10.0, Precision::Integer, 2.0);
pub const EFFECT_BONUS_PER_TURN: FieldSpec =
    FieldSpec::new("bonusIncreasePerTurn", -20.0, 20.0, Precision::Decimals(2), 0.0);

/// Effect entry numeric fields, in emission order
pub const EFFECT_FIELDS: [FieldSpec; 3] = [EFFECT_CHANCE, EFFECT_DURATION, EFFECT_BONUS_PER_TURN];

/// Longest narrative string kept on any reason field
pub const MAX_REASON_CHARS: usize = 200;

/// Which stat an equipment bonus applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BonusType {
    HpBonus,
    AttackBonus,
    DefenseBonus,
    CriticalChanceBonus,
    CriticalDamageBonus,
    SpeedBonus,
    DodgeChanceBonus,
    AccuracyBonus,
}

impl BonusType {
    pub const ALL: [BonusType; 8] = [
        Self::HpBonus,
        Self::AttackBonus,
        Self::DefenseBonus,
        Self::CriticalChanceBonus,
        Self::CriticalDamageBonus,
        Self::SpeedBonus,
        Self::DodgeChanceBonus,
        Self::AccuracyBonus,
    ];

    /// Exact wire tag; no case folding
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|bonus| bonus.tag() == tag)
    }

    pub fn tag(&self) -> &'static str {
        self.spec().name
    }

    /// Range/precision row for `bonusValue` under this bonus type
    pub fn spec(&self) -> &'static FieldSpec {
        &BONUS_VALUES[*self as usize]
    }
}

/// Bonus value rows, indexed by `BonusType` discriminant
const BONUS_VALUES: [FieldSpec; 8] = [
    FieldSpec::new("hpBonus", 10.0, 60.0, Precision::Integer, 30.0),
    FieldSpec::new("attackBonus", 2.0, 8.0, Precision::Integer, 4.0),
    FieldSpec::new("defenseBonus", 1.0, 6.0, Precision::Integer, 3.0),
    FieldSpec::new("criticalChanceBonus", 0.01, 0.09, Precision::Decimals(2), 0.04),
    FieldSpec::new("criticalDamageBonus", 0.1, 0.6, Precision::Decimals(1), 0.3),
    FieldSpec::new("speedBonus", 3.0, 27.0, Precision::Integer, 12.0),
    FieldSpec::new("dodgeChanceBonus", 0.01, 0.08, Precision::Decimals(2), 0.03),
    FieldSpec::new("accuracyBonus", 0.01, 0.08, Precision::Decimals(2), 0.03),
];

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stat(name: &str) -> FieldSpec {
        *CHARACTER_STATS.iter().find(|s| s.name == name).unwrap()
    }

    #[test]
    fn test_clamp_to_bounds() {
        assert_eq!(stat("hp").clamp(999.0), StatValue::Int(200));
        assert_eq!(stat("attack").clamp(3.0), StatValue::Int(5));
        assert_eq!(stat("accuracy").clamp(0.1), StatValue::Decimal(0.7));
    }

    #[test]
    fn test_rounding_precision() {
        assert_eq!(stat("criticalChance").clamp(0.276), StatValue::Decimal(0.28));
        assert_eq!(stat("criticalDamage").clamp(2.97), StatValue::Decimal(3.0));
        assert_eq!(stat("speed").clamp(42.9), StatValue::Int(42));
    }

    #[test]
    fn test_rounding_to_zero_is_unsigned() {
        let value = EFFECT_BONUS_PER_TURN.clamp(-0.001);
        match value {
            StatValue::Decimal(v) => assert!(v.is_sign_positive()),
            other => panic!("Expected decimal, got {:?}", other),
        }
        assert_eq!(serde_json::to_string(&value).unwrap(), "0.0");
        assert_eq!(serde_json::to_string(&EFFECT_BONUS_PER_TURN.clamp(-0.0)).unwrap(), "0.0");
    }

    #[test]
    fn test_coerce_falls_back_to_default() {
        let hp = stat("hp");
        assert_eq!(hp.coerce(None), StatValue::Int(100));
        assert_eq!(hp.coerce(Some(&json!("lots"))), StatValue::Int(100));
        assert_eq!(hp.coerce(Some(&json!(true))), StatValue::Int(100));
        assert_eq!(hp.coerce(Some(&json!(null))), StatValue::Int(100));
        assert_eq!(hp.coerce(Some(&json!("inf"))), StatValue::Int(100));
        assert_eq!(hp.coerce(Some(&json!(" 120 "))), StatValue::Int(120));
    }

    #[test]
    fn test_defaults_lie_inside_ranges() {
        let all = CHARACTER_STATS
            .iter()
            .chain(BONUS_VALUES.iter())
            .chain(EFFECT_FIELDS.iter());
        for spec in all {
            assert!(spec.default >= spec.min && spec.default <= spec.max, "{}", spec.name);
        }
    }

    #[test]
    fn test_bonus_type_tags_match_table() {
        for bonus in BonusType::ALL {
            assert_eq!(BonusType::from_tag(bonus.tag()), Some(bonus));
            let json = serde_json::to_value(bonus).unwrap();
            assert_eq!(json, json!(bonus.tag()));
        }
        assert_eq!(BonusType::from_tag("AttackBonus"), None);
        assert_eq!(BonusType::AttackBonus.spec().clamp(999.0), StatValue::Int(8));
    }

    #[test]
    fn test_describe_range() {
        assert_eq!(stat("hp").describe_range(), "hp: 50 ~ 200 (integer)");
        assert_eq!(
            stat("criticalChance").describe_range(),
            "criticalChance: 0.01 ~ 0.30 (2 decimals)"
        );
        assert_eq!(
            stat("criticalDamage").describe_range(),
            "criticalDamage: 1.2 ~ 3.0 (1 decimal)"
        );
    }
}
