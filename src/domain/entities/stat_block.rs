//! Character stat block entity

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::domain::value_objects::StatValue;

/// One validated stat with its optional narrative reason
#[derive(Debug, Clone, PartialEq)]
pub struct StatEntry {
    pub name: &'static str,
    pub value: StatValue,
    pub reason: Option<String>,
}

/// Validated character stats
///
/// Only built by the validator or the default provider, so every stat of the
/// character schema is present, in schema order, and inside its range.
/// Serializes as a flat JSON object where each `<stat>_reason` key directly
/// follows its stat.
#[derive(Debug, Clone, PartialEq)]
pub struct StatBlock {
    entries: Vec<StatEntry>,
}

impl StatBlock {
    pub(crate) fn from_entries(entries: Vec<StatEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[StatEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<StatValue> {
        self.entry(name).map(|e| e.value)
    }

    pub fn reason(&self, name: &str) -> Option<&str> {
        self.entry(name).and_then(|e| e.reason.as_deref())
    }

    fn entry(&self, name: &str) -> Option<&StatEntry> {
        self.entries.iter().find(|e| e.name == name)
    }
}

impl Serialize for StatBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let reasons = self.entries.iter().filter(|e| e.reason.is_some()).count();
        let mut map = serializer.serialize_map(Some(self.entries.len() + reasons))?;
        for entry in &self.entries {
            map.serialize_entry(entry.name, &entry.value)?;
            if let Some(reason) = &entry.reason {
                map.serialize_entry(&format!("{}_reason", entry.name), reason)?;
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_reason_after_its_stat() {
        let block = StatBlock::from_entries(vec![
            StatEntry {
                name: "hp",
                value: StatValue::Int(120),
                reason: Some("Built like a bear".to_string()),
            },
            StatEntry {
                name: "criticalChance",
                value: StatValue::Decimal(0.08),
                reason: None,
            },
        ]);

        let json = serde_json::to_string(&block).unwrap();
        assert_eq!(
            json,
            r#"{"hp":120,"hp_reason":"Built like a bear","criticalChance":0.08}"#
        );
        assert_eq!(block.get("hp"), Some(StatValue::Int(120)));
        assert_eq!(block.reason("hp"), Some("Built like a bear"));
        assert_eq!(block.reason("criticalChance"), None);
        assert_eq!(block.get("mana"), None);
    }
}
