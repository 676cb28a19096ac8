//! Prompt building functions for LLM requests
//!
//! Everything here is a pure function of its inputs: the same sanitized fields
//! always produce the same instruction, byte for byte.

use crate::application::services::input_sanitizer::SanitizedInput;
use crate::domain::value_objects::{
    BonusType, EquipmentSlot, SubjectKind, CHARACTER_STATS, EFFECT_FIELDS, MAX_REASON_CHARS,
};

const CHARACTER_EXAMPLE: &str = r#"{
  "hp": 120,
  "hp_reason": "Built like a giant bear, there is no way this one falls easily!",
  "attack": 10,
  "defense": 8,
  "criticalChance": 0.08,
  "criticalDamage": 1.4,
  "speed": 30,
  "speed_reason": "Not the quick type. Heavy and steady~",
  "dodgeChance": 0.04,
  "accuracy": 0.88
}"#;

const EQUIPMENT_EXAMPLE: &str = r#"{
  "bonusType": "attackBonus",
  "bonusType_reason": "One look at that edge and you already feel the cut.",
  "bonusValue": 3,
  "effects": [
    {
      "type": "poison",
      "type_reason": "Poison? Whoever gets hit is in for a rough time.",
      "chance": 0.25,
      "duration": 3,
      "bonusIncreasePerTurn": 5
    }
  ]
}"#;

/// Render the generation instruction for one subject
pub fn compile(kind: SubjectKind, input: &SanitizedInput) -> String {
    match kind {
        SubjectKind::Character => build_character_prompt(input),
        SubjectKind::Equipment(slot) => build_equipment_prompt(slot, input),
    }
}

fn build_character_prompt(input: &SanitizedInput) -> String {
    let mut prompt = String::new();

    prompt.push_str("You are an RPG character stat generator.\n\n");
    prompt.push_str(
        "Read the character the user describes and estimate each stat below as a number \
         that fits the description as reasonably as possible.\n",
    );
    push_reason_rules(&mut prompt, "stat", "\"hp_reason\"");

    prompt.push_str("\nRequired keys and allowed ranges (inclusive):\n");
    for spec in &CHARACTER_STATS {
        prompt.push_str(&format!("- {}\n", spec.describe_range()));
    }

    prompt.push_str("\nExample output:\n");
    prompt.push_str(CHARACTER_EXAMPLE);
    prompt.push_str("\n\n");

    push_subject(&mut prompt, "Character", input);
    push_closing_rules(&mut prompt);
    prompt
}

fn build_equipment_prompt(slot: EquipmentSlot, input: &SanitizedInput) -> String {
    let mut prompt = String::new();

    prompt.push_str(&format!(
        "You are an RPG equipment stat generator. The item is a {}.\n\n",
        slot.display_noun()
    ));
    prompt.push_str(&format!(
        "Read the {} the user describes, decide its bonusType, bonusValue and effects yourself, \
         and output them in exactly the JSON format of the example.\n",
        slot.display_noun()
    ));
    push_reason_rules(&mut prompt, "field", "\"bonusType_reason\" or \"type_reason\"");

    prompt.push_str("\nbonusType must be exactly one of these 8 tags, and bonusValue must stay inside the range of the chosen tag (inclusive):\n");
    for bonus in BonusType::ALL {
        prompt.push_str(&format!("- {}\n", bonus.spec().describe_range()));
    }

    prompt.push_str("\nEach entry of \"effects\" has these keys:\n");
    prompt.push_str("- type: a short effect tag such as poison, burn, stun or regen\n");
    for spec in &EFFECT_FIELDS {
        prompt.push_str(&format!("- {}\n", spec.describe_range()));
    }
    prompt.push_str("The effects array may be empty.\n");

    prompt.push_str("\nExample output:\n");
    prompt.push_str(EQUIPMENT_EXAMPLE);
    prompt.push_str("\n\n");

    let label = capitalize(slot.as_str());
    push_subject(&mut prompt, &label, input);
    push_closing_rules(&mut prompt);
    prompt
}

/// Instruction for the image captioning bridge
pub fn build_caption_prompt(description: &str) -> String {
    let mut prompt = String::new();
    prompt.push_str(
        "Translate the following fantasy RPG equipment description into natural English \
         that can be used directly as an image-generation prompt.\n",
    );
    prompt.push_str("If the description is already in English, return it unchanged.\n");
    prompt.push_str("Keep the fantasy equipment framing. Output only the resulting text on a single line, with no quotes, labels or explanations.\n\n");
    prompt.push_str(&format!("Description: {}\n", description));
    prompt
}

fn push_reason_rules(prompt: &mut String, noun: &str, example_key: &str) {
    prompt.push_str(&format!(
        "Only for a {noun} the description specially emphasizes, or that is closely tied to its \
         impression (e.g. \"incredibly strong\", \"blazing fast\", \"deadly\"), add a reason key such as \
         {example_key} with a short line of impression, admiration or imagery.\n"
    ));
    prompt.push_str(&format!(
        "Every other {noun} gets only its value, with no reason.\n"
    ));
    prompt.push_str(&format!(
        "Never write numeric grounds or analytical sentences in a reason; keep it about feeling, \
         at most {} characters.\n",
        MAX_REASON_CHARS
    ));
}

fn push_subject(prompt: &mut String, label: &str, input: &SanitizedInput) {
    prompt.push_str(&format!("{} name: {}\n", label, input.name));
    prompt.push_str(&format!("{} description: {}\n\n", label, input.description));
}

fn push_closing_rules(prompt: &mut String) {
    prompt.push_str("Important:\n");
    prompt.push_str("- Output the JSON object only. No explanation, commentary or code fences.\n");
    prompt.push_str("- Key names and structure must match the example exactly; do not add other keys.\n");
    prompt.push_str("- Always write numbers with the precision listed above.\n");
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> SanitizedInput {
        SanitizedInput {
            name: "Ella".to_string(),
            description: "A brave and quick rogue".to_string(),
        }
    }

    #[test]
    fn test_character_prompt_lists_every_range() {
        let prompt = compile(SubjectKind::Character, &input());

        assert!(prompt.starts_with("You are an RPG character stat generator."));
        assert!(prompt.contains("- hp: 50 ~ 200 (integer)\n"));
        assert!(prompt.contains("- criticalChance: 0.01 ~ 0.30 (2 decimals)\n"));
        assert!(prompt.contains("- criticalDamage: 1.2 ~ 3.0 (1 decimal)\n"));
        assert!(prompt.contains("- accuracy: 0.70 ~ 0.98 (2 decimals)\n"));
        assert!(prompt.contains("Character name: Ella\n"));
        assert!(prompt.contains("Character description: A brave and quick rogue\n"));
        assert!(prompt.trim_end().ends_with("listed above."));
    }

    #[test]
    fn test_equipment_prompt_lists_bonus_table() {
        let prompt = compile(SubjectKind::Equipment(EquipmentSlot::Shoes), &input());

        assert!(prompt.starts_with("You are an RPG equipment stat generator. The item is a pair of shoes."));
        for bonus in BonusType::ALL {
            assert!(prompt.contains(&format!("- {}: ", bonus.tag())));
        }
        assert!(prompt.contains("- attackBonus: 2 ~ 8 (integer)\n"));
        assert!(prompt.contains("- criticalDamageBonus: 0.1 ~ 0.6 (1 decimal)\n"));
        assert!(prompt.contains("- duration: 1 ~ 10 (integer)\n"));
        assert!(prompt.contains("Shoes name: Ella\n"));
        assert!(prompt.contains("JSON object only"));
    }

    #[test]
    fn test_compile_is_deterministic() {
        let kind = SubjectKind::Equipment(EquipmentSlot::Weapon);
        assert_eq!(compile(kind, &input()), compile(kind, &input()));
        assert_eq!(
            compile(SubjectKind::Character, &input()),
            compile(SubjectKind::Character, &input())
        );
    }

    #[test]
    fn test_caption_prompt() {
        let prompt = build_caption_prompt("불타는 장검");
        assert!(prompt.contains("already in English, return it unchanged"));
        assert!(prompt.ends_with("Description: 불타는 장검\n"));
    }
}
