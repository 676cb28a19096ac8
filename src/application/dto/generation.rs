use serde::{Deserialize, Serialize};

use crate::domain::entities::ValidatedBlock;
use crate::domain::value_objects::{EquipmentSlot, GenerationRequest, UnknownSlot};

/// Body of `POST /api/characters`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCharacterRequestDto {
    #[serde(default)]
    pub character_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateCharacterRequestDto {
    pub fn into_request(self) -> Result<GenerationRequest, RequestError> {
        let description = require(self.description, "description")?;
        Ok(GenerationRequest::character(
            self.character_name.unwrap_or_default(),
            description,
        ))
    }
}

/// Body of `POST /api/equipments`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEquipmentRequestDto {
    #[serde(default)]
    pub equipment_type: Option<String>,
    #[serde(default)]
    pub equipment_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateEquipmentRequestDto {
    pub fn into_request(self) -> Result<GenerationRequest, RequestError> {
        let slot: EquipmentSlot = require(self.equipment_type, "equipmentType")?.parse()?;
        let description = require(self.description, "description")?;
        Ok(GenerationRequest::equipment(
            slot,
            self.equipment_name.unwrap_or_default(),
            description,
        ))
    }
}

fn require(value: Option<String>, field: &'static str) -> Result<String, RequestError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(RequestError::MissingField(field))
}

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error(transparent)]
    InvalidSlot(#[from] UnknownSlot),
}

/// Envelope wrapping every API reply
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponseDto<T: Serialize> {
    pub is_success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponseDto<T> {
    pub fn success(result: T) -> Self {
        Self {
            is_success: true,
            result: Some(result),
            message: None,
        }
    }
}

impl ApiResponseDto<()> {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            is_success: false,
            result: None,
            message: Some(message.into()),
        }
    }
}

/// Equipment stats plus the published image, `imageUrl` is always present
#[derive(Debug, Serialize)]
pub struct EquipmentResultDto {
    #[serde(flatten)]
    pub block: ValidatedBlock,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::stat_validator::default_equipment_block;
    use crate::domain::value_objects::SubjectKind;

    #[test]
    fn test_character_request() {
        let dto: CreateCharacterRequestDto =
            serde_json::from_str(r#"{"characterName": "Ella", "description": "A rogue"}"#).unwrap();
        let request = dto.into_request().unwrap();
        assert_eq!(request.kind, SubjectKind::Character);
        assert_eq!(request.name, "Ella");

        let dto: CreateCharacterRequestDto = serde_json::from_str(r#"{"description": "A monk"}"#).unwrap();
        assert_eq!(dto.into_request().unwrap().name, "");
    }

    #[test]
    fn test_missing_description() {
        let dto: CreateCharacterRequestDto =
            serde_json::from_str(r#"{"characterName": "Ella", "description": "  "}"#).unwrap();
        assert!(matches!(dto.into_request(), Err(RequestError::MissingField("description"))));
    }

    #[test]
    fn test_equipment_request_slots() {
        let dto: CreateEquipmentRequestDto = serde_json::from_str(
            r#"{"equipmentType": " Shoes ", "equipmentName": "Wind Boots", "description": "Light"}"#,
        )
        .unwrap();
        let request = dto.into_request().unwrap();
        assert_eq!(request.kind, SubjectKind::Equipment(EquipmentSlot::Shoes));

        let dto: CreateEquipmentRequestDto =
            serde_json::from_str(r#"{"equipmentType": "ring", "description": "Shiny"}"#).unwrap();
        let err = dto.into_request().unwrap_err();
        assert!(matches!(err, RequestError::InvalidSlot(_)));
        assert_eq!(err.to_string(), "'ring' is not a valid equipment slot");

        let dto: CreateEquipmentRequestDto = serde_json::from_str(r#"{"description": "Shiny"}"#).unwrap();
        assert!(matches!(dto.into_request(), Err(RequestError::MissingField("equipmentType"))));
    }

    #[test]
    fn test_envelopes() {
        let failure = serde_json::to_string(&ApiResponseDto::<()>::failure("description is required")).unwrap();
        assert_eq!(failure, r#"{"isSuccess":false,"message":"description is required"}"#);

        let result = EquipmentResultDto {
            block: ValidatedBlock::Equipment(default_equipment_block(EquipmentSlot::Hat)),
            image_url: None,
        };
        let json = serde_json::to_string(&ApiResponseDto::success(result)).unwrap();
        assert!(json.starts_with(r#"{"isSuccess":true,"result":{"bonusType":"hpBonus""#));
        assert!(json.ends_with(r#""imageUrl":null}}"#));
    }
}
