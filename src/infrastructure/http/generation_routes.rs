//! Stat generation API routes

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::{
    ApiResponseDto, CreateCharacterRequestDto, CreateEquipmentRequestDto, EquipmentResultDto,
    RequestError,
};
use crate::application::services::{GenerationError, ImageServiceError};
use crate::domain::entities::ValidatedBlock;
use crate::infrastructure::state::AppState;

type ApiFailure = (StatusCode, Json<ApiResponseDto<()>>);

fn failure(status: StatusCode, message: impl Into<String>) -> ApiFailure {
    (status, Json(ApiResponseDto::failure(message)))
}

fn bad_request(err: RequestError) -> ApiFailure {
    failure(StatusCode::BAD_REQUEST, err.to_string())
}

fn malformed_body(rejection: JsonRejection) -> ApiFailure {
    failure(StatusCode::BAD_REQUEST, rejection.body_text())
}

fn backend_failure(err: GenerationError) -> ApiFailure {
    failure(StatusCode::BAD_GATEWAY, err.to_string())
}

fn image_failure(err: ImageServiceError) -> ApiFailure {
    match err {
        ImageServiceError::Caption(e) => backend_failure(e),
        other => failure(StatusCode::SERVICE_UNAVAILABLE, other.to_string()),
    }
}

/// Generate a character stat block
pub async fn create_character(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateCharacterRequestDto>, JsonRejection>,
) -> Result<Json<ApiResponseDto<ValidatedBlock>>, ApiFailure> {
    let Json(req) = payload.map_err(malformed_body)?;
    let request = req.into_request().map_err(bad_request)?;

    let block = state
        .stat_service
        .generate(&request)
        .await
        .map_err(backend_failure)?;

    tracing::info!("Generated character stats for '{}'", request.name);
    Ok(Json(ApiResponseDto::success(block)))
}

/// Generate an equipment stat block together with its image
pub async fn create_equipment(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateEquipmentRequestDto>, JsonRejection>,
) -> Result<Json<ApiResponseDto<EquipmentResultDto>>, ApiFailure> {
    let Json(req) = payload.map_err(malformed_body)?;
    let request = req.into_request().map_err(bad_request)?;

    let (block, image_url) = tokio::join!(
        state.stat_service.generate(&request),
        state.image_service.generate(&request.description),
    );

    let image_url = image_url.map_err(image_failure)?;
    let block = block.map_err(backend_failure)?;

    tracing::info!(
        "Generated {} '{}' (image: {})",
        request.kind,
        request.name,
        image_url.as_deref().unwrap_or("none")
    );
    Ok(Json(ApiResponseDto::success(EquipmentResultDto {
        block,
        image_url,
    })))
}
