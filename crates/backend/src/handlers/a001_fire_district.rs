use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use contracts::domain::a001_fire_district::aggregate::{DistrictDraft, DistrictListItem};
use contracts::domain::a001_fire_district::export::ExportFormat;
use contracts::shared::api_error::{ApiErrorBody, SaveDistrictResponse};

use crate::domain::a001_fire_district::export::ExportError;
use crate::domain::a001_fire_district::service::{self, ServiceError};
use crate::shared::app_state::AppState;

/// Error response: status plus `{"error": "..."}` with the message verbatim
pub struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.0, Json(ApiErrorBody::new(self.1))).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        let status = match &e {
            ServiceError::Store(_) => StatusCode::BAD_GATEWAY,
            ServiceError::Export(ExportError::InvalidGeometry(_)) => StatusCode::BAD_REQUEST,
            ServiceError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        };
        ApiError(status, e.to_string())
    }
}

/// GET /api/fire_district
pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<DistrictListItem>>, ApiError> {
    let rows = service::list(&state.store).await?;
    Ok(Json(rows))
}

/// POST /api/fire_district
pub async fn save(
    State(state): State<AppState>,
    Json(draft): Json<DistrictDraft>,
) -> Result<Json<SaveDistrictResponse>, ApiError> {
    let id = service::save(&state.store, draft).await?;
    Ok(Json(SaveDistrictResponse { id }))
}

/// DELETE /api/fire_district/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    service::delete(&state.store, &id).await?;
    Ok(StatusCode::OK)
}

/// POST /api/fire_district/export/:format
pub async fn export(
    Path(format): Path<String>,
    Json(draft): Json<DistrictDraft>,
) -> Result<Response, ApiError> {
    let format = ExportFormat::from_code(&format).ok_or_else(|| {
        ApiError(
            StatusCode::BAD_REQUEST,
            format!("Unknown export format '{}'", format),
        )
    })?;

    let file = service::export_district(&draft, format)?;
    let disposition = format!("attachment; filename=\"{}\"", file.file_name);

    Ok((
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.bytes,
    )
        .into_response())
}
