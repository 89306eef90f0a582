use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::models::ValidationErrors;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),
    #[error("Exercise is referenced by a plan or workout")]
    ExerciseInUse,
    #[error("Plan is referenced by a mesocycle")]
    PlanInUse,
    #[error("Exercise name already exists")]
    DuplicateExerciseName,
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        ServiceError::Validation(errors)
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ServiceError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "not_found",
                    "message": format!("{} not found", resource),
                }),
            ),
            ServiceError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_failed",
                    "message": self.to_string(),
                    "fields": errors.fields,
                }),
            ),
            ServiceError::ExerciseInUse
            | ServiceError::PlanInUse
            | ServiceError::DuplicateExerciseName => (
                StatusCode::CONFLICT,
                json!({
                    "error": "conflict",
                    "message": self.to_string(),
                }),
            ),
            ServiceError::Database(err) => {
                error!("database error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "Internal server error",
                    }),
                )
            }
            ServiceError::Internal(err) => {
                error!("internal error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "Internal server error",
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
