use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{CreateExercise, Exercise, UpdateExercise};
use crate::services::{ExerciseService, ServiceError};

#[derive(Clone)]
pub struct AppState {
    pub exercise_service: ExerciseService,
}

pub fn exercise_routes(db: PgPool) -> Router {
    let state = AppState {
        exercise_service: ExerciseService::new(db),
    };

    Router::new()
        .route("/", get(list_exercises).post(create_exercise))
        .route(
            "/:exercise_id",
            get(get_exercise).put(update_exercise).delete(delete_exercise),
        )
        .with_state(state)
}

pub async fn create_exercise(
    State(state): State<AppState>,
    Json(payload): Json<CreateExercise>,
) -> Result<(StatusCode, Json<Exercise>), ServiceError> {
    let exercise = state.exercise_service.create_exercise(payload).await?;
    Ok((StatusCode::CREATED, Json(exercise)))
}

pub async fn list_exercises(
    State(state): State<AppState>,
) -> Result<Json<Vec<Exercise>>, ServiceError> {
    let exercises = state.exercise_service.list_exercises().await?;
    Ok(Json(exercises))
}

pub async fn get_exercise(
    State(state): State<AppState>,
    Path(exercise_id): Path<Uuid>,
) -> Result<Json<Exercise>, ServiceError> {
    let exercise = state
        .exercise_service
        .get_exercise_by_id(exercise_id)
        .await?
        .ok_or(ServiceError::NotFound("Exercise"))?;
    Ok(Json(exercise))
}

pub async fn update_exercise(
    State(state): State<AppState>,
    Path(exercise_id): Path<Uuid>,
    Json(payload): Json<UpdateExercise>,
) -> Result<Json<Exercise>, ServiceError> {
    let exercise = state
        .exercise_service
        .update_exercise(exercise_id, payload)
        .await?;
    Ok(Json(exercise))
}

pub async fn delete_exercise(
    State(state): State<AppState>,
    Path(exercise_id): Path<Uuid>,
) -> Result<StatusCode, ServiceError> {
    let deleted = state.exercise_service.delete_exercise(exercise_id).await?;
    if !deleted {
        return Err(ServiceError::NotFound("Exercise"));
    }
    Ok(StatusCode::NO_CONTENT)
}
