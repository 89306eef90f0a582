use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{LogSet, Workout, WorkoutDetail, WorkoutSet};
use crate::services::{ServiceError, WorkoutService};

#[derive(Clone)]
pub struct AppState {
    pub workout_service: WorkoutService,
}

pub fn workout_routes(db: PgPool) -> Router {
    let state = AppState {
        workout_service: WorkoutService::new(db),
    };

    Router::new()
        .route("/next", get(next_workout))
        .route("/:workout_id", get(get_workout))
        .route("/:workout_id/complete", post(complete_workout))
        .route("/sets/:set_id/log", post(log_set))
        .with_state(state)
}

/// The next unfinished workout across active blocks, if any.
pub async fn next_workout(
    State(state): State<AppState>,
) -> Result<Json<Option<WorkoutDetail>>, ServiceError> {
    let workout = state.workout_service.next_pending().await?;
    Ok(Json(workout))
}

pub async fn get_workout(
    State(state): State<AppState>,
    Path(workout_id): Path<Uuid>,
) -> Result<Json<WorkoutDetail>, ServiceError> {
    let workout = state
        .workout_service
        .get_workout_detail(workout_id)
        .await?
        .ok_or(ServiceError::NotFound("Workout"))?;
    Ok(Json(workout))
}

pub async fn complete_workout(
    State(state): State<AppState>,
    Path(workout_id): Path<Uuid>,
) -> Result<Json<Workout>, ServiceError> {
    let workout = state.workout_service.complete_workout(workout_id).await?;
    Ok(Json(workout))
}

pub async fn log_set(
    State(state): State<AppState>,
    Path(set_id): Path<Uuid>,
    Json(payload): Json<LogSet>,
) -> Result<Json<WorkoutSet>, ServiceError> {
    let set = state.workout_service.log_set(set_id, payload).await?;
    Ok(Json(set))
}
