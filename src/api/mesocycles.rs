use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch},
    Router,
};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{
    GenerateMesocycle, GeneratedMesocycle, Mesocycle, UpdateMesocycleStatus, ValidationErrors,
    Workout,
};
use crate::services::progression::MESOCYCLE_WEEKS;
use crate::services::{MesocycleService, ServiceError, WorkoutService};

#[derive(Clone)]
pub struct AppState {
    pub mesocycle_service: MesocycleService,
    pub workout_service: WorkoutService,
}

pub fn mesocycle_routes(db: PgPool) -> Router {
    let state = AppState {
        mesocycle_service: MesocycleService::new(db.clone()),
        workout_service: WorkoutService::new(db),
    };

    Router::new()
        .route("/", get(list_mesocycles).post(generate_mesocycle))
        .route("/:mesocycle_id", get(get_mesocycle).delete(delete_mesocycle))
        .route("/:mesocycle_id/status", patch(update_status))
        .route("/:mesocycle_id/workouts", get(list_workouts))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct WorkoutListQuery {
    /// Restrict to one week of the block (1-based)
    pub week: Option<i16>,
}

impl WorkoutListQuery {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(week) = self.week {
            if !(1..=MESOCYCLE_WEEKS).contains(&week) {
                errors.add(
                    "week",
                    &format!("Week must be between 1 and {}", MESOCYCLE_WEEKS),
                );
            }
        }
        errors.into_result()
    }
}

/// Generate the full training block for a plan.
pub async fn generate_mesocycle(
    State(state): State<AppState>,
    Json(payload): Json<GenerateMesocycle>,
) -> Result<(StatusCode, Json<GeneratedMesocycle>), ServiceError> {
    let generated = state.mesocycle_service.generate(payload).await?;
    Ok((StatusCode::CREATED, Json(generated)))
}

pub async fn list_mesocycles(
    State(state): State<AppState>,
) -> Result<Json<Vec<Mesocycle>>, ServiceError> {
    let mesocycles = state.mesocycle_service.list().await?;
    Ok(Json(mesocycles))
}

pub async fn get_mesocycle(
    State(state): State<AppState>,
    Path(mesocycle_id): Path<Uuid>,
) -> Result<Json<Mesocycle>, ServiceError> {
    let mesocycle = state
        .mesocycle_service
        .get_by_id(mesocycle_id)
        .await?
        .ok_or(ServiceError::NotFound("Mesocycle"))?;
    Ok(Json(mesocycle))
}

pub async fn update_status(
    State(state): State<AppState>,
    Path(mesocycle_id): Path<Uuid>,
    Json(payload): Json<UpdateMesocycleStatus>,
) -> Result<Json<Mesocycle>, ServiceError> {
    let mesocycle = state
        .mesocycle_service
        .update_status(mesocycle_id, payload)
        .await?;
    Ok(Json(mesocycle))
}

pub async fn delete_mesocycle(
    State(state): State<AppState>,
    Path(mesocycle_id): Path<Uuid>,
) -> Result<StatusCode, ServiceError> {
    let deleted = state.mesocycle_service.delete(mesocycle_id).await?;
    if !deleted {
        return Err(ServiceError::NotFound("Mesocycle"));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_workouts(
    State(state): State<AppState>,
    Path(mesocycle_id): Path<Uuid>,
    Query(query): Query<WorkoutListQuery>,
) -> Result<Json<Vec<Workout>>, ServiceError> {
    query.validate()?;

    // 404 before an empty list for an unknown block
    state
        .mesocycle_service
        .get_by_id(mesocycle_id)
        .await?
        .ok_or(ServiceError::NotFound("Mesocycle"))?;

    let workouts = state
        .workout_service
        .list_for_mesocycle(mesocycle_id, query.week)
        .await?;
    Ok(Json(workouts))
}
