use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{CreatePlan, Plan, PlanDetail, UpdatePlan};
use crate::services::{PlanService, ServiceError};

#[derive(Clone)]
pub struct AppState {
    pub plan_service: PlanService,
}

pub fn plan_routes(db: PgPool) -> Router {
    let state = AppState {
        plan_service: PlanService::new(db),
    };

    Router::new()
        .route("/", get(list_plans).post(create_plan))
        .route("/:plan_id", get(get_plan).put(update_plan).delete(delete_plan))
        .with_state(state)
}

pub async fn create_plan(
    State(state): State<AppState>,
    Json(payload): Json<CreatePlan>,
) -> Result<(StatusCode, Json<PlanDetail>), ServiceError> {
    let plan = state.plan_service.create_plan(payload).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

pub async fn list_plans(State(state): State<AppState>) -> Result<Json<Vec<Plan>>, ServiceError> {
    let plans = state.plan_service.list_plans().await?;
    Ok(Json(plans))
}

pub async fn get_plan(
    State(state): State<AppState>,
    Path(plan_id): Path<Uuid>,
) -> Result<Json<PlanDetail>, ServiceError> {
    let plan = state
        .plan_service
        .get_plan_detail(plan_id)
        .await?
        .ok_or(ServiceError::NotFound("Plan"))?;
    Ok(Json(plan))
}

pub async fn update_plan(
    State(state): State<AppState>,
    Path(plan_id): Path<Uuid>,
    Json(payload): Json<UpdatePlan>,
) -> Result<Json<Plan>, ServiceError> {
    let plan = state.plan_service.update_plan(plan_id, payload).await?;
    Ok(Json(plan))
}

pub async fn delete_plan(
    State(state): State<AppState>,
    Path(plan_id): Path<Uuid>,
) -> Result<StatusCode, ServiceError> {
    let deleted = state.plan_service.delete_plan(plan_id).await?;
    if !deleted {
        return Err(ServiceError::NotFound("Plan"));
    }
    Ok(StatusCode::NO_CONTENT)
}
