use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{
    ActivityKind, ActivitySession, ActivitySummary, CreateActivitySession, UpdateActivitySession,
    ValidationErrors,
};
use crate::services::{ActivitySessionService, ServiceError};

#[derive(Clone)]
pub struct AppState {
    pub session_service: ActivitySessionService,
}

pub fn activity_session_routes(db: PgPool) -> Router {
    let state = AppState {
        session_service: ActivitySessionService::new(db),
    };

    Router::new()
        .route("/", get(list_sessions).post(create_session))
        .route("/summary", get(get_summary))
        .route(
            "/:session_id",
            get(get_session).put(update_session).delete(delete_session),
        )
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct SessionListQuery {
    pub kind: Option<ActivityKind>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl SessionListQuery {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if start > end {
                errors.add("start", "Start date must not be after end date");
            }
        }
        errors.into_result()
    }
}

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

pub async fn create_session(
    State(state): State<AppState>,
    Json(payload): Json<CreateActivitySession>,
) -> Result<(StatusCode, Json<ActivitySession>), ServiceError> {
    let session = state.session_service.create_session(payload).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

pub async fn list_sessions(
    State(state): State<AppState>,
    Query(query): Query<SessionListQuery>,
) -> Result<Json<Vec<ActivitySession>>, ServiceError> {
    query.validate()?;
    let sessions = state
        .session_service
        .list_sessions(query.kind, query.start, query.end)
        .await?;
    Ok(Json(sessions))
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ActivitySession>, ServiceError> {
    let session = state
        .session_service
        .get_session_by_id(session_id)
        .await?
        .ok_or(ServiceError::NotFound("Activity session"))?;
    Ok(Json(session))
}

pub async fn update_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<UpdateActivitySession>,
) -> Result<Json<ActivitySession>, ServiceError> {
    let session = state
        .session_service
        .update_session(session_id, payload)
        .await?;
    Ok(Json(session))
}

pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, ServiceError> {
    let deleted = state.session_service.delete_session(session_id).await?;
    if !deleted {
        return Err(ServiceError::NotFound("Activity session"));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<Vec<ActivitySummary>>, ServiceError> {
    let summary = state
        .session_service
        .get_summary(query.start, query.end)
        .await?;
    Ok(Json(summary))
}
