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

use crate::models::{CreateMeal, Meal, UpdateMeal};
use crate::services::{MealService, ServiceError};

#[derive(Clone)]
pub struct AppState {
    pub meal_service: MealService,
}

pub fn meal_routes(db: PgPool) -> Router {
    let state = AppState {
        meal_service: MealService::new(db),
    };

    Router::new()
        .route("/", get(list_meals).post(create_meal))
        .route("/:meal_id", get(get_meal).put(update_meal).delete(delete_meal))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct MealListQuery {
    /// Only meals planned for this date
    pub date: Option<NaiveDate>,
}

pub async fn create_meal(
    State(state): State<AppState>,
    Json(payload): Json<CreateMeal>,
) -> Result<(StatusCode, Json<Meal>), ServiceError> {
    let meal = state.meal_service.create_meal(payload).await?;
    Ok((StatusCode::CREATED, Json(meal)))
}

pub async fn list_meals(
    State(state): State<AppState>,
    Query(query): Query<MealListQuery>,
) -> Result<Json<Vec<Meal>>, ServiceError> {
    let meals = state.meal_service.list_meals(query.date).await?;
    Ok(Json(meals))
}

pub async fn get_meal(
    State(state): State<AppState>,
    Path(meal_id): Path<Uuid>,
) -> Result<Json<Meal>, ServiceError> {
    let meal = state
        .meal_service
        .get_meal_by_id(meal_id)
        .await?
        .ok_or(ServiceError::NotFound("Meal"))?;
    Ok(Json(meal))
}

pub async fn update_meal(
    State(state): State<AppState>,
    Path(meal_id): Path<Uuid>,
    Json(payload): Json<UpdateMeal>,
) -> Result<Json<Meal>, ServiceError> {
    let meal = state.meal_service.update_meal(meal_id, payload).await?;
    Ok(Json(meal))
}

pub async fn delete_meal(
    State(state): State<AppState>,
    Path(meal_id): Path<Uuid>,
) -> Result<StatusCode, ServiceError> {
    let deleted = state.meal_service.delete_meal(meal_id).await?;
    if !deleted {
        return Err(ServiceError::NotFound("Meal"));
    }
    Ok(StatusCode::NO_CONTENT)
}
