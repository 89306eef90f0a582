use axum::{routing::get, Router};
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::activity_sessions::activity_session_routes;
use super::exercises::exercise_routes;
use super::health::health_check;
use super::meals::meal_routes;
use super::mesocycles::mesocycle_routes;
use super::plans::plan_routes;
use super::workouts::workout_routes;

pub fn create_routes(db: PgPool) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/exercises", exercise_routes(db.clone()))
        .nest("/api/plans", plan_routes(db.clone()))
        .nest("/api/mesocycles", mesocycle_routes(db.clone()))
        .nest("/api/workouts", workout_routes(db.clone()))
        .nest("/api/sessions", activity_session_routes(db.clone()))
        .nest("/api/meals", meal_routes(db))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
