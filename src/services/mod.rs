// Business logic services

pub mod activity_session_service;
pub mod errors;
pub mod exercise_service;
pub mod meal_service;
pub mod mesocycle_service;
pub mod plan_service;
pub mod progression;
pub mod workout_service;

pub use activity_session_service::ActivitySessionService;
pub use errors::ServiceError;
pub use exercise_service::ExerciseService;
pub use meal_service::MealService;
pub use mesocycle_service::MesocycleService;
pub use plan_service::PlanService;
pub use workout_service::WorkoutService;
