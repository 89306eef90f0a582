use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::validation::ValidationErrors;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "mesocycle_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MesocycleStatus {
    Active,
    Completed,
    Archived,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Mesocycle {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub weeks: i16,
    pub status: MesocycleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Workout {
    pub id: Uuid,
    pub mesocycle_id: Uuid,
    pub plan_day_id: Uuid,
    pub week: i16,
    pub scheduled_date: NaiveDate,
    pub deload: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkoutSet {
    pub id: Uuid,
    pub workout_id: Uuid,
    pub exercise_id: Uuid,
    pub set_number: i16,
    pub target_reps: i16,
    pub target_weight: f64,
    pub actual_reps: Option<i16>,
    pub actual_weight: Option<f64>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// A workout joined with its sets, ordered by exercise then set number.
#[derive(Debug, Clone, Serialize)]
pub struct WorkoutDetail {
    #[serde(flatten)]
    pub workout: Workout,
    pub sets: Vec<WorkoutSet>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateMesocycle {
    pub plan_id: Uuid,
    pub name: String,
    /// First day of week 1. Must fall on a Monday so day-of-week offsets
    /// line up with the plan's days.
    pub start_date: NaiveDate,
}

impl GenerateMesocycle {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.name.trim().is_empty() {
            errors.add("name", "Name must not be empty");
        }
        if self.start_date.weekday() != Weekday::Mon {
            errors.add("start_date", "Start date must be a Monday");
        }
        errors.into_result()
    }
}

/// Returned after a block is generated, with counts of what was written.
#[derive(Debug, Serialize)]
pub struct GeneratedMesocycle {
    #[serde(flatten)]
    pub mesocycle: Mesocycle,
    pub workout_count: usize,
    pub set_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateMesocycleStatus {
    pub status: MesocycleStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogSet {
    pub actual_reps: i16,
    pub actual_weight: f64,
}

impl LogSet {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.actual_reps < 0 {
            errors.add("actual_reps", "Reps must be non-negative");
        }
        if self.actual_weight < 0.0 || !self.actual_weight.is_finite() {
            errors.add("actual_weight", "Weight must be a non-negative number");
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_request_requires_monday_start() {
        let request = GenerateMesocycle {
            plan_id: Uuid::new_v4(),
            name: "Block 1".to_string(),
            // 2024-01-02 is a Tuesday
            start_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        };

        let errors = request.validate().unwrap_err();
        assert!(errors.fields.iter().any(|e| e.field == "start_date"));

        let request = GenerateMesocycle {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            ..request
        };
        assert!(request.validate().is_ok());
    }
}
