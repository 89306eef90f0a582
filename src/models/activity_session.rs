use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::validation::ValidationErrors;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "activity_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Stretching,
    Meditation,
    Cycling,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ActivitySession {
    pub id: Uuid,
    pub kind: ActivityKind,
    pub date: NaiveDate,
    pub duration_seconds: i32,
    pub distance_meters: Option<f64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateActivitySession {
    pub kind: ActivityKind,
    pub date: NaiveDate,
    pub duration_seconds: i32,
    pub distance_meters: Option<f64>,
    pub notes: Option<String>,
}

impl CreateActivitySession {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.duration_seconds <= 0 {
            errors.add("duration_seconds", "Duration must be positive");
        }
        if let Some(distance) = self.distance_meters {
            if distance < 0.0 || !distance.is_finite() {
                errors.add("distance_meters", "Distance must be a non-negative number");
            }
        }
        errors.into_result()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateActivitySession {
    pub date: Option<NaiveDate>,
    pub duration_seconds: Option<i32>,
    pub distance_meters: Option<f64>,
    pub notes: Option<String>,
}

impl UpdateActivitySession {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(duration) = self.duration_seconds {
            if duration <= 0 {
                errors.add("duration_seconds", "Duration must be positive");
            }
        }
        if let Some(distance) = self.distance_meters {
            if distance < 0.0 || !distance.is_finite() {
                errors.add("distance_meters", "Distance must be a non-negative number");
            }
        }
        errors.into_result()
    }
}

/// Per-kind totals over a date range.
#[derive(Debug, Serialize)]
pub struct ActivitySummary {
    pub kind: ActivityKind,
    pub session_count: i64,
    pub total_duration_seconds: i64,
    pub total_distance_meters: Option<f64>,
}
