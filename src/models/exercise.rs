use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::validation::ValidationErrors;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Exercise {
    pub id: Uuid,
    pub name: String,
    pub muscle_group: String,
    pub equipment: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateExercise {
    pub name: String,
    pub muscle_group: String,
    pub equipment: Option<String>,
    pub notes: Option<String>,
}

impl CreateExercise {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.name.trim().is_empty() {
            errors.add("name", "Name must not be empty");
        }
        if self.muscle_group.trim().is_empty() {
            errors.add("muscle_group", "Muscle group must not be empty");
        }
        errors.into_result()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateExercise {
    pub name: Option<String>,
    pub muscle_group: Option<String>,
    pub equipment: Option<String>,
    pub notes: Option<String>,
}

impl UpdateExercise {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                errors.add("name", "Name must not be empty");
            }
        }
        if let Some(muscle_group) = &self.muscle_group {
            if muscle_group.trim().is_empty() {
                errors.add("muscle_group", "Muscle group must not be empty");
            }
        }
        errors.into_result()
    }
}
