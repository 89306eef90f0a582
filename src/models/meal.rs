use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::validation::ValidationErrors;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Meal {
    pub id: Uuid,
    pub name: String,
    pub planned_date: Option<NaiveDate>,
    pub calories: Option<i32>,
    pub protein_grams: Option<i32>,
    pub carbs_grams: Option<i32>,
    pub fat_grams: Option<i32>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateMeal {
    pub name: String,
    pub planned_date: Option<NaiveDate>,
    pub calories: Option<i32>,
    pub protein_grams: Option<i32>,
    pub carbs_grams: Option<i32>,
    pub fat_grams: Option<i32>,
    pub notes: Option<String>,
}

impl CreateMeal {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.name.trim().is_empty() {
            errors.add("name", "Name must not be empty");
        }
        for (field, value) in [
            ("calories", self.calories),
            ("protein_grams", self.protein_grams),
            ("carbs_grams", self.carbs_grams),
            ("fat_grams", self.fat_grams),
        ] {
            if let Some(value) = value {
                if value < 0 {
                    errors.add(field, "Must be non-negative");
                }
            }
        }
        errors.into_result()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateMeal {
    pub name: Option<String>,
    pub planned_date: Option<NaiveDate>,
    pub calories: Option<i32>,
    pub protein_grams: Option<i32>,
    pub carbs_grams: Option<i32>,
    pub fat_grams: Option<i32>,
    pub notes: Option<String>,
}

impl UpdateMeal {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                errors.add("name", "Name must not be empty");
            }
        }
        for (field, value) in [
            ("calories", self.calories),
            ("protein_grams", self.protein_grams),
            ("carbs_grams", self.carbs_grams),
            ("fat_grams", self.fat_grams),
        ] {
            if let Some(value) = value {
                if value < 0 {
                    errors.add(field, "Must be non-negative");
                }
            }
        }
        errors.into_result()
    }
}
