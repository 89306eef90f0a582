use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{CreateMeal, Meal, UpdateMeal};

use super::errors::ServiceError;

#[derive(Clone)]
pub struct MealService {
    db: PgPool,
}

impl MealService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create_meal(&self, meal_data: CreateMeal) -> Result<Meal, ServiceError> {
        meal_data.validate()?;

        let meal = sqlx::query_as::<_, Meal>(
            "INSERT INTO meals (id, name, planned_date, calories, protein_grams, carbs_grams, fat_grams, notes, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
             RETURNING id, name, planned_date, calories, protein_grams, carbs_grams, fat_grams, notes, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(&meal_data.name)
        .bind(meal_data.planned_date)
        .bind(meal_data.calories)
        .bind(meal_data.protein_grams)
        .bind(meal_data.carbs_grams)
        .bind(meal_data.fat_grams)
        .bind(&meal_data.notes)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;

        Ok(meal)
    }

    pub async fn list_meals(&self, date: Option<NaiveDate>) -> Result<Vec<Meal>, ServiceError> {
        let meals = sqlx::query_as::<_, Meal>(
            "SELECT id, name, planned_date, calories, protein_grams, carbs_grams, fat_grams, notes, created_at, updated_at
             FROM meals
             WHERE ($1::date IS NULL OR planned_date = $1)
             ORDER BY planned_date DESC NULLS LAST, name",
        )
        .bind(date)
        .fetch_all(&self.db)
        .await?;

        Ok(meals)
    }

    pub async fn get_meal_by_id(&self, meal_id: Uuid) -> Result<Option<Meal>, ServiceError> {
        let meal = sqlx::query_as::<_, Meal>(
            "SELECT id, name, planned_date, calories, protein_grams, carbs_grams, fat_grams, notes, created_at, updated_at
             FROM meals WHERE id = $1",
        )
        .bind(meal_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(meal)
    }

    pub async fn update_meal(
        &self,
        meal_id: Uuid,
        meal_data: UpdateMeal,
    ) -> Result<Meal, ServiceError> {
        meal_data.validate()?;

        let meal = sqlx::query_as::<_, Meal>(
            "UPDATE meals
             SET name = COALESCE($2, name),
                 planned_date = COALESCE($3, planned_date),
                 calories = COALESCE($4, calories),
                 protein_grams = COALESCE($5, protein_grams),
                 carbs_grams = COALESCE($6, carbs_grams),
                 fat_grams = COALESCE($7, fat_grams),
                 notes = COALESCE($8, notes),
                 updated_at = $9
             WHERE id = $1
             RETURNING id, name, planned_date, calories, protein_grams, carbs_grams, fat_grams, notes, created_at, updated_at",
        )
        .bind(meal_id)
        .bind(&meal_data.name)
        .bind(meal_data.planned_date)
        .bind(meal_data.calories)
        .bind(meal_data.protein_grams)
        .bind(meal_data.carbs_grams)
        .bind(meal_data.fat_grams)
        .bind(&meal_data.notes)
        .bind(Utc::now())
        .fetch_optional(&self.db)
        .await?;

        meal.ok_or(ServiceError::NotFound("Meal"))
    }

    pub async fn delete_meal(&self, meal_id: Uuid) -> Result<bool, ServiceError> {
        let result = sqlx::query("DELETE FROM meals WHERE id = $1")
            .bind(meal_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
