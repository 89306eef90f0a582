use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{CreateExercise, Exercise, UpdateExercise};

use super::errors::ServiceError;

#[derive(Clone)]
pub struct ExerciseService {
    db: PgPool,
}

impl ExerciseService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create_exercise(
        &self,
        exercise_data: CreateExercise,
    ) -> Result<Exercise, ServiceError> {
        exercise_data.validate()?;

        if self.name_taken(&exercise_data.name, None).await? {
            return Err(ServiceError::DuplicateExerciseName);
        }

        let exercise = sqlx::query_as::<_, Exercise>(
            "INSERT INTO exercises (id, name, muscle_group, equipment, notes, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $6)
             RETURNING id, name, muscle_group, equipment, notes, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(exercise_data.name.trim())
        .bind(&exercise_data.muscle_group)
        .bind(&exercise_data.equipment)
        .bind(&exercise_data.notes)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;

        Ok(exercise)
    }

    pub async fn list_exercises(&self) -> Result<Vec<Exercise>, ServiceError> {
        let exercises = sqlx::query_as::<_, Exercise>(
            "SELECT id, name, muscle_group, equipment, notes, created_at, updated_at
             FROM exercises ORDER BY name",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(exercises)
    }

    pub async fn get_exercise_by_id(
        &self,
        exercise_id: Uuid,
    ) -> Result<Option<Exercise>, ServiceError> {
        let exercise = sqlx::query_as::<_, Exercise>(
            "SELECT id, name, muscle_group, equipment, notes, created_at, updated_at
             FROM exercises WHERE id = $1",
        )
        .bind(exercise_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(exercise)
    }

    pub async fn update_exercise(
        &self,
        exercise_id: Uuid,
        exercise_data: UpdateExercise,
    ) -> Result<Exercise, ServiceError> {
        exercise_data.validate()?;

        if let Some(name) = &exercise_data.name {
            if self.name_taken(name, Some(exercise_id)).await? {
                return Err(ServiceError::DuplicateExerciseName);
            }
        }

        let exercise = sqlx::query_as::<_, Exercise>(
            "UPDATE exercises
             SET name = COALESCE($2, name),
                 muscle_group = COALESCE($3, muscle_group),
                 equipment = COALESCE($4, equipment),
                 notes = COALESCE($5, notes),
                 updated_at = $6
             WHERE id = $1
             RETURNING id, name, muscle_group, equipment, notes, created_at, updated_at",
        )
        .bind(exercise_id)
        .bind(&exercise_data.name)
        .bind(&exercise_data.muscle_group)
        .bind(&exercise_data.equipment)
        .bind(&exercise_data.notes)
        .bind(Utc::now())
        .fetch_optional(&self.db)
        .await?;

        exercise.ok_or(ServiceError::NotFound("Exercise"))
    }

    /// Delete an exercise. Refused while any plan day or workout set still
    /// references it.
    pub async fn delete_exercise(&self, exercise_id: Uuid) -> Result<bool, ServiceError> {
        let references: i64 = sqlx::query_scalar(
            "SELECT
                (SELECT COUNT(*) FROM plan_day_exercises WHERE exercise_id = $1)
              + (SELECT COUNT(*) FROM workout_sets WHERE exercise_id = $1)",
        )
        .bind(exercise_id)
        .fetch_one(&self.db)
        .await?;

        if references > 0 {
            return Err(ServiceError::ExerciseInUse);
        }

        let result = sqlx::query("DELETE FROM exercises WHERE id = $1")
            .bind(exercise_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn name_taken(&self, name: &str, exclude: Option<Uuid>) -> Result<bool, ServiceError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM exercises WHERE lower(name) = lower($1) AND ($2::uuid IS NULL OR id <> $2)",
        )
        .bind(name.trim())
        .bind(exclude)
        .fetch_one(&self.db)
        .await?;

        Ok(count > 0)
    }
}
