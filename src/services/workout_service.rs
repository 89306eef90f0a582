use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{LogSet, Workout, WorkoutDetail, WorkoutSet};

use super::errors::ServiceError;

#[derive(Clone)]
pub struct WorkoutService {
    db: PgPool,
}

impl WorkoutService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn list_for_mesocycle(
        &self,
        mesocycle_id: Uuid,
        week: Option<i16>,
    ) -> Result<Vec<Workout>, ServiceError> {
        let workouts = sqlx::query_as::<_, Workout>(
            "SELECT id, mesocycle_id, plan_day_id, week, scheduled_date, deload, completed_at, created_at
             FROM workouts
             WHERE mesocycle_id = $1 AND ($2::smallint IS NULL OR week = $2)
             ORDER BY scheduled_date",
        )
        .bind(mesocycle_id)
        .bind(week)
        .fetch_all(&self.db)
        .await?;

        Ok(workouts)
    }

    pub async fn get_workout_detail(
        &self,
        workout_id: Uuid,
    ) -> Result<Option<WorkoutDetail>, ServiceError> {
        let workout = sqlx::query_as::<_, Workout>(
            "SELECT id, mesocycle_id, plan_day_id, week, scheduled_date, deload, completed_at, created_at
             FROM workouts WHERE id = $1",
        )
        .bind(workout_id)
        .fetch_optional(&self.db)
        .await?;

        let Some(workout) = workout else {
            return Ok(None);
        };

        let sets = self.get_sets(workout_id).await?;
        Ok(Some(WorkoutDetail { workout, sets }))
    }

    /// The earliest scheduled workout in an active block that has not been
    /// completed yet.
    pub async fn next_pending(&self) -> Result<Option<WorkoutDetail>, ServiceError> {
        let workout = sqlx::query_as::<_, Workout>(
            "SELECT w.id, w.mesocycle_id, w.plan_day_id, w.week, w.scheduled_date, w.deload, w.completed_at, w.created_at
             FROM workouts w
             JOIN mesocycles m ON m.id = w.mesocycle_id
             WHERE w.completed_at IS NULL AND m.status = 'active'
             ORDER BY w.scheduled_date, w.created_at
             LIMIT 1",
        )
        .fetch_optional(&self.db)
        .await?;

        let Some(workout) = workout else {
            return Ok(None);
        };

        let sets = self.get_sets(workout.id).await?;
        Ok(Some(WorkoutDetail { workout, sets }))
    }

    pub async fn complete_workout(&self, workout_id: Uuid) -> Result<Workout, ServiceError> {
        let workout = sqlx::query_as::<_, Workout>(
            "UPDATE workouts SET completed_at = $2 WHERE id = $1
             RETURNING id, mesocycle_id, plan_day_id, week, scheduled_date, deload, completed_at, created_at",
        )
        .bind(workout_id)
        .bind(Utc::now())
        .fetch_optional(&self.db)
        .await?;

        workout.ok_or(ServiceError::NotFound("Workout"))
    }

    /// Record what was actually lifted for one set.
    pub async fn log_set(&self, set_id: Uuid, entry: LogSet) -> Result<WorkoutSet, ServiceError> {
        entry.validate()?;

        let set = sqlx::query_as::<_, WorkoutSet>(
            "UPDATE workout_sets
             SET actual_reps = $2, actual_weight = $3, completed_at = $4
             WHERE id = $1
             RETURNING id, workout_id, exercise_id, set_number, target_reps, target_weight,
                       actual_reps, actual_weight, completed_at",
        )
        .bind(set_id)
        .bind(entry.actual_reps)
        .bind(entry.actual_weight)
        .bind(Utc::now())
        .fetch_optional(&self.db)
        .await?;

        set.ok_or(ServiceError::NotFound("Workout set"))
    }

    async fn get_sets(&self, workout_id: Uuid) -> Result<Vec<WorkoutSet>, ServiceError> {
        let sets = sqlx::query_as::<_, WorkoutSet>(
            "SELECT ws.id, ws.workout_id, ws.exercise_id, ws.set_number, ws.target_reps,
                    ws.target_weight, ws.actual_reps, ws.actual_weight, ws.completed_at
             FROM workout_sets ws
             JOIN plan_day_exercises pde
               ON pde.exercise_id = ws.exercise_id
              AND pde.plan_day_id = (SELECT plan_day_id FROM workouts WHERE id = $1)
             WHERE ws.workout_id = $1
             ORDER BY pde.position, ws.set_number",
        )
        .bind(workout_id)
        .fetch_all(&self.db)
        .await?;

        Ok(sets)
    }
}
