use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{
    CreatePlan, Plan, PlanDay, PlanDayDetail, PlanDayExercise, PlanDetail, UpdatePlan,
};

use super::errors::ServiceError;

#[derive(Clone)]
pub struct PlanService {
    db: PgPool,
}

impl PlanService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a plan with its days and exercises in one transaction.
    pub async fn create_plan(&self, plan_data: CreatePlan) -> Result<PlanDetail, ServiceError> {
        plan_data.validate()?;

        // Referential integrity: every exercise must exist before we write.
        for day in &plan_data.days {
            for exercise in &day.exercises {
                self.ensure_exercise_exists(exercise.exercise_id).await?;
            }
        }

        let now = Utc::now();
        let mut tx = self.db.begin().await?;

        let plan = sqlx::query_as::<_, Plan>(
            "INSERT INTO plans (id, name, description, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $4)
             RETURNING id, name, description, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(&plan_data.name)
        .bind(&plan_data.description)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        let mut days = Vec::with_capacity(plan_data.days.len());
        for day_data in &plan_data.days {
            let day = sqlx::query_as::<_, PlanDay>(
                "INSERT INTO plan_days (id, plan_id, day_of_week, name)
                 VALUES ($1, $2, $3, $4)
                 RETURNING id, plan_id, day_of_week, name",
            )
            .bind(Uuid::new_v4())
            .bind(plan.id)
            .bind(day_data.day_of_week)
            .bind(&day_data.name)
            .fetch_one(&mut *tx)
            .await?;

            let mut exercises = Vec::with_capacity(day_data.exercises.len());
            for (position, exercise_data) in day_data.exercises.iter().enumerate() {
                let exercise = sqlx::query_as::<_, PlanDayExercise>(
                    "INSERT INTO plan_day_exercises (id, plan_day_id, exercise_id, position, sets, reps, weight)
                     VALUES ($1, $2, $3, $4, $5, $6, $7)
                     RETURNING id, plan_day_id, exercise_id, position, sets, reps, weight",
                )
                .bind(Uuid::new_v4())
                .bind(day.id)
                .bind(exercise_data.exercise_id)
                .bind(position as i16 + 1)
                .bind(exercise_data.sets)
                .bind(exercise_data.reps)
                .bind(exercise_data.weight)
                .fetch_one(&mut *tx)
                .await?;
                exercises.push(exercise);
            }

            days.push(PlanDayDetail { day, exercises });
        }

        tx.commit().await?;

        Ok(PlanDetail { plan, days })
    }

    pub async fn list_plans(&self) -> Result<Vec<Plan>, ServiceError> {
        let plans = sqlx::query_as::<_, Plan>(
            "SELECT id, name, description, created_at, updated_at FROM plans ORDER BY created_at DESC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(plans)
    }

    /// Fetch a plan joined with its days and exercises, days in weekday
    /// order and exercises in position order.
    pub async fn get_plan_detail(&self, plan_id: Uuid) -> Result<Option<PlanDetail>, ServiceError> {
        let plan = sqlx::query_as::<_, Plan>(
            "SELECT id, name, description, created_at, updated_at FROM plans WHERE id = $1",
        )
        .bind(plan_id)
        .fetch_optional(&self.db)
        .await?;

        let Some(plan) = plan else {
            return Ok(None);
        };

        let day_rows = sqlx::query_as::<_, PlanDay>(
            "SELECT id, plan_id, day_of_week, name FROM plan_days
             WHERE plan_id = $1 ORDER BY day_of_week",
        )
        .bind(plan_id)
        .fetch_all(&self.db)
        .await?;

        let exercise_rows = sqlx::query_as::<_, PlanDayExercise>(
            "SELECT pde.id, pde.plan_day_id, pde.exercise_id, pde.position, pde.sets, pde.reps, pde.weight
             FROM plan_day_exercises pde
             JOIN plan_days pd ON pd.id = pde.plan_day_id
             WHERE pd.plan_id = $1
             ORDER BY pde.plan_day_id, pde.position",
        )
        .bind(plan_id)
        .fetch_all(&self.db)
        .await?;

        let days = day_rows
            .into_iter()
            .map(|day| {
                let exercises = exercise_rows
                    .iter()
                    .filter(|e| e.plan_day_id == day.id)
                    .cloned()
                    .collect();
                PlanDayDetail { day, exercises }
            })
            .collect();

        Ok(Some(PlanDetail { plan, days }))
    }

    pub async fn update_plan(
        &self,
        plan_id: Uuid,
        plan_data: UpdatePlan,
    ) -> Result<Plan, ServiceError> {
        plan_data.validate()?;

        let plan = sqlx::query_as::<_, Plan>(
            "UPDATE plans
             SET name = COALESCE($2, name),
                 description = COALESCE($3, description),
                 updated_at = $4
             WHERE id = $1
             RETURNING id, name, description, created_at, updated_at",
        )
        .bind(plan_id)
        .bind(&plan_data.name)
        .bind(&plan_data.description)
        .bind(Utc::now())
        .fetch_optional(&self.db)
        .await?;

        plan.ok_or(ServiceError::NotFound("Plan"))
    }

    /// Delete a plan template. Refused while a mesocycle was generated from
    /// it, since workouts keep pointing at the plan's days.
    pub async fn delete_plan(&self, plan_id: Uuid) -> Result<bool, ServiceError> {
        let in_use: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM mesocycles WHERE plan_id = $1",
        )
        .bind(plan_id)
        .fetch_one(&self.db)
        .await?;

        if in_use > 0 {
            return Err(ServiceError::PlanInUse);
        }

        let result = sqlx::query("DELETE FROM plans WHERE id = $1")
            .bind(plan_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ensure_exercise_exists(&self, exercise_id: Uuid) -> Result<(), ServiceError> {
        let exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM exercises WHERE id = $1")
            .bind(exercise_id)
            .fetch_one(&self.db)
            .await?;

        if exists == 0 {
            return Err(ServiceError::NotFound("Exercise"));
        }
        Ok(())
    }
}
