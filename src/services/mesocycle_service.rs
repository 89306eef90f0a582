use chrono::{DateTime, Duration, NaiveDate, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{
    GenerateMesocycle, GeneratedMesocycle, Mesocycle, PlanDayDetail, UpdateMesocycleStatus,
    ValidationErrors, Workout, WorkoutSet,
};

use super::errors::ServiceError;
use super::plan_service::PlanService;
use super::progression::{prescribe, MESOCYCLE_WEEKS};

/// Upper bound on row-writes per committed batch.
pub const MAX_BATCH_OPERATIONS: usize = 500;

/// Every workout and set row for one block, ids pre-generated so sets can
/// reference their workout before anything is written.
#[derive(Debug)]
pub struct MaterializedBlock {
    pub workouts: Vec<Workout>,
    pub sets: Vec<WorkoutSet>,
}

/// Walk plan days x weeks x exercises x sets and produce the full block.
pub fn materialize_block(
    mesocycle_id: Uuid,
    start_date: NaiveDate,
    days: &[PlanDayDetail],
    now: DateTime<Utc>,
) -> MaterializedBlock {
    let mut workouts = Vec::new();
    let mut sets = Vec::new();

    for week in 1..=MESOCYCLE_WEEKS {
        for day in days {
            let workout_id = Uuid::new_v4();
            let day_offset = i64::from(week - 1) * 7 + i64::from(day.day.day_of_week - 1);

            workouts.push(Workout {
                id: workout_id,
                mesocycle_id,
                plan_day_id: day.day.id,
                week,
                scheduled_date: start_date + Duration::days(day_offset),
                deload: week == MESOCYCLE_WEEKS,
                completed_at: None,
                created_at: now,
            });

            for exercise in &day.exercises {
                let prescription =
                    prescribe(exercise.sets, exercise.reps, exercise.weight, week);

                for set_number in 1..=prescription.sets {
                    sets.push(WorkoutSet {
                        id: Uuid::new_v4(),
                        workout_id,
                        exercise_id: exercise.exercise_id,
                        set_number,
                        target_reps: prescription.reps,
                        target_weight: prescription.weight,
                        actual_reps: None,
                        actual_weight: None,
                        completed_at: None,
                    });
                }
            }
        }
    }

    MaterializedBlock { workouts, sets }
}

/// Number of sequential batches needed to write `rows` rows.
pub fn batch_count(rows: usize) -> usize {
    rows.div_ceil(MAX_BATCH_OPERATIONS)
}

#[derive(Clone)]
pub struct MesocycleService {
    db: PgPool,
    plan_service: PlanService,
}

impl MesocycleService {
    pub fn new(db: PgPool) -> Self {
        let plan_service = PlanService::new(db.clone());
        Self { db, plan_service }
    }

    /// Generate a full training block from a plan template.
    ///
    /// The mesocycle row is written first, then the materialized workouts
    /// and sets in sequential batches. There is no partial recovery: if any
    /// batch fails the mesocycle is deleted (cascading away whatever landed)
    /// and the caller retries the whole generation.
    pub async fn generate(
        &self,
        request: GenerateMesocycle,
    ) -> Result<GeneratedMesocycle, ServiceError> {
        request.validate()?;

        let plan = self
            .plan_service
            .get_plan_detail(request.plan_id)
            .await?
            .ok_or(ServiceError::NotFound("Plan"))?;

        if plan.days.is_empty() || plan.days.iter().any(|d| d.exercises.is_empty()) {
            let mut errors = ValidationErrors::new();
            errors.add("plan_id", "Plan must have at least one day with exercises");
            return Err(errors.into());
        }

        let now = Utc::now();
        let mesocycle = sqlx::query_as::<_, Mesocycle>(
            "INSERT INTO mesocycles (id, plan_id, name, start_date, weeks, status, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, 'active', $6, $6)
             RETURNING id, plan_id, name, start_date, weeks, status, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(request.plan_id)
        .bind(&request.name)
        .bind(request.start_date)
        .bind(MESOCYCLE_WEEKS)
        .bind(now)
        .fetch_one(&self.db)
        .await?;

        let block = materialize_block(mesocycle.id, request.start_date, &plan.days, now);
        info!(
            mesocycle_id = %mesocycle.id,
            workouts = block.workouts.len(),
            sets = block.sets.len(),
            "generating training block"
        );

        if let Err(err) = self.write_block(&block).await {
            warn!(mesocycle_id = %mesocycle.id, "block write failed, rolling back generation");
            self.delete(mesocycle.id).await?;
            return Err(err);
        }

        Ok(GeneratedMesocycle {
            mesocycle,
            workout_count: block.workouts.len(),
            set_count: block.sets.len(),
        })
    }

    /// Commit the block in batches of at most [`MAX_BATCH_OPERATIONS`]
    /// row-writes, workouts before sets so foreign keys resolve.
    async fn write_block(&self, block: &MaterializedBlock) -> Result<(), ServiceError> {
        for chunk in block.workouts.chunks(MAX_BATCH_OPERATIONS) {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO workouts (id, mesocycle_id, plan_day_id, week, scheduled_date, deload, completed_at, created_at) ",
            );
            builder.push_values(chunk, |mut row, workout| {
                row.push_bind(workout.id)
                    .push_bind(workout.mesocycle_id)
                    .push_bind(workout.plan_day_id)
                    .push_bind(workout.week)
                    .push_bind(workout.scheduled_date)
                    .push_bind(workout.deload)
                    .push_bind(workout.completed_at)
                    .push_bind(workout.created_at);
            });
            builder.build().execute(&self.db).await?;
        }

        for chunk in block.sets.chunks(MAX_BATCH_OPERATIONS) {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO workout_sets (id, workout_id, exercise_id, set_number, target_reps, target_weight, actual_reps, actual_weight, completed_at) ",
            );
            builder.push_values(chunk, |mut row, set| {
                row.push_bind(set.id)
                    .push_bind(set.workout_id)
                    .push_bind(set.exercise_id)
                    .push_bind(set.set_number)
                    .push_bind(set.target_reps)
                    .push_bind(set.target_weight)
                    .push_bind(set.actual_reps)
                    .push_bind(set.actual_weight)
                    .push_bind(set.completed_at);
            });
            builder.build().execute(&self.db).await?;
        }

        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<Mesocycle>, ServiceError> {
        let mesocycles = sqlx::query_as::<_, Mesocycle>(
            "SELECT id, plan_id, name, start_date, weeks, status, created_at, updated_at
             FROM mesocycles ORDER BY start_date DESC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(mesocycles)
    }

    pub async fn get_by_id(&self, mesocycle_id: Uuid) -> Result<Option<Mesocycle>, ServiceError> {
        let mesocycle = sqlx::query_as::<_, Mesocycle>(
            "SELECT id, plan_id, name, start_date, weeks, status, created_at, updated_at
             FROM mesocycles WHERE id = $1",
        )
        .bind(mesocycle_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(mesocycle)
    }

    pub async fn update_status(
        &self,
        mesocycle_id: Uuid,
        request: UpdateMesocycleStatus,
    ) -> Result<Mesocycle, ServiceError> {
        let mesocycle = sqlx::query_as::<_, Mesocycle>(
            "UPDATE mesocycles SET status = $2, updated_at = $3 WHERE id = $1
             RETURNING id, plan_id, name, start_date, weeks, status, created_at, updated_at",
        )
        .bind(mesocycle_id)
        .bind(request.status)
        .bind(Utc::now())
        .fetch_optional(&self.db)
        .await?;

        mesocycle.ok_or(ServiceError::NotFound("Mesocycle"))
    }

    /// Delete a block and, via cascade, every workout and set in it.
    pub async fn delete(&self, mesocycle_id: Uuid) -> Result<bool, ServiceError> {
        let result = sqlx::query("DELETE FROM mesocycles WHERE id = $1")
            .bind(mesocycle_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlanDay, PlanDayExercise};
    use pretty_assertions::assert_eq;

    fn template_day(day_of_week: i16, exercises: Vec<(i16, i16, f64)>) -> PlanDayDetail {
        let day_id = Uuid::new_v4();
        PlanDayDetail {
            day: PlanDay {
                id: day_id,
                plan_id: Uuid::new_v4(),
                day_of_week,
                name: None,
            },
            exercises: exercises
                .into_iter()
                .enumerate()
                .map(|(i, (sets, reps, weight))| PlanDayExercise {
                    id: Uuid::new_v4(),
                    plan_day_id: day_id,
                    exercise_id: Uuid::new_v4(),
                    position: i as i16 + 1,
                    sets,
                    reps,
                    weight,
                })
                .collect(),
        }
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn block_covers_every_day_of_every_week() {
        let days = vec![
            template_day(1, vec![(3, 8, 100.0)]),
            template_day(4, vec![(4, 10, 60.0)]),
        ];
        let block = materialize_block(Uuid::new_v4(), monday(), &days, Utc::now());

        assert_eq!(block.workouts.len(), 2 * MESOCYCLE_WEEKS as usize);
        for week in 1..=MESOCYCLE_WEEKS {
            assert_eq!(
                block.workouts.iter().filter(|w| w.week == week).count(),
                2,
                "week {} should have one workout per plan day",
                week
            );
        }
    }

    #[test]
    fn scheduled_dates_follow_day_of_week_offsets() {
        let days = vec![template_day(3, vec![(3, 8, 100.0)])];
        let block = materialize_block(Uuid::new_v4(), monday(), &days, Utc::now());

        // day_of_week 3 on a 2024-01-01 Monday start lands on Wednesday
        let first = &block.workouts[0];
        assert_eq!(first.scheduled_date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());

        let last = block.workouts.last().unwrap();
        assert_eq!(
            last.scheduled_date,
            NaiveDate::from_ymd_opt(2024, 2, 14).unwrap()
        );
    }

    #[test]
    fn only_the_final_week_is_deload() {
        let days = vec![template_day(1, vec![(3, 8, 100.0)])];
        let block = materialize_block(Uuid::new_v4(), monday(), &days, Utc::now());

        for workout in &block.workouts {
            assert_eq!(workout.deload, workout.week == MESOCYCLE_WEEKS);
        }
    }

    #[test]
    fn set_counts_shrink_in_the_deload_week() {
        let days = vec![template_day(1, vec![(4, 8, 200.0)])];
        let block = materialize_block(Uuid::new_v4(), monday(), &days, Utc::now());

        // Weeks 1-6 keep all four sets, week 7 halves them.
        assert_eq!(block.sets.len(), 6 * 4 + 2);

        let deload_workout = block
            .workouts
            .iter()
            .find(|w| w.week == MESOCYCLE_WEEKS)
            .unwrap();
        let deload_sets: Vec<_> = block
            .sets
            .iter()
            .filter(|s| s.workout_id == deload_workout.id)
            .collect();
        assert_eq!(deload_sets.len(), 2);
        assert_eq!(deload_sets[0].target_weight, 120.0);
        assert_eq!(deload_sets[0].target_reps, 8);
    }

    #[test]
    fn sets_reference_their_workout_and_number_from_one() {
        let days = vec![template_day(1, vec![(3, 8, 100.0), (2, 12, 0.0)])];
        let block = materialize_block(Uuid::new_v4(), monday(), &days, Utc::now());

        let workout_ids: std::collections::HashSet<_> =
            block.workouts.iter().map(|w| w.id).collect();
        for set in &block.sets {
            assert!(workout_ids.contains(&set.workout_id));
            assert!(set.set_number >= 1);
            assert!(set.actual_reps.is_none());
            assert!(set.completed_at.is_none());
        }

        // Second exercise is bodyweight and stays unweighted all block.
        let bodyweight_sets = block.sets.iter().filter(|s| s.target_weight == 0.0).count();
        assert_eq!(bodyweight_sets, 6 * 2 + 1);
    }

    #[test]
    fn batches_respect_the_operation_ceiling() {
        assert_eq!(batch_count(0), 0);
        assert_eq!(batch_count(1), 1);
        assert_eq!(batch_count(MAX_BATCH_OPERATIONS), 1);
        assert_eq!(batch_count(MAX_BATCH_OPERATIONS + 1), 2);
        assert_eq!(batch_count(1260), 3);

        // A realistic block: 6 days x 5 exercises x 4 sets x 6 weeks plus a
        // halved deload week comes to 780 set rows, two batches.
        let sets = 6 * 5 * 4 * 6 + 6 * 5 * 2;
        assert_eq!(batch_count(sets), 2);
    }
}
