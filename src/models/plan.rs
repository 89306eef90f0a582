use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::validation::ValidationErrors;

pub const MIN_SETS: i16 = 1;
pub const MAX_SETS: i16 = 10;
pub const MIN_REPS: i16 = 1;
pub const MAX_REPS: i16 = 50;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Plan {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PlanDay {
    pub id: Uuid,
    pub plan_id: Uuid,
    /// 1 = Monday .. 7 = Sunday
    pub day_of_week: i16,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PlanDayExercise {
    pub id: Uuid,
    pub plan_day_id: Uuid,
    pub exercise_id: Uuid,
    pub position: i16,
    pub sets: i16,
    pub reps: i16,
    pub weight: f64,
}

/// A plan day joined with its exercises, ordered by position.
#[derive(Debug, Clone, Serialize)]
pub struct PlanDayDetail {
    #[serde(flatten)]
    pub day: PlanDay,
    pub exercises: Vec<PlanDayExercise>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanDetail {
    #[serde(flatten)]
    pub plan: Plan,
    pub days: Vec<PlanDayDetail>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePlan {
    pub name: String,
    pub description: Option<String>,
    pub days: Vec<CreatePlanDay>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePlanDay {
    pub day_of_week: i16,
    pub name: Option<String>,
    pub exercises: Vec<CreatePlanDayExercise>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePlanDayExercise {
    pub exercise_id: Uuid,
    pub sets: i16,
    pub reps: i16,
    pub weight: f64,
}

impl CreatePlan {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.name.trim().is_empty() {
            errors.add("name", "Name must not be empty");
        }
        if self.days.is_empty() {
            errors.add("days", "Plan must have at least one day");
        }

        let mut seen_days = std::collections::HashSet::new();
        for (day_index, day) in self.days.iter().enumerate() {
            let prefix = format!("days[{}]", day_index);

            if !(1..=7).contains(&day.day_of_week) {
                errors.add(
                    &format!("{}.day_of_week", prefix),
                    "Day of week must be between 1 (Monday) and 7 (Sunday)",
                );
            }
            if !seen_days.insert(day.day_of_week) {
                errors.add(
                    &format!("{}.day_of_week", prefix),
                    "Each day of week may appear only once",
                );
            }
            if day.exercises.is_empty() {
                errors.add(
                    &format!("{}.exercises", prefix),
                    "Day must have at least one exercise",
                );
            }

            let mut seen_exercises = std::collections::HashSet::new();
            for (exercise_index, exercise) in day.exercises.iter().enumerate() {
                let prefix = format!("{}.exercises[{}]", prefix, exercise_index);

                if !seen_exercises.insert(exercise.exercise_id) {
                    errors.add(
                        &format!("{}.exercise_id", prefix),
                        "An exercise may appear only once per day",
                    );
                }

                if !(MIN_SETS..=MAX_SETS).contains(&exercise.sets) {
                    errors.add(
                        &format!("{}.sets", prefix),
                        &format!("Sets must be between {} and {}", MIN_SETS, MAX_SETS),
                    );
                }
                if !(MIN_REPS..=MAX_REPS).contains(&exercise.reps) {
                    errors.add(
                        &format!("{}.reps", prefix),
                        &format!("Reps must be between {} and {}", MIN_REPS, MAX_REPS),
                    );
                }
                if exercise.weight < 0.0 || !exercise.weight.is_finite() {
                    errors.add(
                        &format!("{}.weight", prefix),
                        "Weight must be a non-negative number",
                    );
                }
            }
        }

        errors.into_result()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdatePlan {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl UpdatePlan {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                errors.add("name", "Name must not be empty");
            }
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_plan() -> CreatePlan {
        CreatePlan {
            name: "Push Pull Legs".to_string(),
            description: None,
            days: vec![CreatePlanDay {
                day_of_week: 1,
                name: Some("Push".to_string()),
                exercises: vec![CreatePlanDayExercise {
                    exercise_id: Uuid::new_v4(),
                    sets: 3,
                    reps: 8,
                    weight: 135.0,
                }],
            }],
        }
    }

    #[test]
    fn valid_plan_passes() {
        assert!(valid_plan().validate().is_ok());
    }

    #[test]
    fn duplicate_day_of_week_is_rejected() {
        let mut plan = valid_plan();
        plan.days.push(CreatePlanDay {
            day_of_week: 1,
            name: None,
            exercises: vec![CreatePlanDayExercise {
                exercise_id: Uuid::new_v4(),
                sets: 3,
                reps: 10,
                weight: 95.0,
            }],
        });

        let errors = plan.validate().unwrap_err();
        assert!(errors
            .fields
            .iter()
            .any(|e| e.field == "days[1].day_of_week"));
    }

    #[test]
    fn out_of_range_sets_and_reps_are_rejected() {
        let mut plan = valid_plan();
        plan.days[0].exercises[0].sets = 0;
        plan.days[0].exercises[0].reps = 100;

        let errors = plan.validate().unwrap_err();
        assert_eq!(errors.fields.len(), 2);
    }

    #[test]
    fn negative_weight_is_rejected() {
        let mut plan = valid_plan();
        plan.days[0].exercises[0].weight = -10.0;
        assert!(plan.validate().is_err());
    }

    #[test]
    fn repeated_exercise_in_a_day_is_rejected() {
        let mut plan = valid_plan();
        let repeated = CreatePlanDayExercise {
            exercise_id: plan.days[0].exercises[0].exercise_id,
            sets: 3,
            reps: 12,
            weight: 60.0,
        };
        plan.days[0].exercises.push(repeated);

        let errors = plan.validate().unwrap_err();
        assert!(errors
            .fields
            .iter()
            .any(|e| e.field == "days[0].exercises[1].exercise_id"));
    }
}
