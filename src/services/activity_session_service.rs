use chrono::{NaiveDate, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::{
    ActivityKind, ActivitySession, ActivitySummary, CreateActivitySession, UpdateActivitySession,
};

use super::errors::ServiceError;

#[derive(Clone)]
pub struct ActivitySessionService {
    db: PgPool,
}

impl ActivitySessionService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn create_session(
        &self,
        session_data: CreateActivitySession,
    ) -> Result<ActivitySession, ServiceError> {
        session_data.validate()?;

        let session = sqlx::query_as::<_, ActivitySession>(
            "INSERT INTO activity_sessions (id, kind, date, duration_seconds, distance_meters, notes, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
             RETURNING id, kind, date, duration_seconds, distance_meters, notes, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(session_data.kind)
        .bind(session_data.date)
        .bind(session_data.duration_seconds)
        .bind(session_data.distance_meters)
        .bind(&session_data.notes)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;

        Ok(session)
    }

    pub async fn list_sessions(
        &self,
        kind: Option<ActivityKind>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<ActivitySession>, ServiceError> {
        let sessions = sqlx::query_as::<_, ActivitySession>(
            "SELECT id, kind, date, duration_seconds, distance_meters, notes, created_at, updated_at
             FROM activity_sessions
             WHERE ($1::activity_kind IS NULL OR kind = $1)
               AND ($2::date IS NULL OR date >= $2)
               AND ($3::date IS NULL OR date <= $3)
             ORDER BY date DESC",
        )
        .bind(kind)
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.db)
        .await?;

        Ok(sessions)
    }

    pub async fn get_session_by_id(
        &self,
        session_id: Uuid,
    ) -> Result<Option<ActivitySession>, ServiceError> {
        let session = sqlx::query_as::<_, ActivitySession>(
            "SELECT id, kind, date, duration_seconds, distance_meters, notes, created_at, updated_at
             FROM activity_sessions WHERE id = $1",
        )
        .bind(session_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(session)
    }

    pub async fn update_session(
        &self,
        session_id: Uuid,
        session_data: UpdateActivitySession,
    ) -> Result<ActivitySession, ServiceError> {
        session_data.validate()?;

        let session = sqlx::query_as::<_, ActivitySession>(
            "UPDATE activity_sessions
             SET date = COALESCE($2, date),
                 duration_seconds = COALESCE($3, duration_seconds),
                 distance_meters = COALESCE($4, distance_meters),
                 notes = COALESCE($5, notes),
                 updated_at = $6
             WHERE id = $1
             RETURNING id, kind, date, duration_seconds, distance_meters, notes, created_at, updated_at",
        )
        .bind(session_id)
        .bind(session_data.date)
        .bind(session_data.duration_seconds)
        .bind(session_data.distance_meters)
        .bind(&session_data.notes)
        .bind(Utc::now())
        .fetch_optional(&self.db)
        .await?;

        session.ok_or(ServiceError::NotFound("Activity session"))
    }

    pub async fn delete_session(&self, session_id: Uuid) -> Result<bool, ServiceError> {
        let result = sqlx::query("DELETE FROM activity_sessions WHERE id = $1")
            .bind(session_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Per-kind totals over an optional date range.
    pub async fn get_summary(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<ActivitySummary>, ServiceError> {
        let rows = sqlx::query(
            "SELECT kind, COUNT(*) AS session_count,
                    COALESCE(SUM(duration_seconds), 0)::bigint AS total_duration_seconds,
                    SUM(distance_meters) AS total_distance_meters
             FROM activity_sessions
             WHERE ($1::date IS NULL OR date >= $1)
               AND ($2::date IS NULL OR date <= $2)
             GROUP BY kind
             ORDER BY kind",
        )
        .bind(start_date)
        .bind(end_date)
        .fetch_all(&self.db)
        .await?;

        let summaries = rows
            .into_iter()
            .map(|row| ActivitySummary {
                kind: row.get("kind"),
                session_count: row.get("session_count"),
                total_duration_seconds: row.get("total_duration_seconds"),
                total_distance_meters: row.get("total_distance_meters"),
            })
            .collect();

        Ok(summaries)
    }
}
