use async_trait::async_trait;
use chrono::{DateTime, Utc};
use datepoll_core::models::{Schedule, ScheduleStatus, Vote};
use datepoll_core::store::ScheduleStore;
use eyre::{Result, WrapErr};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::{
    assemble_schedule, parse_id, snowflake_to_db, CandidateDateRow, ScheduleRow, VoteRow,
};
use crate::Database;

/// SQLite-backed [`ScheduleStore`].
#[derive(Debug, Clone)]
pub struct ScheduleRepository {
    db: Database,
}

impl ScheduleRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl ScheduleStore for ScheduleRepository {
    async fn create_schedule(&self, schedule: &Schedule) -> Result<Uuid> {
        debug!(
            "Creating schedule: id={}, title={}, dates={}",
            schedule.id,
            schedule.title,
            schedule.dates.len()
        );

        let id = schedule.id.to_string();
        let mut tx = self.db.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO schedules (
                id, title, description, creator_id, channel_id,
                status, created_at, confirmed_date, reminder_sent
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&schedule.title)
        .bind(schedule.description.as_deref())
        .bind(snowflake_to_db(schedule.creator_id))
        .bind(snowflake_to_db(schedule.channel_id))
        .bind(schedule.status.as_str())
        .bind(schedule.created_at)
        .bind(schedule.confirmed_date)
        .bind(schedule.reminder_sent)
        .execute(&mut *tx)
        .await
        .wrap_err("Failed to insert schedule")?;

        for candidate in &schedule.dates {
            sqlx::query("INSERT INTO schedule_dates (schedule_id, date) VALUES (?, ?)")
                .bind(&id)
                .bind(candidate.date)
                .execute(&mut *tx)
                .await
                .wrap_err("Failed to insert candidate date")?;
        }

        tx.commit().await.wrap_err("Failed to commit schedule")?;

        debug!("Schedule created successfully: id={}", schedule.id);
        Ok(schedule.id)
    }

    async fn get_schedule(&self, id: Uuid) -> Result<Option<Schedule>> {
        let key = id.to_string();
        // One checked-out connection for all three reads, so no write lands
        // between them.
        let mut conn = self.db.pool().acquire().await?;

        let header = sqlx::query_as::<_, ScheduleRow>(
            r#"
            SELECT id, title, description, creator_id, channel_id,
                   status, created_at, confirmed_date, reminder_sent
            FROM schedules
            WHERE id = ?
            "#,
        )
        .bind(&key)
        .fetch_optional(&mut *conn)
        .await?;

        let Some(header) = header else {
            debug!("Schedule not found: id={}", id);
            return Ok(None);
        };

        let dates = sqlx::query_as::<_, CandidateDateRow>(
            r#"
            SELECT id, schedule_id, date
            FROM schedule_dates
            WHERE schedule_id = ?
            ORDER BY date ASC
            "#,
        )
        .bind(&key)
        .fetch_all(&mut *conn)
        .await?;

        let votes = sqlx::query_as::<_, VoteRow>(
            r#"
            SELECT id, schedule_id, user_id, date, vote_status, created_at
            FROM votes
            WHERE schedule_id = ?
            "#,
        )
        .bind(&key)
        .fetch_all(&mut *conn)
        .await?;

        assemble_schedule(header, dates, votes).map(Some)
    }

    async fn update_vote(&self, vote: &Vote) -> Result<bool> {
        let id = vote.schedule_id.to_string();

        // Only written while the schedule is active.
        let result = sqlx::query(
            r#"
            INSERT INTO votes (schedule_id, user_id, date, vote_status, created_at)
            SELECT ?, ?, ?, ?, ?
            WHERE EXISTS (SELECT 1 FROM schedules WHERE id = ? AND status = ?)
            ON CONFLICT (schedule_id, user_id, date)
            DO UPDATE SET vote_status = excluded.vote_status, created_at = excluded.created_at
            "#,
        )
        .bind(&id)
        .bind(snowflake_to_db(vote.user_id))
        .bind(vote.date)
        .bind(vote.vote_status.as_str())
        .bind(vote.created_at)
        .bind(&id)
        .bind(ScheduleStatus::Active.as_str())
        .execute(self.db.pool())
        .await
        .wrap_err("Failed to upsert vote")?;

        Ok(result.rows_affected() == 1)
    }

    async fn confirm_schedule(&self, id: Uuid, confirmed_date: DateTime<Utc>) -> Result<bool> {
        let mut tx = self.db.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE schedules
            SET status = ?, confirmed_date = ?
            WHERE id = ? AND status = ?
            "#,
        )
        .bind(ScheduleStatus::Confirmed.as_str())
        .bind(confirmed_date)
        .bind(id.to_string())
        .bind(ScheduleStatus::Active.as_str())
        .execute(&mut *tx)
        .await
        .wrap_err("Failed to confirm schedule")?;

        tx.commit().await?;
        Ok(result.rows_affected() == 1)
    }

    async fn cancel_schedule(&self, id: Uuid) -> Result<bool> {
        let mut tx = self.db.begin().await?;

        let result = sqlx::query("UPDATE schedules SET status = ? WHERE id = ? AND status = ?")
            .bind(ScheduleStatus::Cancelled.as_str())
            .bind(id.to_string())
            .bind(ScheduleStatus::Active.as_str())
            .execute(&mut *tx)
            .await
            .wrap_err("Failed to cancel schedule")?;

        tx.commit().await?;
        Ok(result.rows_affected() == 1)
    }

    async fn get_active_schedules(&self) -> Result<Vec<Schedule>> {
        let ids = sqlx::query_scalar::<_, String>(
            "SELECT id FROM schedules WHERE status = ? ORDER BY created_at ASC",
        )
        .bind(ScheduleStatus::Active.as_str())
        .fetch_all(self.db.pool())
        .await?;

        let mut schedules = Vec::with_capacity(ids.len());
        for raw in ids {
            let id = parse_id(&raw)?;
            match self.get_schedule(id).await? {
                Some(schedule) => schedules.push(schedule),
                None => warn!("Active schedule vanished while listing: id={}", id),
            }
        }

        Ok(schedules)
    }

    async fn update_reminder_sent(&self, id: Uuid, sent: bool) -> Result<bool> {
        let mut tx = self.db.begin().await?;

        let result = sqlx::query("UPDATE schedules SET reminder_sent = ? WHERE id = ?")
            .bind(sent)
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .wrap_err("Failed to update reminder flag")?;

        tx.commit().await?;
        Ok(result.rows_affected() == 1)
    }
}
