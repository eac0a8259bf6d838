use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{Schedule, Vote};

/// Durable storage for schedule aggregates.
///
/// Implementations report storage faults as `eyre` reports; the service maps
/// them onto [`crate::errors::ScheduleError::Storage`].
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Persist the header and every candidate date atomically.
    async fn create_schedule(&self, schedule: &Schedule) -> eyre::Result<Uuid>;

    /// Reassemble the full aggregate, `None` when the id is unknown.
    async fn get_schedule(&self, id: Uuid) -> eyre::Result<Option<Schedule>>;

    /// Insert or overwrite the vote keyed by (schedule, user, date). Returns
    /// `false` when no active schedule with that id exists.
    async fn update_vote(&self, vote: &Vote) -> eyre::Result<bool>;

    /// Move an active schedule to confirmed. Returns `false` when no active
    /// schedule with that id exists.
    async fn confirm_schedule(&self, id: Uuid, confirmed_date: DateTime<Utc>) -> eyre::Result<bool>;

    /// Move an active schedule to cancelled. Returns `false` when no active
    /// schedule with that id exists.
    async fn cancel_schedule(&self, id: Uuid) -> eyre::Result<bool>;

    async fn get_active_schedules(&self) -> eyre::Result<Vec<Schedule>>;

    /// Returns `false` when the schedule does not exist.
    async fn update_reminder_sent(&self, id: Uuid, sent: bool) -> eyre::Result<bool>;
}
