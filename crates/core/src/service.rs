use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::{ScheduleError, ScheduleResult};
use crate::models::{NewSchedule, Schedule, ScheduleSummary, Vote, VoteStatus};
use crate::store::ScheduleStore;
use crate::validation::validate_new_schedule;

/// User-facing schedule operations.
///
/// Every mutation loads the aggregate, applies the domain rule, then
/// persists. The store guards terminal transitions again, so a concurrent
/// confirm/cancel that wins the race is reported as [`ScheduleError::AlreadyClosed`].
pub struct ScheduleService<S> {
    store: S,
}

impl<S: ScheduleStore> ScheduleService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate the request against `now` and persist a new active schedule.
    pub async fn create_schedule(&self, request: NewSchedule, now: DateTime<Utc>) -> ScheduleResult<Uuid> {
        let request = validate_new_schedule(request, now)?;
        let schedule = Schedule::create(
            request.title,
            request.description,
            request.creator_id,
            request.channel_id,
            request.dates,
        );

        let id = self.store.create_schedule(&schedule).await?;
        info!(
            "Created schedule: id={}, creator={}, dates={}",
            id,
            schedule.creator_id,
            schedule.dates.len()
        );
        Ok(id)
    }

    pub async fn get_schedule(&self, id: Uuid) -> ScheduleResult<Schedule> {
        self.store
            .get_schedule(id)
            .await?
            .ok_or_else(|| ScheduleError::NotFound(format!("Schedule {}", id)))
    }

    pub async fn list_active_schedules(&self) -> ScheduleResult<Vec<ScheduleSummary>> {
        let schedules = self.store.get_active_schedules().await?;
        debug!("Listing {} active schedules", schedules.len());
        Ok(schedules.iter().map(Schedule::summary).collect())
    }

    pub async fn record_vote(
        &self,
        id: Uuid,
        user_id: u64,
        date: DateTime<Utc>,
        status: VoteStatus,
    ) -> ScheduleResult<Vote> {
        let mut schedule = self.get_schedule(id).await?;
        let vote = schedule.add_vote(user_id, date, status)?.clone();

        if !self.store.update_vote(&vote).await? {
            return Err(self.closed_error(id).await);
        }
        debug!("Recorded vote: schedule={}, user={}, status={}", id, user_id, status);
        Ok(vote)
    }

    pub async fn confirm_schedule(&self, id: Uuid, date: DateTime<Utc>) -> ScheduleResult<Schedule> {
        let mut schedule = self.get_schedule(id).await?;
        schedule.confirm_date(date)?;

        if !self.store.confirm_schedule(id, date).await? {
            return Err(self.closed_error(id).await);
        }

        info!("Confirmed schedule: id={}, date={}", id, date);
        Ok(schedule)
    }

    pub async fn cancel_schedule(&self, id: Uuid) -> ScheduleResult<Schedule> {
        let mut schedule = self.get_schedule(id).await?;
        schedule.cancel()?;

        if !self.store.cancel_schedule(id).await? {
            return Err(self.closed_error(id).await);
        }

        info!("Cancelled schedule: id={}", id);
        Ok(schedule)
    }

    /// Set the reminder flag. Repeating the same value is harmless.
    pub async fn mark_reminder_sent(&self, id: Uuid, sent: bool) -> ScheduleResult<()> {
        if !self.store.update_reminder_sent(id, sent).await? {
            return Err(ScheduleError::NotFound(format!("Schedule {}", id)));
        }
        Ok(())
    }

    // The guarded update matched nothing: find out why.
    async fn closed_error(&self, id: Uuid) -> ScheduleError {
        match self.store.get_schedule(id).await {
            Ok(Some(schedule)) => ScheduleError::AlreadyClosed(schedule.status),
            Ok(None) => ScheduleError::NotFound(format!("Schedule {}", id)),
            Err(e) => ScheduleError::Storage(e),
        }
    }
}
