use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::mock;
use uuid::Uuid;

use crate::models::{Schedule, Vote};
use crate::store::ScheduleStore;

// Generates `MockScheduleStore`.
mock! {
    pub ScheduleStore {}

    #[async_trait]
    impl ScheduleStore for ScheduleStore {
        async fn create_schedule(&self, schedule: &Schedule) -> eyre::Result<Uuid>;

        async fn get_schedule(&self, id: Uuid) -> eyre::Result<Option<Schedule>>;

        async fn update_vote(&self, vote: &Vote) -> eyre::Result<bool>;

        async fn confirm_schedule(
            &self,
            id: Uuid,
            confirmed_date: DateTime<Utc>,
        ) -> eyre::Result<bool>;

        async fn cancel_schedule(&self, id: Uuid) -> eyre::Result<bool>;

        async fn get_active_schedules(&self) -> eyre::Result<Vec<Schedule>>;

        async fn update_reminder_sent(&self, id: Uuid, sent: bool) -> eyre::Result<bool>;
    }
}
