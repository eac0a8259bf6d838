use thiserror::Error;

use crate::models::ScheduleStatus;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Schedule is already {0}")]
    AlreadyClosed(ScheduleStatus),

    #[error("Storage error: {0}")]
    Storage(#[from] eyre::Report),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ScheduleError {
    /// Whether the message can be shown to the user as is.
    ///
    /// Storage and configuration failures are logged and replaced by a
    /// generic message at the adapter boundary.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            ScheduleError::Validation(_)
                | ScheduleError::NotFound(_)
                | ScheduleError::InvalidDate(_)
                | ScheduleError::AlreadyClosed(_)
        )
    }
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
