use std::error::Error;

use datepoll_core::errors::{ScheduleError, ScheduleResult};
use datepoll_core::models::ScheduleStatus;

#[test]
fn test_schedule_error_display() {
    let validation = ScheduleError::Validation("Title must not be empty".to_string());
    let not_found = ScheduleError::NotFound("Schedule 42".to_string());
    let invalid_date = ScheduleError::InvalidDate("2030-01-01 10:00".to_string());
    let closed = ScheduleError::AlreadyClosed(ScheduleStatus::Confirmed);
    let storage = ScheduleError::Storage(eyre::eyre!("database is locked"));
    let configuration = ScheduleError::Configuration("DISCORD_TOKEN is not set".to_string());

    assert_eq!(validation.to_string(), "Validation error: Title must not be empty");
    assert_eq!(not_found.to_string(), "Resource not found: Schedule 42");
    assert_eq!(invalid_date.to_string(), "Invalid date: 2030-01-01 10:00");
    assert_eq!(closed.to_string(), "Schedule is already confirmed");
    assert!(storage.to_string().contains("Storage error:"));
    assert_eq!(
        configuration.to_string(),
        "Configuration error: DISCORD_TOKEN is not set"
    );
}

#[test]
fn test_user_facing_kinds() {
    assert!(ScheduleError::Validation("bad".to_string()).is_user_facing());
    assert!(ScheduleError::NotFound("gone".to_string()).is_user_facing());
    assert!(ScheduleError::InvalidDate("when".to_string()).is_user_facing());
    assert!(ScheduleError::AlreadyClosed(ScheduleStatus::Cancelled).is_user_facing());

    assert!(!ScheduleError::Storage(eyre::eyre!("disk I/O error")).is_user_facing());
    assert!(!ScheduleError::Configuration("missing".to_string()).is_user_facing());
}

#[test]
fn test_from_eyre_report() {
    fn fails() -> ScheduleResult<()> {
        let storage: eyre::Result<()> = Err(eyre::eyre!("constraint failed"));
        storage?;
        Ok(())
    }

    let err = fails().unwrap_err();
    assert!(matches!(err, ScheduleError::Storage(_)));
    assert!(err.to_string().contains("constraint failed"));
}

#[test]
fn test_storage_error_has_source() {
    let io_error = std::io::Error::new(std::io::ErrorKind::Other, "IO error");
    let err = ScheduleError::Storage(eyre::Report::new(io_error));

    assert!(err.source().is_some());
}
