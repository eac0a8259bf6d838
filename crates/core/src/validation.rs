//! Input checks applied before a schedule reaches the domain model.
//!
//! Candidate dates are entered one per line as `YYYY-MM-DD HH:MM` and read
//! as UTC. Every check reports a [`ScheduleError::Validation`].

use std::collections::HashSet;

use chrono::{DateTime, NaiveDateTime, TimeZone, Timelike, Utc};

use crate::errors::{ScheduleError, ScheduleResult};
use crate::models::NewSchedule;

pub const MAX_CANDIDATE_DATES: usize = 10;
pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 1000;

pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn validate_title(title: &str) -> ScheduleResult<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ScheduleError::Validation("Title must not be empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ScheduleError::Validation(format!(
            "Title must be at most {} characters",
            MAX_TITLE_LEN
        )));
    }
    Ok(title.to_string())
}

/// Blank descriptions are normalized to `None`.
pub fn validate_description(description: Option<&str>) -> ScheduleResult<Option<String>> {
    let Some(description) = description.map(str::trim).filter(|d| !d.is_empty()) else {
        return Ok(None);
    };
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ScheduleError::Validation(format!(
            "Description must be at most {} characters",
            MAX_DESCRIPTION_LEN
        )));
    }
    Ok(Some(description.to_string()))
}

/// Parse the candidate-date text area: one timestamp per non-blank line.
pub fn parse_candidate_dates(input: &str, now: DateTime<Utc>) -> ScheduleResult<Vec<DateTime<Utc>>> {
    let lines: Vec<&str> = input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    check_count(lines.len())?;

    let dates = lines
        .into_iter()
        .map(parse_date_line)
        .collect::<ScheduleResult<Vec<_>>>()?;

    validate_candidate_dates(&dates, now)?;
    Ok(dates)
}

/// Parse a single `YYYY-MM-DD HH:MM` value as UTC.
pub fn parse_date_line(line: &str) -> ScheduleResult<DateTime<Utc>> {
    let line = line.trim();
    if !has_date_shape(line) {
        return Err(ScheduleError::Validation(format!(
            "Malformed date: {} (expected YYYY-MM-DD HH:MM)",
            line
        )));
    }

    let naive = NaiveDateTime::parse_from_str(line, DATE_INPUT_FORMAT)
        .map_err(|e| ScheduleError::Validation(format!("Invalid date: {} ({})", line, e)))?;

    Ok(Utc.from_utc_datetime(&naive))
}

/// Count, precision, future and uniqueness rules for candidate dates.
pub fn validate_candidate_dates(dates: &[DateTime<Utc>], now: DateTime<Utc>) -> ScheduleResult<()> {
    check_count(dates.len())?;

    let mut seen = HashSet::with_capacity(dates.len());
    for date in dates {
        let shown = date.format(DATE_INPUT_FORMAT);
        if date.second() != 0 || date.nanosecond() != 0 {
            return Err(ScheduleError::Validation(format!(
                "Candidate dates must be whole minutes: {}",
                date
            )));
        }
        if *date <= now {
            return Err(ScheduleError::Validation(format!(
                "Candidate date is not in the future: {}",
                shown
            )));
        }
        if !seen.insert(*date) {
            return Err(ScheduleError::Validation(format!(
                "Duplicate candidate date: {}",
                shown
            )));
        }
    }

    Ok(())
}

/// Validate and normalize a create request.
pub fn validate_new_schedule(request: NewSchedule, now: DateTime<Utc>) -> ScheduleResult<NewSchedule> {
    let title = validate_title(&request.title)?;
    let description = validate_description(request.description.as_deref())?;
    validate_candidate_dates(&request.dates, now)?;

    Ok(NewSchedule {
        title,
        description,
        ..request
    })
}

fn check_count(count: usize) -> ScheduleResult<()> {
    if count == 0 {
        return Err(ScheduleError::Validation(
            "At least one candidate date is required".to_string(),
        ));
    }
    if count > MAX_CANDIDATE_DATES {
        return Err(ScheduleError::Validation(format!(
            "At most {} candidate dates are allowed",
            MAX_CANDIDATE_DATES
        )));
    }
    Ok(())
}

// chrono accepts unpadded fields, the input format does not.
fn has_date_shape(line: &str) -> bool {
    let bytes = line.as_bytes();
    bytes.len() == 16
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            10 => *b == b' ',
            13 => *b == b':',
            _ => b.is_ascii_digit(),
        })
}
