use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use datepoll_core::models::{CandidateDate, Schedule, ScheduleStatus, Vote, VoteStatus};
use eyre::{eyre, Result, WrapErr};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ScheduleRow {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub creator_id: i64,
    pub channel_id: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub confirmed_date: Option<DateTime<Utc>>,
    pub reminder_sent: bool,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct CandidateDateRow {
    pub id: i64,
    pub schedule_id: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct VoteRow {
    pub id: i64,
    pub schedule_id: String,
    pub user_id: i64,
    pub date: DateTime<Utc>,
    pub vote_status: String,
    pub created_at: DateTime<Utc>,
}

/// Platform ids are u64 but SQLite integers are signed; the bit pattern is
/// stored unchanged.
pub fn snowflake_to_db(id: u64) -> i64 {
    id as i64
}

pub fn snowflake_from_db(id: i64) -> u64 {
    id as u64
}

/// Rebuild the aggregate from its three row sets.
///
/// Dates come out ascending and votes keyed by user then date, whatever
/// order the rows arrive in. Rows belonging to another schedule are an error.
pub fn assemble_schedule(
    header: ScheduleRow,
    dates: Vec<CandidateDateRow>,
    votes: Vec<VoteRow>,
) -> Result<Schedule> {
    let id = parse_id(&header.id)?;
    let status: ScheduleStatus = header
        .status
        .parse()
        .wrap_err_with(|| format!("Corrupt status for schedule {}", id))?;

    let mut dates = dates
        .into_iter()
        .map(|row| {
            ensure_owner(id, &row.schedule_id)?;
            Ok(CandidateDate {
                id: Some(row.id),
                schedule_id: id,
                date: row.date,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    dates.sort_by_key(|candidate| candidate.date);

    let mut by_user: BTreeMap<u64, BTreeMap<DateTime<Utc>, Vote>> = BTreeMap::new();
    for row in votes {
        ensure_owner(id, &row.schedule_id)?;
        let vote_status: VoteStatus = row
            .vote_status
            .parse()
            .wrap_err_with(|| format!("Corrupt vote {} for schedule {}", row.id, id))?;
        let user_id = snowflake_from_db(row.user_id);

        by_user.entry(user_id).or_default().insert(
            row.date,
            Vote {
                id: Some(row.id),
                schedule_id: id,
                user_id,
                date: row.date,
                vote_status,
                created_at: row.created_at,
            },
        );
    }

    Ok(Schedule {
        id,
        title: header.title,
        description: header.description,
        creator_id: snowflake_from_db(header.creator_id),
        channel_id: snowflake_from_db(header.channel_id),
        status,
        created_at: header.created_at,
        confirmed_date: header.confirmed_date,
        reminder_sent: header.reminder_sent,
        dates,
        votes: by_user,
    })
}

pub(crate) fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).wrap_err_with(|| format!("Corrupt schedule id: {}", raw))
}

fn ensure_owner(id: Uuid, schedule_id: &str) -> Result<()> {
    if parse_id(schedule_id)? != id {
        return Err(eyre!("Row of schedule {} mixed into schedule {}", schedule_id, id));
    }
    Ok(())
}
