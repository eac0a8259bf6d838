use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::tally::{count_votes, VoteTally};
use super::vote::{Vote, VoteStatus};
use crate::errors::{ScheduleError, ScheduleResult};

/// Lifecycle state of a schedule. `Confirmed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    Active,
    Confirmed,
    Cancelled,
}

impl ScheduleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleStatus::Active => "active",
            ScheduleStatus::Confirmed => "confirmed",
            ScheduleStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ScheduleStatus::Active)
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScheduleStatus {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ScheduleStatus::Active),
            "confirmed" => Ok(ScheduleStatus::Confirmed),
            "cancelled" => Ok(ScheduleStatus::Cancelled),
            other => Err(ScheduleError::Validation(format!(
                "Unknown schedule status: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateDate {
    /// Assigned by storage, `None` until persisted.
    pub id: Option<i64>,
    pub schedule_id: Uuid,
    pub date: DateTime<Utc>,
}

/// The schedule aggregate: header, candidate dates and votes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub creator_id: u64,
    pub channel_id: u64,
    pub status: ScheduleStatus,
    pub created_at: DateTime<Utc>,
    pub confirmed_date: Option<DateTime<Utc>>,
    pub reminder_sent: bool,
    /// Ordered by date, ascending.
    pub dates: Vec<CandidateDate>,
    /// user id -> candidate date -> vote
    pub votes: BTreeMap<u64, BTreeMap<DateTime<Utc>, Vote>>,
}

impl Schedule {
    /// Build a fresh, active schedule. Input shape is validated by the caller
    /// (see [`crate::validation`]).
    pub fn create(
        title: impl Into<String>,
        description: Option<String>,
        creator_id: u64,
        channel_id: u64,
        mut dates: Vec<DateTime<Utc>>,
    ) -> Self {
        let id = Uuid::new_v4();
        dates.sort();

        Self {
            id,
            title: title.into(),
            description,
            creator_id,
            channel_id,
            status: ScheduleStatus::Active,
            created_at: Utc::now(),
            confirmed_date: None,
            reminder_sent: false,
            dates: dates
                .into_iter()
                .map(|date| CandidateDate {
                    id: None,
                    schedule_id: id,
                    date,
                })
                .collect(),
            votes: BTreeMap::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ScheduleStatus::Active
    }

    pub fn has_date(&self, date: DateTime<Utc>) -> bool {
        self.dates.iter().any(|candidate| candidate.date == date)
    }

    pub fn vote_of(&self, user_id: u64, date: DateTime<Utc>) -> Option<&Vote> {
        self.votes.get(&user_id).and_then(|by_date| by_date.get(&date))
    }

    /// Number of distinct users with at least one vote.
    pub fn voter_count(&self) -> usize {
        self.votes.values().filter(|by_date| !by_date.is_empty()).count()
    }

    /// Record or replace a user's vote for one candidate date and return the
    /// stored vote. The previous vote, if any, is overwritten.
    pub fn add_vote(
        &mut self,
        user_id: u64,
        date: DateTime<Utc>,
        status: VoteStatus,
    ) -> ScheduleResult<&Vote> {
        self.ensure_active()?;
        self.ensure_candidate(date)?;

        let vote = Vote::new(self.id, user_id, date, status);
        let by_date = self.votes.entry(user_id).or_default();
        by_date.insert(date, vote);

        Ok(&by_date[&date])
    }

    /// Tally the votes for a candidate date. Dates outside the candidate set
    /// are rejected rather than reported as zero.
    pub fn vote_count(&self, date: DateTime<Utc>) -> ScheduleResult<VoteTally> {
        self.ensure_candidate(date)?;
        Ok(count_votes(&self.votes, date))
    }

    pub fn confirm_date(&mut self, date: DateTime<Utc>) -> ScheduleResult<()> {
        self.ensure_active()?;
        self.ensure_candidate(date)?;

        self.status = ScheduleStatus::Confirmed;
        self.confirmed_date = Some(date);
        Ok(())
    }

    pub fn cancel(&mut self) -> ScheduleResult<()> {
        self.ensure_active()?;

        self.status = ScheduleStatus::Cancelled;
        Ok(())
    }

    pub fn summary(&self) -> ScheduleSummary {
        ScheduleSummary {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            creator_id: self.creator_id,
            status: self.status,
            dates: self
                .dates
                .iter()
                .map(|candidate| DateTally {
                    date: candidate.date,
                    tally: count_votes(&self.votes, candidate.date),
                })
                .collect(),
        }
    }

    fn ensure_active(&self) -> ScheduleResult<()> {
        if self.status.is_terminal() {
            return Err(ScheduleError::AlreadyClosed(self.status));
        }
        Ok(())
    }

    fn ensure_candidate(&self, date: DateTime<Utc>) -> ScheduleResult<()> {
        if !self.has_date(date) {
            return Err(ScheduleError::InvalidDate(format!(
                "{} is not a candidate date of schedule {}",
                date.format("%Y-%m-%d %H:%M"),
                self.id
            )));
        }
        Ok(())
    }
}

/// Listing view of a schedule with tallies per candidate date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub creator_id: u64,
    pub status: ScheduleStatus,
    pub dates: Vec<DateTally>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTally {
    pub date: DateTime<Utc>,
    pub tally: VoteTally,
}

/// Input of the create operation, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSchedule {
    pub title: String,
    pub description: Option<String>,
    pub creator_id: u64,
    pub channel_id: u64,
    pub dates: Vec<DateTime<Utc>>,
}
