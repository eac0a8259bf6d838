use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ScheduleError;

/// A user's availability for one candidate date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum VoteStatus {
    /// Can attend.
    Circle,
    /// Maybe.
    Triangle,
    /// Cannot attend.
    Cross,
}

impl VoteStatus {
    pub const ALL: [VoteStatus; 3] = [VoteStatus::Circle, VoteStatus::Triangle, VoteStatus::Cross];

    /// Symbol stored in the database and shown in chat.
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteStatus::Circle => "⭕",
            VoteStatus::Triangle => "🔺",
            VoteStatus::Cross => "❌",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VoteStatus::Circle => "can attend",
            VoteStatus::Triangle => "maybe",
            VoteStatus::Cross => "cannot attend",
        }
    }
}

impl fmt::Display for VoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteStatus {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "⭕" => return Ok(VoteStatus::Circle),
            "🔺" => return Ok(VoteStatus::Triangle),
            "❌" => return Ok(VoteStatus::Cross),
            _ => {}
        }

        match s.trim().to_ascii_lowercase().as_str() {
            "circle" => Ok(VoteStatus::Circle),
            "triangle" => Ok(VoteStatus::Triangle),
            "cross" => Ok(VoteStatus::Cross),
            other => Err(ScheduleError::Validation(format!(
                "Unknown vote status: {}",
                other
            ))),
        }
    }
}

impl TryFrom<String> for VoteStatus {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<VoteStatus> for String {
    fn from(status: VoteStatus) -> Self {
        status.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    /// Assigned by storage, `None` until persisted.
    pub id: Option<i64>,
    pub schedule_id: Uuid,
    pub user_id: u64,
    pub date: DateTime<Utc>,
    pub vote_status: VoteStatus,
    /// Restamped on every re-vote, so it doubles as "last updated".
    pub created_at: DateTime<Utc>,
}

impl Vote {
    pub fn new(schedule_id: Uuid, user_id: u64, date: DateTime<Utc>, vote_status: VoteStatus) -> Self {
        Self {
            id: None,
            schedule_id,
            user_id,
            date,
            vote_status,
            created_at: Utc::now(),
        }
    }
}
