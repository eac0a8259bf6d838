use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::vote::{Vote, VoteStatus};

/// Per-status vote counts for one candidate date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub circle: usize,
    pub triangle: usize,
    pub cross: usize,
}

impl VoteTally {
    pub fn get(&self, status: VoteStatus) -> usize {
        match status {
            VoteStatus::Circle => self.circle,
            VoteStatus::Triangle => self.triangle,
            VoteStatus::Cross => self.cross,
        }
    }

    pub fn total(&self) -> usize {
        self.circle + self.triangle + self.cross
    }

    fn record(&mut self, status: VoteStatus) {
        match status {
            VoteStatus::Circle => self.circle += 1,
            VoteStatus::Triangle => self.triangle += 1,
            VoteStatus::Cross => self.cross += 1,
        }
    }
}

/// Count the votes cast for `date` across every user.
///
/// A user without a vote for `date` is not counted at all.
pub fn count_votes(
    votes: &BTreeMap<u64, BTreeMap<DateTime<Utc>, Vote>>,
    date: DateTime<Utc>,
) -> VoteTally {
    votes
        .values()
        .filter_map(|by_date| by_date.get(&date))
        .fold(VoteTally::default(), |mut tally, vote| {
            tally.record(vote.vote_status);
            tally
        })
}
