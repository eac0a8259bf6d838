pub mod schedule;
pub mod tally;
pub mod vote;

pub use schedule::{CandidateDate, DateTally, NewSchedule, Schedule, ScheduleStatus, ScheduleSummary};
pub use tally::{count_votes, VoteTally};
pub use vote::{Vote, VoteStatus};
