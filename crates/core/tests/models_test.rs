use chrono::{DateTime, Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use serde_json::{from_str, to_string};
use datepoll_core::errors::ScheduleError;
use datepoll_core::models::{Schedule, ScheduleStatus, VoteStatus, VoteTally};

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 6, day, hour, 0, 0).unwrap()
}

#[fixture]
fn sample_dates() -> Vec<DateTime<Utc>> {
    vec![at(3, 19), at(1, 19), at(2, 19)]
}

#[fixture]
fn schedule(sample_dates: Vec<DateTime<Utc>>) -> Schedule {
    Schedule::create(
        "Team dinner",
        Some("Somewhere near the station".to_string()),
        123456789,
        987654321,
        sample_dates,
    )
}

#[rstest]
fn test_schedule_creation(schedule: Schedule) {
    assert_eq!(schedule.title, "Team dinner");
    assert_eq!(schedule.description.as_deref(), Some("Somewhere near the station"));
    assert_eq!(schedule.creator_id, 123456789);
    assert_eq!(schedule.channel_id, 987654321);
    assert_eq!(schedule.status, ScheduleStatus::Active);
    assert_eq!(schedule.confirmed_date, None);
    assert!(!schedule.reminder_sent);
    assert!(schedule.votes.is_empty());

    let dates: Vec<_> = schedule.dates.iter().map(|d| d.date).collect();
    assert_eq!(dates, vec![at(1, 19), at(2, 19), at(3, 19)]);
    assert!(schedule.dates.iter().all(|d| d.schedule_id == schedule.id && d.id.is_none()));
}

#[test]
fn test_schedule_ids_are_unique() {
    let a = Schedule::create("a", None, 1, 1, vec![at(1, 10)]);
    let b = Schedule::create("b", None, 1, 1, vec![at(1, 10)]);
    assert_ne!(a.id, b.id);
}

#[rstest]
fn test_revote_overwrites(mut schedule: Schedule) {
    let user_id = 111222333;

    schedule.add_vote(user_id, at(1, 19), VoteStatus::Circle).unwrap();
    let first_stamp = schedule.vote_of(user_id, at(1, 19)).unwrap().created_at;

    schedule.add_vote(user_id, at(1, 19), VoteStatus::Cross).unwrap();
    let vote = schedule.vote_of(user_id, at(1, 19)).unwrap();

    assert_eq!(vote.vote_status, VoteStatus::Cross);
    assert!(vote.created_at >= first_stamp);
    assert_eq!(schedule.votes[&user_id].len(), 1);
    assert_eq!(schedule.voter_count(), 1);
}

#[rstest]
fn test_vote_on_unknown_date_is_rejected(mut schedule: Schedule) {
    let err = schedule.add_vote(1, at(4, 19), VoteStatus::Circle).unwrap_err();
    assert!(matches!(err, ScheduleError::InvalidDate(_)));
    assert!(schedule.votes.is_empty());
}

#[rstest]
fn test_vote_tally(mut schedule: Schedule) {
    let date = at(2, 19);
    schedule.add_vote(1, date, VoteStatus::Circle).unwrap();
    schedule.add_vote(2, date, VoteStatus::Circle).unwrap();
    schedule.add_vote(3, date, VoteStatus::Triangle).unwrap();
    schedule.add_vote(4, date, VoteStatus::Cross).unwrap();
    schedule.add_vote(4, at(1, 19), VoteStatus::Circle).unwrap();

    let tally = schedule.vote_count(date).unwrap();
    assert_eq!(
        tally,
        VoteTally {
            circle: 2,
            triangle: 1,
            cross: 1
        }
    );
    assert_eq!(tally.get(VoteStatus::Circle), 2);
    assert_eq!(tally.total(), 4);

    assert_eq!(schedule.vote_count(at(3, 19)).unwrap(), VoteTally::default());
}

#[rstest]
fn test_vote_count_for_unknown_date_is_an_error(schedule: Schedule) {
    let err = schedule.vote_count(at(9, 9)).unwrap_err();
    assert!(matches!(err, ScheduleError::InvalidDate(_)));
}

#[rstest]
fn test_confirm_date(mut schedule: Schedule) {
    schedule.confirm_date(at(2, 19)).unwrap();

    assert_eq!(schedule.status, ScheduleStatus::Confirmed);
    assert_eq!(schedule.confirmed_date, Some(at(2, 19)));
}

#[rstest]
fn test_confirm_requires_candidate_date(mut schedule: Schedule) {
    let err = schedule.confirm_date(at(2, 20)).unwrap_err();

    assert!(matches!(err, ScheduleError::InvalidDate(_)));
    assert_eq!(schedule.status, ScheduleStatus::Active);
    assert_eq!(schedule.confirmed_date, None);
}

#[rstest]
fn test_terminal_states_reject_transitions(mut schedule: Schedule) {
    schedule.confirm_date(at(1, 19)).unwrap();

    let err = schedule.cancel().unwrap_err();
    assert!(matches!(err, ScheduleError::AlreadyClosed(ScheduleStatus::Confirmed)));

    let err = schedule.confirm_date(at(3, 19)).unwrap_err();
    assert!(matches!(err, ScheduleError::AlreadyClosed(ScheduleStatus::Confirmed)));

    let err = schedule.add_vote(1, at(1, 19), VoteStatus::Circle).unwrap_err();
    assert!(matches!(err, ScheduleError::AlreadyClosed(_)));

    assert_eq!(schedule.status, ScheduleStatus::Confirmed);
    assert_eq!(schedule.confirmed_date, Some(at(1, 19)));
}

#[rstest]
fn test_cancel_is_terminal(mut schedule: Schedule) {
    schedule.cancel().unwrap();
    assert_eq!(schedule.status, ScheduleStatus::Cancelled);
    assert_eq!(schedule.confirmed_date, None);

    let err = schedule.confirm_date(at(1, 19)).unwrap_err();
    assert!(matches!(err, ScheduleError::AlreadyClosed(ScheduleStatus::Cancelled)));
    assert!(schedule.cancel().is_err());
    assert_eq!(schedule.confirmed_date, None);
}

#[rstest]
fn test_summary_tallies_every_date(mut schedule: Schedule) {
    schedule.add_vote(7, at(3, 19), VoteStatus::Triangle).unwrap();

    let summary = schedule.summary();
    assert_eq!(summary.title, "Team dinner");
    assert_eq!(summary.dates.len(), 3);
    assert_eq!(summary.dates[0].tally, VoteTally::default());
    assert_eq!(summary.dates[2].tally.triangle, 1);
}

#[rstest]
#[case(VoteStatus::Circle, "⭕")]
#[case(VoteStatus::Triangle, "🔺")]
#[case(VoteStatus::Cross, "❌")]
fn test_vote_status_wire_symbols(#[case] status: VoteStatus, #[case] symbol: &str) {
    assert_eq!(status.as_str(), symbol);
    assert_eq!(symbol.parse::<VoteStatus>().unwrap(), status);
    assert_eq!(to_string(&status).unwrap(), format!("\"{}\"", symbol));
}

#[rstest]
#[case("circle", VoteStatus::Circle)]
#[case("Triangle", VoteStatus::Triangle)]
#[case(" CROSS ", VoteStatus::Cross)]
fn test_vote_status_accepts_names(#[case] input: &str, #[case] expected: VoteStatus) {
    assert_eq!(input.parse::<VoteStatus>().unwrap(), expected);
}

#[test]
fn test_vote_status_rejects_unknown() {
    assert!("yes".parse::<VoteStatus>().is_err());
    assert!(from_str::<VoteStatus>("\"👍\"").is_err());
}

#[rstest]
#[case(ScheduleStatus::Active, "active")]
#[case(ScheduleStatus::Confirmed, "confirmed")]
#[case(ScheduleStatus::Cancelled, "cancelled")]
fn test_schedule_status_strings(#[case] status: ScheduleStatus, #[case] value: &str) {
    assert_eq!(status.to_string(), value);
    assert_eq!(value.parse::<ScheduleStatus>().unwrap(), status);
    assert_eq!(to_string(&status).unwrap(), format!("\"{}\"", value));
    assert_eq!(status.is_terminal(), status != ScheduleStatus::Active);
}

#[rstest]
fn test_schedule_serialization(mut schedule: Schedule) {
    schedule.add_vote(5, at(1, 19), VoteStatus::Circle).unwrap();

    let json = to_string(&schedule).expect("Failed to serialize schedule");
    let deserialized: Schedule = from_str(&json).expect("Failed to deserialize schedule");

    assert_eq!(deserialized, schedule);
}

#[test]
fn test_created_at_is_now() {
    let before = Utc::now();
    let schedule = Schedule::create("t", None, 1, 2, vec![at(1, 1)]);
    assert!(schedule.created_at >= before);
    assert!(schedule.created_at <= Utc::now() + Duration::seconds(1));
}
