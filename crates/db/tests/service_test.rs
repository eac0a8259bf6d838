use chrono::{DateTime, Duration, Utc};
use datepoll_core::errors::ScheduleError;
use datepoll_core::models::{NewSchedule, ScheduleStatus, VoteStatus};
use datepoll_core::service::ScheduleService;
use datepoll_core::validation::parse_candidate_dates;
use datepoll_db::repositories::ScheduleRepository;
use datepoll_db::Database;
use pretty_assertions::assert_eq;

async fn service() -> ScheduleService<ScheduleRepository> {
    let db = Database::in_memory().await.unwrap();
    ScheduleService::new(ScheduleRepository::new(db))
}

fn next_days(count: i64) -> Vec<DateTime<Utc>> {
    let input = (1..=count)
        .map(|i| (Utc::now() + Duration::days(i)).format("%Y-%m-%d 19:00").to_string())
        .collect::<Vec<_>>()
        .join("\n");
    parse_candidate_dates(&input, Utc::now()).unwrap()
}

fn request(title: &str, dates: Vec<DateTime<Utc>>) -> NewSchedule {
    NewSchedule {
        title: title.to_string(),
        description: Some("Weekly sync".to_string()),
        creator_id: 1234,
        channel_id: 5678,
        dates,
    }
}

#[tokio::test]
async fn test_create_then_get_matches_input() {
    let service = service().await;
    let dates = next_days(10);

    let id = service
        .create_schedule(request("Sync", dates.clone()), Utc::now())
        .await
        .unwrap();
    let schedule = service.get_schedule(id).await.unwrap();

    assert_eq!(schedule.title, "Sync");
    assert_eq!(schedule.description.as_deref(), Some("Weekly sync"));
    assert_eq!(schedule.creator_id, 1234);
    assert_eq!(schedule.channel_id, 5678);
    assert_eq!(schedule.status, ScheduleStatus::Active);
    assert!(!schedule.reminder_sent);
    assert!(schedule.votes.is_empty());
    assert_eq!(schedule.dates.iter().map(|d| d.date).collect::<Vec<_>>(), dates);
}

#[tokio::test]
async fn test_vote_flow_and_tally() {
    let service = service().await;
    let dates = next_days(2);
    let id = service
        .create_schedule(request("Dinner", dates.clone()), Utc::now())
        .await
        .unwrap();
    let date = dates[0];

    service.record_vote(id, 1, date, VoteStatus::Cross).await.unwrap();
    service.record_vote(id, 1, date, VoteStatus::Circle).await.unwrap();
    service.record_vote(id, 2, date, VoteStatus::Circle).await.unwrap();
    service.record_vote(id, 3, date, VoteStatus::Triangle).await.unwrap();
    service.record_vote(id, 4, date, VoteStatus::Cross).await.unwrap();

    let tally = service.get_schedule(id).await.unwrap().vote_count(date).unwrap();
    assert_eq!((tally.circle, tally.triangle, tally.cross), (2, 1, 1));

    let summaries = service.list_active_schedules().await.unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].dates[0].tally, tally);
    assert_eq!(summaries[0].dates[1].tally.total(), 0);
}

#[tokio::test]
async fn test_confirm_flow() {
    let service = service().await;
    let dates = next_days(3);
    let id = service
        .create_schedule(request("Trip", dates.clone()), Utc::now())
        .await
        .unwrap();

    let err = service
        .confirm_schedule(id, dates[0] + Duration::minutes(1))
        .await
        .unwrap_err();
    assert!(matches!(err, ScheduleError::InvalidDate(_)));

    service.confirm_schedule(id, dates[1]).await.unwrap();
    let schedule = service.get_schedule(id).await.unwrap();
    assert_eq!(schedule.status, ScheduleStatus::Confirmed);
    assert_eq!(schedule.confirmed_date, Some(dates[1]));

    let err = service.cancel_schedule(id).await.unwrap_err();
    assert!(matches!(err, ScheduleError::AlreadyClosed(ScheduleStatus::Confirmed)));
    let err = service
        .record_vote(id, 9, dates[0], VoteStatus::Circle)
        .await
        .unwrap_err();
    assert!(matches!(err, ScheduleError::AlreadyClosed(_)));

    assert!(service.list_active_schedules().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_operations_on_missing_schedule() {
    let service = service().await;
    let id = uuid::Uuid::new_v4();
    let date = next_days(1)[0];

    assert!(matches!(
        service.record_vote(id, 1, date, VoteStatus::Circle).await,
        Err(ScheduleError::NotFound(_))
    ));
    assert!(matches!(
        service.confirm_schedule(id, date).await,
        Err(ScheduleError::NotFound(_))
    ));
    assert!(matches!(
        service.cancel_schedule(id).await,
        Err(ScheduleError::NotFound(_))
    ));
    assert!(matches!(
        service.mark_reminder_sent(id, true).await,
        Err(ScheduleError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_invalid_create_leaves_nothing_behind() {
    let service = service().await;
    let mut dates = next_days(1);
    dates.push(Utc::now() - Duration::days(1));

    let err = service
        .create_schedule(request("Late", dates), Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, ScheduleError::Validation(_)));
    assert!(service.list_active_schedules().await.unwrap().is_empty());
}
