use eyre::{Result, WrapErr};
use sqlx::{Pool, Sqlite};
use tracing::info;

const SCHEMA: &[&str] = &[
    // One row per schedule. A confirmed date exists exactly when confirmed.
    r#"
    CREATE TABLE IF NOT EXISTS schedules (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        description TEXT,
        creator_id INTEGER NOT NULL,
        channel_id INTEGER NOT NULL,
        status TEXT NOT NULL CHECK (status IN ('active', 'confirmed', 'cancelled')),
        created_at TIMESTAMP NOT NULL,
        confirmed_date TIMESTAMP,
        reminder_sent BOOLEAN NOT NULL DEFAULT FALSE,
        CHECK ((status = 'confirmed') = (confirmed_date IS NOT NULL))
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS schedule_dates (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        schedule_id TEXT NOT NULL REFERENCES schedules(id),
        date TIMESTAMP NOT NULL,
        UNIQUE (schedule_id, date)
    )
    "#,
    // At most one vote per user and candidate date; the vote must point at
    // an existing candidate date of the same schedule.
    r#"
    CREATE TABLE IF NOT EXISTS votes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        schedule_id TEXT NOT NULL REFERENCES schedules(id),
        user_id INTEGER NOT NULL,
        date TIMESTAMP NOT NULL,
        vote_status TEXT NOT NULL,
        created_at TIMESTAMP NOT NULL,
        UNIQUE (schedule_id, user_id, date),
        FOREIGN KEY (schedule_id, date) REFERENCES schedule_dates(schedule_id, date)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_schedule_dates_schedule_id ON schedule_dates(schedule_id)",
    "CREATE INDEX IF NOT EXISTS idx_votes_schedule_id ON votes(schedule_id)",
    "CREATE INDEX IF NOT EXISTS idx_votes_user_id ON votes(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_schedules_status ON schedules(status)",
];

/// Create tables and indexes. Safe to run on every startup.
pub async fn initialize_database(pool: &Pool<Sqlite>) -> Result<()> {
    info!("Initializing database schema...");

    for statement in SCHEMA.iter().copied() {
        sqlx::query(statement)
            .execute(pool)
            .await
            .wrap_err("Failed to initialize database schema")?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
