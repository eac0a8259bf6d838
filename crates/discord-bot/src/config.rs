use std::env;
use std::path::PathBuf;

use datepoll_core::errors::{ScheduleError, ScheduleResult};

/// Configuration for the Discord bot.
///
/// Loaded once at startup; a missing token is fatal before any connection
/// is attempted.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Discord bot token (required)
    pub token: String,
    /// SQLite database file (defaults to `data/schedule.db`)
    pub database_path: PathBuf,
    /// Test guild ID for faster command registration during development
    pub test_guild_id: Option<u64>,
}

impl BotConfig {
    pub const DEFAULT_DATABASE_PATH: &'static str = "data/schedule.db";

    /// Load configuration from environment variables
    pub fn from_env() -> ScheduleResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its
    /// value.
    pub fn from_lookup<F>(lookup: F) -> ScheduleResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup("DISCORD_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| {
                ScheduleError::Configuration("DISCORD_TOKEN environment variable not set".to_string())
            })?;

        let database_path = lookup("DATABASE_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_DATABASE_PATH));

        let test_guild_id = lookup("DISCORD_TEST_GUILD_ID")
            .map(|id| {
                id.trim().parse::<u64>().map_err(|_| {
                    ScheduleError::Configuration("DISCORD_TEST_GUILD_ID must be a valid u64".to_string())
                })
            })
            .transpose()?;

        Ok(Self {
            token,
            database_path,
            test_guild_id,
        })
    }
}
