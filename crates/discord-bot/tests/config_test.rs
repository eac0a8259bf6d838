use std::collections::HashMap;
use std::path::PathBuf;

use datepoll_core::errors::ScheduleError;
use datepoll_discord_bot::config::BotConfig;
use pretty_assertions::assert_eq;

fn load(vars: &[(&str, &str)]) -> Result<BotConfig, ScheduleError> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    BotConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_defaults() {
    let config = load(&[("DISCORD_TOKEN", "test_token")]).unwrap();

    assert_eq!(config.token, "test_token");
    assert_eq!(config.database_path, PathBuf::from(BotConfig::DEFAULT_DATABASE_PATH));
    assert_eq!(config.test_guild_id, None);
}

#[test]
fn test_all_variables() {
    let config = load(&[
        ("DISCORD_TOKEN", "test_token"),
        ("DATABASE_PATH", "/tmp/polls.db"),
        ("DISCORD_TEST_GUILD_ID", "123456789012345678"),
    ])
    .unwrap();

    assert_eq!(config.database_path, PathBuf::from("/tmp/polls.db"));
    assert_eq!(config.test_guild_id, Some(123456789012345678));
}

#[test]
fn test_missing_token_is_configuration_error() {
    let err = load(&[("DATABASE_PATH", "data/x.db")]).unwrap_err();
    assert!(matches!(err, ScheduleError::Configuration(_)));

    let err = load(&[("DISCORD_TOKEN", "   ")]).unwrap_err();
    assert!(matches!(err, ScheduleError::Configuration(_)));
}

#[test]
fn test_invalid_guild_id_is_rejected() {
    let err = load(&[("DISCORD_TOKEN", "t"), ("DISCORD_TEST_GUILD_ID", "guild")]).unwrap_err();
    assert!(matches!(err, ScheduleError::Configuration(_)));
}
