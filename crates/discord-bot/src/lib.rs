use std::sync::Arc;

use datepoll_core::service::ScheduleService;
use datepoll_db::repositories::ScheduleRepository;
use datepoll_db::Database;
use eyre::Result;
use serenity::{prelude::GatewayIntents, Client};
use tracing::{error, info};

pub mod commands;
pub mod config;
pub mod handlers;
pub mod render;

/// Start the Discord bot and run until the gateway disconnects or Ctrl-C is
/// received.
///
/// The database is closed once the client has stopped, whatever the outcome.
///
/// # Arguments
///
/// * `config` - The bot configuration containing the token and guild settings
/// * `database` - An opened schedule database
pub async fn start_bot(config: config::BotConfig, database: Database) -> Result<()> {
    info!("Starting Discord bot");

    let service = Arc::new(ScheduleService::new(ScheduleRepository::new(database.clone())));
    let handler = handlers::Handler::new(config.clone(), service);

    let mut client = Client::builder(&config.token, GatewayIntents::non_privileged())
        .event_handler(handler)
        .await?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {}", e);
            return;
        }
        info!("Shutdown signal received, disconnecting from Discord...");
        shard_manager.lock().await.shutdown_all().await;
    });

    info!("Connecting to Discord...");
    let result = client.start().await;

    database.close().await;

    result?;
    Ok(())
}
