use color_eyre::eyre::Result;
use datepoll_db::Database;
use datepoll_discord_bot::config::BotConfig;
use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables before RUST_LOG is read
    dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting datepoll Discord bot");

    // Load configuration
    let config = BotConfig::from_env()?;

    // Open the database, creating the schema on first run
    let database = Database::open(&config.database_path).await?;
    info!("Using database at {}", config.database_path.display());

    // Start the Discord bot
    match datepoll_discord_bot::start_bot(config, database).await {
        Ok(_) => {
            info!("Discord bot shut down gracefully");
            Ok(())
        }
        Err(e) => {
            error!("Discord bot error: {}", e);
            Err(e)
        }
    }
}
