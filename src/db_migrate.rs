use color_eyre::eyre::Result;
use datepoll_db::Database;
use datepoll_discord_bot::config::BotConfig;
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let database_path = std::env::var("DATABASE_PATH")
        .unwrap_or_else(|_| BotConfig::DEFAULT_DATABASE_PATH.to_string());

    // Opening the database creates the file and schema if missing
    println!("Opening database at {}...", database_path);
    let database = Database::open(&database_path).await?;
    database.close().await;
    println!("Database schema initialized successfully.");

    Ok(())
}
