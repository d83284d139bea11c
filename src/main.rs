use anyhow::{Context, Result};
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use medguide::bot;
use medguide::config::{BotConfig, DeliveryMode, LogFormat};
use medguide::dataset::Dataset;
use medguide::responder::Responder;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let config = BotConfig::from_env().context("Invalid configuration")?;

    init_tracing(config.log_format);

    info!(mode = ?config.mode, "Starting MedGuide Telegram Bot");

    // The bot must not serve requests without its dataset
    let dataset = Dataset::load(&config.dataset_path).with_context(|| {
        format!(
            "Failed to load medicine dataset from {}",
            config.dataset_path.display()
        )
    })?;
    info!(records = dataset.len(), "Medicine dataset ready");

    let responder = Arc::new(Responder::new(Arc::new(dataset)));

    let bot = Bot::new(&config.bot_token);

    match config.mode {
        DeliveryMode::Polling => bot::run_polling(bot, responder).await,
        DeliveryMode::Webhook => bot::webhook::serve(bot, responder, &config).await?,
    }

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
    }
}
