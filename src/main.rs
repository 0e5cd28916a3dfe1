//! Wiring & DI. Entry point: load settings, bootstrap adapters, inject into services, run once.
//! No business logic here; the workflow lives in BirthdayRun.

use birthday_bot::adapters::ai::AnthropicAdapter;
use birthday_bot::adapters::discord::DiscordGateway;
use birthday_bot::adapters::integrations::TenorAdapter;
use birthday_bot::adapters::storage::SourceReader;
use birthday_bot::ports::{ChatGateway, FileSource, MediaSearch, TextGenerator};
use birthday_bot::shared::config::AppConfig;
use birthday_bot::usecases::{BirthdayRun, MediaPicker, MessageComposer, RosterService, RunTargets};
use dotenv::dotenv;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let settings = AppConfig::load()?.into_settings()?;
    info!(
        channel_id = settings.channel_id,
        heartbeat_channel_id = settings.heartbeat_channel_id,
        roster = %settings.data_source,
        prompt = %settings.prompt_source,
        model = %settings.claude_model,
        "settings loaded"
    );

    // --- Adapters ---
    let chat: Arc<dyn ChatGateway> = Arc::new(DiscordGateway::new(&settings.discord_token));
    let files: Arc<dyn FileSource> = Arc::new(SourceReader::new());
    let text_gen: Arc<dyn TextGenerator> = Arc::new(AnthropicAdapter::new(
        settings.anthropic_base_url.clone(),
        settings.claude_api_key.clone(),
        settings.claude_model.clone(),
    ));
    let media: Arc<dyn MediaSearch> = Arc::new(TenorAdapter::new(
        settings.tenor_base_url.clone(),
        settings.tenor_api_key.clone(),
    ));

    // --- Services ---
    let roster = RosterService::new(Arc::clone(&files), settings.data_source.clone());
    let composer = MessageComposer::new(
        Arc::clone(&files),
        settings.prompt_source.clone(),
        text_gen,
    );
    let picker = MediaPicker::new(media, settings.tenor_query.clone(), settings.tenor_limit);
    let run = BirthdayRun::new(
        chat,
        roster,
        composer,
        picker,
        RunTargets {
            channel_id: settings.channel_id,
            heartbeat_channel_id: settings.heartbeat_channel_id,
        },
    );

    // --- Run (one pass, local clock) ---
    let report = run.run(chrono::Local::now().naive_local()).await;
    if report.is_failure() {
        error!(status = %report.status, "birthday run failed");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
