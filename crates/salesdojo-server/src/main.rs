//! salesdojo server binary.

use salesdojo_application::TrainingUseCase;
use salesdojo_core::prompt::PromptResolver;
use salesdojo_core::settings::SettingsCache;
use salesdojo_infrastructure::{
    JsonConversationRepository, TomlPromptRepository, TomlSettingsRepository,
};
use salesdojo_interaction::OpenAiClient;
use salesdojo_server::{create_router, AppState, ServerConfig, StaticTokenAuthenticator};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "salesdojo=info,tower_http=info".into()),
        )
        .init();

    dotenvy::dotenv().ok();

    let config = ServerConfig::load()?;
    if config.tokens.is_empty() {
        tracing::warn!("no session tokens configured, every request will get 401");
    }

    let data_dir = config.resolved_data_dir();
    info!("using data directory {:?}", data_dir);

    let conversations = Arc::new(JsonConversationRepository::new(&data_dir)?);
    let prompts = PromptResolver::new(Arc::new(TomlPromptRepository::new(&data_dir)));
    let settings = SettingsCache::new(Arc::new(TomlSettingsRepository::new(&data_dir)));
    let completion = Arc::new(OpenAiClient::try_from_env()?);

    let usecase = TrainingUseCase::new(
        conversations,
        prompts,
        settings,
        completion,
        data_dir,
        config.training.clone(),
    );

    let state = AppState {
        usecase: Arc::new(usecase),
        authenticator: Arc::new(StaticTokenAuthenticator::new(config.tokens.clone())),
    };
    let app = create_router(state);

    let addr = config.bind_addr();
    info!("starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
