use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use chat_relay::application::ports::ConversationRepository;
use chat_relay::application::services::{ChatService, MediaResolver};
use chat_relay::infrastructure::llm::PerplexityClient;
use chat_relay::infrastructure::media::MediaHostFactory;
use chat_relay::infrastructure::observability::{TracingConfig, init_tracing};
use chat_relay::infrastructure::persistence::{
    InMemoryConversationRepository, PgConversationRepository, create_pool, run_migrations,
};
use chat_relay::presentation::{AppState, Environment, create_router, load_settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = load_settings(environment).context("Failed to load settings")?;

    init_tracing(&TracingConfig::new(
        environment.as_str(),
        settings.logging.json,
        settings.logging.level.clone(),
    ));

    let (conversation_repository, pool): (Arc<dyn ConversationRepository>, _) =
        if settings.database.is_in_memory() {
            tracing::warn!("Using in-memory conversation store, data is lost on exit");
            (Arc::new(InMemoryConversationRepository::new()), None)
        } else {
            let pool = create_pool(&settings.database.url, settings.database.max_connections)
                .await
                .context("Failed to connect to the database")?;
            run_migrations(&pool).await?;
            (
                Arc::new(PgConversationRepository::new(pool.clone())),
                Some(pool),
            )
        };

    let provider = Arc::new(
        PerplexityClient::from_settings(&settings.provider)
            .context("Failed to build provider client")?,
    );
    let media_host =
        MediaHostFactory::create(&settings.media).context("Failed to configure media host")?;
    tracing::info!(
        media_provider = ?settings.media.provider,
        default_model = %settings.provider.default_model,
        "Services configured"
    );

    let chat_service = Arc::new(ChatService::new(
        Arc::clone(&conversation_repository),
        provider,
        MediaResolver::new(media_host),
        settings.provider.default_model.clone(),
    ));

    let state = AppState::new(chat_service, conversation_repository)
        .with_upload_limit(settings.server.max_upload_mb * 1024 * 1024);
    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pool) = pool {
        pool.close().await;
    }
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
