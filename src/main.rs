use anyhow::Context;
use panacea::api::{self, app_state::AppState};
use panacea::config::config::LoggingConfig;
use panacea::config::loader::ConfigLoader;
use panacea::observability::{AppMetrics, ObservabilityState, create_observability_router};
use panacea::services::{
    SessionRegistry, create_chat_service, create_generation_model, create_profile_service,
    create_sentiment_model,
};
use panacea::storage::repository::JsonFileRepository;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// 初始化日志订阅器
///
/// 配置了 log_dir 时额外输出按天滚动的日志文件，返回的 guard
/// 必须存活到进程结束，否则缓冲日志会丢失。
fn init_tracing(config: &LoggingConfig) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "panacea.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(writer),
                )
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
            None
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load().context("配置加载失败")?;
    ConfigLoader::validate(&config).context("配置验证失败")?;

    let _log_guard = init_tracing(&config.logging);
    info!("Starting {} ({})...", config.app_name, config.environment);
    info!("Configuration loaded successfully");

    let repository = Arc::new(
        JsonFileRepository::new(&config.storage.data_dir)
            .await
            .context("档案存储初始化失败")?,
    );
    info!("Profile repository initialized: {:?}", config.storage.data_dir);

    let sentiment_model = create_sentiment_model(&config.sentiment)?;
    info!(
        "Sentiment model initialized: {} (backend: {})",
        config.sentiment.model, config.sentiment.backend
    );

    let generation_model = create_generation_model(&config.generation)?;
    info!(
        "Generation model initialized: {} (backend: {})",
        config.generation.model, config.generation.backend
    );

    let profile_service: Arc<dyn panacea::services::profile::ProfileService> =
        Arc::from(create_profile_service(repository));
    info!("Profile service initialized");

    let metrics = AppMetrics::default();
    let chat_service = create_chat_service(
        profile_service.clone(),
        Arc::from(sentiment_model),
        Arc::from(generation_model),
        metrics.clone(),
    );
    info!("Chat service initialized");

    let app_state = AppState::new(
        profile_service,
        chat_service,
        SessionRegistry::new(),
        metrics.clone(),
    );
    info!("Application state created");

    // 可观测性路由与 API 路由合并
    let observability_state = Arc::new(ObservabilityState::new(
        env!("CARGO_PKG_VERSION").to_string(),
        metrics,
    ));
    let api_router = api::create_router(app_state);
    let router = create_observability_router(observability_state).merge(api_router);
    info!("API router created with observability endpoints");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("监听地址绑定失败: {}", addr))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
