use std::sync::Arc;

use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use interview_prep::api::api_routes;
use interview_prep::backends::Backends;
use interview_prep::config::AppConfig;
use interview_prep::error::ConfigError;
use interview_prep::service::SessionService;
use interview_prep::session::spawn_expiry_task;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_tracing(&config);

    eprintln!("📝 Interview Prep v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   API: http://{}/api/sessions", config.listen_addr());
    eprintln!(
        "   Intake chat: ws://{}/api/sessions/{{id}}/intake/ws",
        config.listen_addr()
    );
    eprintln!("   Session idle limit: {} min", config.session_idle_minutes);
    if let Some(ref dir) = config.log_dir {
        eprintln!("   Logs: {}", dir.display());
    }

    let backends = Backends::stubbed();
    eprintln!("   Backends: {:?}\n", backends);

    let service = Arc::new(SessionService::new(backends));
    spawn_expiry_task(service.sessions().clone(), config.session_idle());
    let mut app = api_routes(service);
    if let Some(cors) = cors_layer(&config)? {
        app = app.layer(cors);
    }

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    tracing::info!(addr = %config.listen_addr(), "Interview Prep server started");
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let env_filter =
        || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = match config.log_dir {
        Some(ref dir) => {
            let appender = tracing_appender::rolling::daily(dir, "interview-prep.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(env_filter());
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(fmt::layer().with_target(false).with_filter(env_filter()))
        .init();

    guard
}

fn cors_layer(config: &AppConfig) -> Result<Option<CorsLayer>, ConfigError> {
    let Some(ref origin) = config.cors_origin else {
        return Ok(None);
    };
    if origin == "*" {
        return Ok(Some(CorsLayer::permissive()));
    }
    let origin = origin
        .parse::<HeaderValue>()
        .map_err(|e| ConfigError::InvalidValue {
            key: "INTERVIEW_PREP_CORS_ORIGIN".to_string(),
            message: e.to_string(),
        })?;
    Ok(Some(
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
    ))
}
