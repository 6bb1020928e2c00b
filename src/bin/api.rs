use anyhow::Result;
use smartsum::{
    app_state::AppState,
    auth::jwt::JwtService,
    config::Config,
    db,
    extractor::WebExtractor,
    fetcher::PageFetcher,
    mailer::SmtpMailer,
    passwords::{self, Passwords},
    repositories::{ContactRepository, SummaryRepository, UserRepository},
    routes,
    summarizer::GeminiClient,
    translator::LibreTranslateClient,
};
use std::sync::Arc;
use tokio::{
    net::TcpListener,
    signal::{self, ctrl_c},
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env()?;
    if config.gemini().api_key.is_empty() {
        warn!("GEMINI_API_KEY is not set; summarization requests will fail");
    }
    if config.smtp().username.is_empty() {
        warn!("EMAIL_USER is not set; summary emails will fail");
    }

    let pool = db::connect(config.database_url(), 10).await?;
    db::migrate(&pool).await?;

    let state = AppState {
        user_repo: Arc::new(UserRepository::new(pool.clone())),
        summary_repo: Arc::new(SummaryRepository::new(pool.clone())),
        contact_repo: Arc::new(ContactRepository::new(pool.clone())),
        extractor: Arc::new(WebExtractor::new(PageFetcher::new()?)),
        summarizer: Arc::new(GeminiClient::new(config.gemini())?),
        translator: Arc::new(LibreTranslateClient::new(config.translate())?),
        mailer: Arc::new(SmtpMailer::new(config.smtp())?),
        jwt: Arc::new(JwtService::new(config.jwt_secret())),
        passwords: Passwords::new(
            passwords::DEFAULT_MEMORY_KIB,
            passwords::DEFAULT_ITERATIONS,
            passwords::DEFAULT_LANES,
        )?,
        db_pool: pool,
    };

    let app = routes::router(state, &config);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!(addr = %config.bind_addr(), "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("received SIGTERM, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
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
}
