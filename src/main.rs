use docket_core::application::{
    events::EventBus,
    ports::{security::SessionVerifier, time::Clock, util::SlugGenerator},
    services::ApplicationServices,
};
use docket_core::config::AppConfig;
use docket_core::domain::{
    article::{ArticleEvent, ArticleReadRepository, ArticleWriteRepository},
    comment::EditorialCommentRepository,
    user::UserRepository,
};
use docket_core::infrastructure::{
    database,
    repositories::{
        PostgresArticleReadRepository, PostgresArticleWriteRepository,
        PostgresEditorialCommentRepository, PostgresUserRepository,
    },
    scheduler::PublicationScheduler,
    security::HmacSessionVerifier,
    time::SystemClock,
    util::DefaultSlugGenerator,
};
use docket_core::presentation::http::{routes::build_router, state::HttpState};
use anyhow::Result;
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url()).await?;
    database::run_migrations(&pool).await?;

    let user_repo: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(pool.clone()));
    let article_write_repo: Arc<dyn ArticleWriteRepository> =
        Arc::new(PostgresArticleWriteRepository::new(pool.clone()));
    let article_read_repo: Arc<dyn ArticleReadRepository> =
        Arc::new(PostgresArticleReadRepository::new(pool.clone()));
    let comment_repo: Arc<dyn EditorialCommentRepository> =
        Arc::new(PostgresEditorialCommentRepository::new(pool.clone()));

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator);
    let events = Arc::new(EventBus::default());
    let session_verifier: Arc<dyn SessionVerifier> = Arc::new(HmacSessionVerifier::new(
        config.session_signing_key().as_bytes().to_vec(),
        Arc::clone(&user_repo),
        Arc::clone(&clock),
    ));

    let services = Arc::new(ApplicationServices::new(
        Arc::clone(&article_write_repo),
        Arc::clone(&article_read_repo),
        Arc::clone(&comment_repo),
        Arc::clone(&session_verifier),
        Arc::clone(&clock),
        Arc::clone(&slugger),
        Arc::clone(&events),
    ));

    // `--sweep-once` is the entry point for an external cron facility:
    // run one tick, print the report, exit.
    if std::env::args().any(|arg| arg == "--sweep-once") {
        let report = services.sweep().run_once().await?;
        println!("{}", serde_json::to_string(&report)?);
        return Ok(());
    }

    spawn_event_logger(&events);

    let scheduler = Arc::new(PublicationScheduler::new(
        services.sweep(),
        config.sweep_interval(),
    ));
    let scheduler_task = tokio::spawn(Arc::clone(&scheduler).run());

    let state = HttpState {
        services: Arc::clone(&services),
    };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Let an in-flight tick finish its rows before the process exits.
    scheduler.stop();
    scheduler_task.await?;

    Ok(())
}

/// Stand-in for downstream consumers (cache purge, sitemap refresh): every
/// workflow event lands in the log with its article id.
fn spawn_event_logger(events: &Arc<EventBus>) {
    let mut rx = events.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(ArticleEvent::Published { id, at }) => {
                    tracing::info!(article_id = i64::from(id), at = %at, "article published");
                }
                Ok(event) => {
                    tracing::debug!(?event, "article workflow event");
                }
                Err(tokio::sync::broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "event logger lagged behind the bus");
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    });
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install terminate handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
