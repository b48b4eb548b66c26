use gatehouse::config::AppConfig;
use gatehouse::state::AppState;
use gatehouse::{db, routes};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env().expect("invalid configuration");
    if config.using_development_secret {
        tracing::warn!("JWT_SECRET not set; signing sessions with the development secret");
    }

    let state = match &config.database_url {
        Some(url) => {
            let pool = db::init_pool(url, config.db_max_connections)
                .await
                .expect("database init failed");
            AppState::with_pool(pool, &config)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory stores");
            AppState::in_memory(&config)
        }
    };

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "gatehouse listening");
    axum::serve(listener, app).await.expect("server failed");
}
