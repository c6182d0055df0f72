use tracing_subscriber::EnvFilter;

use barosign_api::routes::{app, AppState};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = barosign_api::config::config();
    tracing::info!("starting Barosign API in {:?} mode", config.environment);

    let pool = match barosign_api::db::connect().await {
        Ok(pool) => pool,
        Err(err) => {
            tracing::error!("database connection failed: {err}");
            std::process::exit(1);
        }
    };
    if let Err(err) = barosign_api::db::migrate(&pool).await {
        tracing::error!("migration failed: {err}");
        std::process::exit(1);
    }

    let app = app(AppState { db: pool });

    // Allow tests or deployments to override port via env
    let port = std::env::var("BAROSIGN_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Barosign API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
