mod db;
mod routes;
mod services;
mod state;
mod stores;

use std::sync::Arc;

use stores::account::PgAccountStore;
use stores::message::PgMessageStore;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let pool = db::init_pool(&database_url)
        .await
        .expect("database init failed");

    let state = state::AppState::new(
        Arc::new(PgAccountStore::new(pool.clone())),
        Arc::new(PgMessageStore::new(pool)),
    );

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "chirp listening");
    axum::serve(listener, app).await.expect("server failed");
}
