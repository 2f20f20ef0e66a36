use std::sync::Arc;

use axum::Router;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};

use crate::{
    config::{AppConfig, DatabaseConfig},
    db::connection,
    middleware::catch_panic_layer,
    routes::router,
    state::AppState,
};

/// Router over `db` with the same layers the server installs.
pub fn test_router(db: DatabaseConnection) -> Router {
    let cfg = AppConfig::default();
    let state = AppState::new(cfg, db);
    router(Arc::clone(&state)).layer(catch_panic_layer())
}

/// Router over a mock connection that has no prepared results, so any store
/// call fails.
pub fn mock_router() -> Router {
    test_router(MockDatabase::new(DatabaseBackend::Sqlite).into_connection())
}

/// Router over a fresh in-memory SQLite database with the schema in place.
pub async fn sqlite_router() -> anyhow::Result<Router> {
    let db = connection::connect(&DatabaseConfig::in_memory()).await?;
    Ok(test_router(db))
}
