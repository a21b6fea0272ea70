//! Builders for the HTTP state from the configured user store.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use users_backend::inbound::http::state::HttpState;
use users_backend::outbound::memory::InMemoryUserRepository;
use users_backend::outbound::persistence::DieselUserRepository;

use super::ServerConfig;

/// Build the shared HTTP state, using PostgreSQL when a pool is configured
/// and the in-memory repository otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => {
            info!(store = "postgres", "user store selected");
            HttpState::from_repository(Arc::new(DieselUserRepository::new(pool.clone())))
        }
        None => {
            info!(store = "memory", "user store selected");
            HttpState::from_repository(Arc::new(InMemoryUserRepository::new()))
        }
    };
    web::Data::new(state)
}
