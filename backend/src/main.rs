//! Backend entry-point: loads settings, prepares the user store and serves
//! the REST API. Log verbosity follows `RUST_LOG`.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

mod server;

use actix_web::web;
use color_eyre::eyre::{WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, ServerSettings, create_server, drain_on, shutdown_signal};
use users_backend::inbound::http::health::HealthState;
use users_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        ServerSettings::load().map_err(|err| eyre!("failed to load server settings: {err}"))?;
    let bind_addr = settings.bind_addr()?;
    let mut config = ServerConfig::new(bind_addr);

    match settings.database_url.as_deref() {
        Some(database_url) => {
            if settings.run_migrations {
                run_pending_migrations(database_url)
                    .await
                    .wrap_err("failed to migrate the users database")?;
            }
            let pool_config =
                PoolConfig::new(database_url).with_max_size(settings.pool_max_size());
            let pool = DbPool::new(pool_config)
                .await
                .wrap_err("failed to build the database pool")?;
            config = config.with_db_pool(pool);
        }
        None => {
            warn!("no database configured; users are kept in memory and lost on restart");
        }
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    actix_web::rt::spawn(drain_on(shutdown_signal(), health_state, server.handle()));
    info!(%bind_addr, "users API listening");
    server.await?;
    Ok(())
}
