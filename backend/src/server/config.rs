//! Server settings loaded via OrthoConfig and the resolved server config.

use std::net::{IpAddr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use users_backend::outbound::persistence::DbPool;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Raised when the configured host is not an IP address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid bind host {host:?}: expected an IP address")]
pub struct BindAddrError {
    host: String,
}

/// Runtime settings read from CLI arguments, `USERS_API_*` environment
/// variables and configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USERS_API")]
pub struct ServerSettings {
    /// IP address the listener binds to.
    pub host: Option<String>,
    /// TCP port the listener binds to.
    pub port: Option<u16>,
    /// PostgreSQL connection URL. The in-memory store is used when unset.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
}

impl ServerSettings {
    /// Return the configured host, falling back to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Return the configured port, falling back to 8080.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Return the configured pool size, falling back to 10.
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    /// Resolve the socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr, BindAddrError> {
        let host = self.host();
        let ip: IpAddr = host.parse().map_err(|_| BindAddrError {
            host: host.to_owned(),
        })?;
        Ok(SocketAddr::new(ip, self.port()))
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration bound to `bind_addr` with no database.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
        }
    }

    /// Attach a database connection pool.
    ///
    /// When provided, the server stores users in PostgreSQL instead of the
    /// in-memory repository.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("users-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("USERS_API_HOST", None::<String>),
            ("USERS_API_PORT", None::<String>),
            ("USERS_API_DATABASE_URL", None::<String>),
            ("USERS_API_POOL_MAX_SIZE", None::<String>),
            ("USERS_API_RUN_MIGRATIONS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.host(), DEFAULT_HOST);
        assert_eq!(settings.port(), DEFAULT_PORT);
        assert_eq!(settings.pool_max_size(), DEFAULT_POOL_MAX_SIZE);
        assert!(settings.database_url.is_none());
        assert!(settings.run_migrations);
        assert_eq!(
            settings.bind_addr().expect("default bind address"),
            SocketAddr::from(([0, 0, 0, 0], 8080))
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("USERS_API_HOST", Some("127.0.0.1".to_owned())),
            ("USERS_API_PORT", Some("9090".to_owned())),
            (
                "USERS_API_DATABASE_URL",
                Some("postgres://localhost/users".to_owned()),
            ),
            ("USERS_API_POOL_MAX_SIZE", Some("4".to_owned())),
            ("USERS_API_RUN_MIGRATIONS", Some("false".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("bind address"),
            SocketAddr::from(([127, 0, 0, 1], 9090))
        );
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://localhost/users")
        );
        assert_eq!(settings.pool_max_size(), 4);
        assert!(!settings.run_migrations);
    }

    #[rstest]
    fn hostnames_are_rejected_as_bind_hosts() {
        let settings = ServerSettings {
            host: Some("localhost".to_owned()),
            port: None,
            database_url: None,
            pool_max_size: None,
            run_migrations: false,
        };

        let err = settings.bind_addr().expect_err("hostname is not an IP");
        assert!(err.to_string().contains("localhost"));
    }

    #[rstest]
    fn config_starts_without_a_pool() {
        let addr = SocketAddr::from(([127, 0, 0, 1], 0));
        let config = ServerConfig::new(addr);
        assert_eq!(config.bind_addr(), addr);
        assert!(config.db_pool.is_none());
    }
}
