//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Provides the `UserRepository` implementation backed by the `users` table
//! via `diesel-async` with `bb8` connection pooling.
//!
//! - Diesel row structs (`models.rs`) and table definitions (`schema.rs`)
//!   stay private to this module.
//! - Database failures are mapped to `UserPersistenceError` variants.
//!
//! # Example
//!
//! ```no_run
//! use users_backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! # async fn build() -> Result<(), users_backend::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/users")).await?;
//! let repo = DieselUserRepository::new(pool);
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
