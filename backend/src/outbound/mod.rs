//! Outbound adapters implementing the user repository port.
//!
//! - **memory**: process-local store, the default when no database URL is
//!   configured.
//! - **persistence**: PostgreSQL via Diesel.
//!
//! Adapters only translate between domain types and storage
//! representations. They contain no business logic.

pub mod memory;
pub mod persistence;
