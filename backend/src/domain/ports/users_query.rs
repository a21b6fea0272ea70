//! Driving port for user-facing queries.
//!
//! Inbound adapters (HTTP handlers) use this port to read users without
//! importing outbound persistence concerns.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId, UserSearchCriteria};

/// Domain use-case port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// All users ordered by id. An empty store is reported as `NotFound`.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// A single user by identifier.
    async fn get_user(&self, id: UserId) -> Result<User, Error>;

    /// Users matching every field of `criteria`. No match is `NotFound`.
    async fn search_users(&self, criteria: UserSearchCriteria) -> Result<Vec<User>, Error>;
}
