//! Port abstraction for user persistence adapters and their errors.
//!
//! Adapters own id assignment: [`UserRepository::create`] hands back the
//! stored record with its freshly issued identifier. Identifiers increase
//! monotonically and are never reused after a delete.

use async_trait::async_trait;

use crate::domain::{NewUser, User, UserId, UserPatch, UserSearchCriteria};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Storage for [`User`] records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new user under the next identifier.
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Every stored user ordered by id.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Apply `patch` to an existing user in a single step.
    ///
    /// Returns `None` when no user has the identifier.
    async fn update(
        &self,
        id: &UserId,
        patch: &UserPatch,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Remove a user permanently. Returns whether a record was removed.
    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError>;

    /// Users equal to `criteria` on every field, ordered by id.
    async fn find_matching(
        &self,
        criteria: &UserSearchCriteria,
    ) -> Result<Vec<User>, UserPersistenceError>;
}
