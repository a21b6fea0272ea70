//! Driving port for user mutations.
//!
//! Inbound adapters validate raw input into domain types first, so every
//! method here receives values that already satisfy the field invariants.

use async_trait::async_trait;

use crate::domain::{Error, NewUser, User, UserId, UserPatch};

/// Domain use-case port for creating, updating and deleting users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Store a new user and return its assigned identifier.
    async fn create_user(&self, user: NewUser) -> Result<UserId, Error>;

    /// Apply the present fields of `patch` and return the updated record.
    ///
    /// Fails with [`crate::domain::ErrorCode::NotFound`] when the user does
    /// not exist.
    async fn update_user(&self, id: UserId, patch: UserPatch) -> Result<User, Error>;

    /// Remove a user permanently.
    async fn delete_user(&self, id: UserId) -> Result<(), Error>;
}
