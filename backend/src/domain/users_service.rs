//! User domain service.
//!
//! Implements both driving ports over a single [`UserRepository`]. Each
//! operation issues at most one repository call, so consistency relies on
//! the atomicity the store gives a single statement.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{UserPersistenceError, UserRepository, UsersCommand, UsersQuery};
use crate::domain::{Error, NewUser, User, UserId, UserPatch, UserSearchCriteria};

/// Message returned when no stored user has the requested id.
pub const USER_NOT_FOUND: &str = "User not found";
/// Message returned when listing an empty store.
pub const NO_USERS_FOUND: &str = "No users found";
/// Message returned when a search matches nothing.
pub const NO_MATCHING_USERS: &str = "No matching users found";

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

/// Users service implementing [`UsersCommand`] and [`UsersQuery`].
#[derive(Clone)]
pub struct UsersService<R> {
    user_repo: Arc<R>,
}

impl<R> UsersService<R> {
    /// Create a new service over the user repository.
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl<R> UsersCommand for UsersService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, user: NewUser) -> Result<UserId, Error> {
        let created = self
            .user_repo
            .create(&user)
            .await
            .map_err(map_persistence_error)?;
        info!(user_id = %created.id(), "user created");
        Ok(created.id())
    }

    async fn update_user(&self, id: UserId, patch: UserPatch) -> Result<User, Error> {
        let updated = self
            .user_repo
            .update(&id, &patch)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))?;
        info!(user_id = %id, "user updated");
        Ok(updated)
    }

    async fn delete_user(&self, id: UserId) -> Result<(), Error> {
        let removed = self
            .user_repo
            .delete(&id)
            .await
            .map_err(map_persistence_error)?;
        if !removed {
            return Err(Error::not_found(USER_NOT_FOUND));
        }
        info!(user_id = %id, "user deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> UsersQuery for UsersService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        let users = self.user_repo.list().await.map_err(map_persistence_error)?;
        if users.is_empty() {
            return Err(Error::not_found(NO_USERS_FOUND));
        }
        Ok(users)
    }

    async fn get_user(&self, id: UserId) -> Result<User, Error> {
        self.user_repo
            .find_by_id(&id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
    }

    async fn search_users(&self, criteria: UserSearchCriteria) -> Result<Vec<User>, Error> {
        let users = self
            .user_repo
            .find_matching(&criteria)
            .await
            .map_err(map_persistence_error)?;
        if users.is_empty() {
            return Err(Error::not_found(NO_MATCHING_USERS));
        }
        Ok(users)
    }
}

#[cfg(test)]
#[path = "users_service_tests.rs"]
mod tests;
