//! In-memory `UserRepository` backed by an ordered map.
//!
//! The id counter lives inside the repository, so each store instance issues
//! its own sequence starting at 1. Ids are never reused after a delete.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserId, UserPatch, UserSearchCriteria};

struct State {
    users: BTreeMap<UserId, User>,
    next_id: i64,
}

impl Default for State {
    fn default() -> Self {
        Self {
            users: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// User store held in process memory.
///
/// A single lock guards both the map and the counter, so id assignment and
/// insertion happen atomically.
#[derive(Default)]
pub struct InMemoryUserRepository {
    state: RwLock<State>,
}

impl InMemoryUserRepository {
    /// Create an empty store whose first id will be 1.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut state = self.state.write().await;
        let id = UserId::new(state.next_id)
            .map_err(|err| UserPersistenceError::query(format!("invalid next id: {err}")))?;
        state.next_id = state
            .next_id
            .checked_add(1)
            .ok_or_else(|| UserPersistenceError::query("user id sequence exhausted"))?;

        let created = User::new(id, user.clone());
        state.users.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.state.read().await.users.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.state.read().await.users.values().cloned().collect())
    }

    async fn update(
        &self,
        id: &UserId,
        patch: &UserPatch,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut state = self.state.write().await;
        let Some(stored) = state.users.get_mut(id) else {
            return Ok(None);
        };
        *stored = stored.clone().apply(patch);
        Ok(Some(stored.clone()))
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        Ok(self.state.write().await.users.remove(id).is_some())
    }

    async fn find_matching(
        &self,
        criteria: &UserSearchCriteria,
    ) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self
            .state
            .read()
            .await
            .users
            .values()
            .filter(|user| criteria.matches(user))
            .cloned()
            .collect())
    }
}
