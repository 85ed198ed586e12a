//! In-memory identity store serving both credential and projection lookups.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::{
    domain::{Auth, User, UserId},
    ports::{AuthRepository, IdentityRepositoryError, IdentityRepositoryResult, UserRepository},
};

/// Thread-safe in-memory identity repository.
///
/// One instance implements both [`AuthRepository`] and [`UserRepository`],
/// so user projections always reflect the latest stored profile.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityRepository {
    state: Arc<RwLock<InMemoryIdentityState>>,
}

#[derive(Debug, Default)]
struct InMemoryIdentityState {
    users: HashMap<UserId, Auth>,
    last_id: u64,
}

impl InMemoryIdentityRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl ToString) -> IdentityRepositoryError {
    IdentityRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl AuthRepository for InMemoryIdentityRepository {
    async fn allocate_id(&self) -> IdentityRepositoryResult<UserId> {
        let mut state = self.state.write().map_err(poisoned)?;
        let next = state.last_id.saturating_add(1);
        let id = UserId::new(next).map_err(IdentityRepositoryError::persistence)?;
        state.last_id = next;
        Ok(id)
    }

    async fn store(&self, auth: &Auth) -> IdentityRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.users.contains_key(&auth.id()) {
            return Err(IdentityRepositoryError::DuplicateUser(auth.id()));
        }
        state.last_id = state.last_id.max(auth.id().value());
        state.users.insert(auth.id(), auth.clone());
        Ok(())
    }

    async fn update(&self, auth: &Auth) -> IdentityRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let stored = state
            .users
            .get_mut(&auth.id())
            .ok_or(IdentityRepositoryError::NotFound(auth.id()))?;
        *stored = auth.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> IdentityRepositoryResult<Option<Auth>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.users.get(&id).cloned())
    }
}

#[async_trait]
impl UserRepository for InMemoryIdentityRepository {
    async fn find_by_id(&self, id: UserId) -> IdentityRepositoryResult<Option<User>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.users.get(&id).map(Auth::to_user))
    }
}
