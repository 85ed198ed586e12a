//! In-memory repository for company tests and embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::company::{
    domain::{Company, CompanyId},
    ports::{CompanyRepository, CompanyRepositoryError, CompanyRepositoryResult},
};

/// Thread-safe in-memory company repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCompanyRepository {
    state: Arc<RwLock<InMemoryCompanyState>>,
}

#[derive(Debug, Default)]
struct InMemoryCompanyState {
    companies: HashMap<CompanyId, Company>,
    last_id: u64,
}

impl InMemoryCompanyRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl ToString) -> CompanyRepositoryError {
    CompanyRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl CompanyRepository for InMemoryCompanyRepository {
    async fn allocate_id(&self) -> CompanyRepositoryResult<CompanyId> {
        let mut state = self.state.write().map_err(poisoned)?;
        let next = state.last_id.saturating_add(1);
        let id = CompanyId::new(next).map_err(CompanyRepositoryError::persistence)?;
        state.last_id = next;
        Ok(id)
    }

    async fn store(&self, company: &Company) -> CompanyRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.companies.contains_key(&company.id()) {
            return Err(CompanyRepositoryError::DuplicateCompany(company.id()));
        }
        // Seeded identifiers must never be handed out again.
        state.last_id = state.last_id.max(company.id().value());
        state.companies.insert(company.id(), company.clone());
        Ok(())
    }

    async fn update(&self, company: &Company) -> CompanyRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let stored = state
            .companies
            .get_mut(&company.id())
            .ok_or(CompanyRepositoryError::NotFound(company.id()))?;
        *stored = company.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: CompanyId) -> CompanyRepositoryResult<Option<Company>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.companies.get(&id).cloned())
    }
}
