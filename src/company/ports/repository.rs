//! Repository port for company persistence.

use crate::company::domain::{Company, CompanyId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for company repository operations.
pub type CompanyRepositoryResult<T> = Result<T, CompanyRepositoryError>;

/// Company persistence contract.
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Reserves the identifier for a company about to be stored.
    async fn allocate_id(&self) -> CompanyRepositoryResult<CompanyId>;

    /// Stores a new company.
    ///
    /// # Errors
    ///
    /// Returns [`CompanyRepositoryError::DuplicateCompany`] when the
    /// identifier is already taken.
    async fn store(&self, company: &Company) -> CompanyRepositoryResult<()>;

    /// Persists changes to an existing company.
    ///
    /// # Errors
    ///
    /// Returns [`CompanyRepositoryError::NotFound`] when the company does not
    /// exist.
    async fn update(&self, company: &Company) -> CompanyRepositoryResult<()>;

    /// Finds a company by identifier.
    ///
    /// Returns `None` when the company does not exist.
    async fn find_by_id(&self, id: CompanyId) -> CompanyRepositoryResult<Option<Company>>;
}

/// Errors returned by company repository implementations.
#[derive(Debug, Clone, Error)]
pub enum CompanyRepositoryError {
    /// A company with the same identifier already exists.
    #[error("duplicate company identifier: {0}")]
    DuplicateCompany(CompanyId),

    /// The company was not found.
    #[error("company not found: {0}")]
    NotFound(CompanyId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CompanyRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
