//! Company reads and superadmin-only mutations.

use crate::access::{AccessDenied, Action, authorize};
use crate::company::{
    domain::{Company, CompanyDomainError, CompanyId, CompanyName},
    ports::{CompanyRepository, CompanyRepositoryError},
};
use crate::error::{Classify, ErrorKind};
use crate::identity::domain::Auth;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Service-level errors for company operations.
#[derive(Debug, Error)]
pub enum CompanyServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] CompanyDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] CompanyRepositoryError),
    /// The actor lacks the required permission.
    #[error(transparent)]
    Forbidden(#[from] AccessDenied),
    /// The company does not exist.
    #[error("company not found: {0}")]
    CompanyNotFound(CompanyId),
}

impl Classify for CompanyServiceError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::BadRequest,
            Self::Forbidden(_) => ErrorKind::Forbidden,
            Self::Repository(CompanyRepositoryError::NotFound(_)) | Self::CompanyNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::Repository(_) => ErrorKind::InternalServerError,
        }
    }
}

/// Result type for company service operations.
pub type CompanyServiceResult<T> = Result<T, CompanyServiceError>;

/// Company administration service.
#[derive(Clone)]
pub struct CompanyService<R>
where
    R: CompanyRepository,
{
    repository: Arc<R>,
}

impl<R> CompanyService<R>
where
    R: CompanyRepository,
{
    /// Creates a new company service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Fetches a company. Restricted to superusers.
    ///
    /// # Errors
    ///
    /// Returns [`CompanyServiceError::Forbidden`] for non-superusers and
    /// [`CompanyServiceError::CompanyNotFound`] when the company does not
    /// exist.
    pub async fn get(&self, auth: &Auth, company_id: CompanyId) -> CompanyServiceResult<Company> {
        authorize(auth, Action::ReadCompanies)?;
        self.fetch(company_id).await
    }

    /// Creates a company. Restricted to superadmins.
    ///
    /// # Errors
    ///
    /// Returns [`CompanyServiceError::Forbidden`] for non-superadmins and
    /// [`CompanyServiceError::Domain`] when the name is invalid.
    pub async fn create(&self, auth: &Auth, name: &str) -> CompanyServiceResult<CompanyId> {
        authorize(auth, Action::ManageCompanies)?;
        let company_name = CompanyName::new(name)?;
        let company_id = self.repository.allocate_id().await?;
        self.repository
            .store(&Company::new(company_id, company_name))
            .await?;

        debug!(actor = %auth.id(), company = %company_id, "company created");
        Ok(company_id)
    }

    /// Renames a company. Restricted to superadmins.
    ///
    /// # Errors
    ///
    /// Returns [`CompanyServiceError::Forbidden`] for non-superadmins,
    /// [`CompanyServiceError::CompanyNotFound`] when the company does not
    /// exist, and [`CompanyServiceError::Domain`] when the name is invalid.
    pub async fn update(
        &self,
        auth: &Auth,
        company_id: CompanyId,
        name: &str,
    ) -> CompanyServiceResult<()> {
        authorize(auth, Action::ManageCompanies)?;
        let company_name = CompanyName::new(name)?;
        let mut company = self.fetch(company_id).await?;
        company.rename(company_name);
        self.repository.update(&company).await?;

        debug!(actor = %auth.id(), company = %company_id, "company renamed");
        Ok(())
    }

    async fn fetch(&self, company_id: CompanyId) -> CompanyServiceResult<Company> {
        self.repository
            .find_by_id(company_id)
            .await?
            .ok_or(CompanyServiceError::CompanyNotFound(company_id))
    }
}
