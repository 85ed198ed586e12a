//! Port contracts for company management.

pub mod repository;

pub use repository::{CompanyRepository, CompanyRepositoryError, CompanyRepositoryResult};
