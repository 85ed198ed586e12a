//! Port contracts for identity persistence.

pub mod repository;

pub use repository::{
    AuthRepository, IdentityRepositoryError, IdentityRepositoryResult, UserRepository,
};
