//! `PostgreSQL` adapters for company persistence.

mod models;
mod repository;
pub(crate) mod schema;

pub use repository::{CompanyPgPool, PostgresCompanyRepository};
