//! Application services for company administration.

mod management;

pub use management::{CompanyService, CompanyServiceError, CompanyServiceResult};
