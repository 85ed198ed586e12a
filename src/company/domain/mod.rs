//! Domain model for companies.

mod company;
mod error;
mod ids;
mod name;

pub use company::Company;
pub use error::CompanyDomainError;
pub use ids::CompanyId;
pub use name::CompanyName;
