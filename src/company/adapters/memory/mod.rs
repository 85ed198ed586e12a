//! In-memory adapters for company persistence.

mod company;

pub use company::InMemoryCompanyRepository;
