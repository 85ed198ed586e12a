//! In-memory adapters for identity persistence.

mod identity;

pub use identity::InMemoryIdentityRepository;
