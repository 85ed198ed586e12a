//! `PostgreSQL` adapters for identity persistence.

mod models;
mod repository;
pub(crate) mod schema;

pub(crate) use models::UserRow;
pub use repository::{IdentityPgPool, PostgresIdentityRepository};
pub(crate) use repository::{row_to_user, user_id_to_column};
