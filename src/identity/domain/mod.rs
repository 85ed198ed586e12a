//! Domain model for users and credentials.

mod auth;
mod credential;
mod error;
mod ids;
mod name;
mod role;
mod user;

pub use auth::{Auth, AuthProfile, PersistedAuthData};
pub use credential::PasswordHash;
pub use error::{IdentityDomainError, ParseUserRoleError, ParseUserTypeError};
pub use ids::UserId;
pub use name::UserName;
pub use role::{UserRole, UserType};
pub use user::User;
