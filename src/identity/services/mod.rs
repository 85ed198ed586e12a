//! Application services for user administration and lookup.

mod accounts;
mod directory;

pub use accounts::{
    AuthService, AuthServiceError, AuthServiceResult, CreateUserRequest, UpdateUserRequest,
};
pub use directory::{UserService, UserServiceError, UserServiceResult};
