//! Diesel row models for identity persistence.

use super::schema::users;
use diesel::prelude::*;

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// User identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Hex SHA-256 credential digest.
    pub password_hash: String,
    /// Stored role string.
    pub role: String,
    /// Stored user type string.
    pub user_type: String,
    /// Owning company identifier.
    pub company_id: i64,
}

/// Insert model for user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// User identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Hex SHA-256 credential digest.
    pub password_hash: String,
    /// Stored role string.
    pub role: String,
    /// Stored user type string.
    pub user_type: String,
    /// Owning company identifier.
    pub company_id: i64,
}
