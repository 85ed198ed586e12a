//! Diesel row models for company persistence.

use super::schema::companies;
use diesel::prelude::*;

/// Query result row for company records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = companies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CompanyRow {
    /// Company identifier.
    pub id: i64,
    /// Company name.
    pub name: String,
}

/// Insert model for company records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = companies)]
pub struct NewCompanyRow {
    /// Company identifier.
    pub id: i64,
    /// Company name.
    pub name: String,
}
