//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: i64,
    /// Title.
    pub title: String,
    /// Optional detail.
    pub detail: Option<String>,
    /// Stored status string.
    pub status: String,
    /// Stored visibility string.
    pub visibility: String,
    /// Person-in-charge identifier.
    pub assignee_id: Option<i64>,
    /// Optional deadline.
    pub due_date: Option<DateTime<Utc>>,
    /// Creating user identifier.
    pub creator_id: i64,
    /// Last writer identifier.
    pub updater_id: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TaskRow {
    /// Returns every user identifier this row references.
    pub fn referenced_user_ids(&self) -> impl Iterator<Item = i64> + '_ {
        [self.creator_id, self.updater_id]
            .into_iter()
            .chain(self.assignee_id)
    }
}

/// Insert and changeset model for task records.
///
/// `None` clears the column on update.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: i64,
    /// Title.
    pub title: String,
    /// Optional detail.
    pub detail: Option<String>,
    /// Stored status string.
    pub status: String,
    /// Stored visibility string.
    pub visibility: String,
    /// Person-in-charge identifier.
    pub assignee_id: Option<i64>,
    /// Optional deadline.
    pub due_date: Option<DateTime<Utc>>,
    /// Creating user identifier.
    pub creator_id: i64,
    /// Last writer identifier.
    pub updater_id: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
