//! `PostgreSQL` repository implementation for task storage.
//!
//! Visibility filters are translated into `WHERE` clauses. Company scope is
//! resolved through a sub-select on the creator's membership so that no
//! company column is duplicated onto tasks.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::access::{AssignedTaskFilter, CompanyTaskFilter};
use crate::company::domain::CompanyId;
use crate::identity::adapters::postgres::{
    UserRow, row_to_user, schema::users, user_id_to_column,
};
use crate::identity::domain::User;
use crate::task::{
    domain::{
        PersistedTaskData, Task, TaskDetail, TaskId, TaskStatus, TaskTitle, TaskVisibility,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::BigInt;
use std::collections::HashMap;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn allocate_id(&self) -> TaskRepositoryResult<TaskId> {
        self.run_blocking(|connection| {
            let raw = diesel::select(diesel::dsl::sql::<BigInt>("nextval('tasks_id_seq')"))
                .get_result::<i64>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            task_id_from_column(raw)
        })
        .await
    }

    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = to_new_row(task)?;

        self.run_blocking(move |connection| {
            let updated_count = diesel::update(tasks::table.filter(tasks::id.eq(row.id)))
                .set(&row)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;

            if updated_count == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let raw_id = task_id_to_column(id)?;
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::id.eq(raw_id))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(hydrate(connection, rows)?.into_iter().next())
        })
        .await
    }

    async fn list_assigned(&self, filter: &AssignedTaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        let company = company_id_to_column(filter.company_id())?;
        let assignee =
            user_id_to_column(filter.assignee()).map_err(TaskRepositoryError::persistence)?;
        let includes_private = filter.includes_private();

        self.run_blocking(move |connection| {
            let mut query = tasks::table
                .filter(tasks::creator_id.eq_any(company_members(company)))
                .filter(tasks::assignee_id.eq(assignee))
                .select(TaskRow::as_select())
                .order(tasks::id.asc())
                .into_boxed();
            if !includes_private {
                query = query.filter(tasks::visibility.eq(TaskVisibility::Company.as_str()));
            }
            let rows = query
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            hydrate(connection, rows)
        })
        .await
    }

    async fn list_for_company(
        &self,
        filter: &CompanyTaskFilter,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let company = company_id_to_column(filter.company_id())?;
        let requester =
            user_id_to_column(filter.requester()).map_err(TaskRepositoryError::persistence)?;

        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::creator_id.eq_any(company_members(company)))
                .filter(
                    tasks::assignee_id
                        .eq(requester)
                        .or(tasks::visibility.eq(TaskVisibility::Company.as_str())),
                )
                .select(TaskRow::as_select())
                .order(tasks::id.asc())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            hydrate(connection, rows)
        })
        .await
    }
}

/// Loads every user referenced by `rows` in one query and builds the tasks.
fn hydrate(connection: &mut PgConnection, rows: Vec<TaskRow>) -> TaskRepositoryResult<Vec<Task>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let mut user_ids: Vec<i64> = rows.iter().flat_map(TaskRow::referenced_user_ids).collect();
    user_ids.sort_unstable();
    user_ids.dedup();

    let users_by_id = users::table
        .filter(users::id.eq_any(user_ids))
        .select(UserRow::as_select())
        .load::<UserRow>(connection)
        .map_err(TaskRepositoryError::persistence)?
        .into_iter()
        .map(|user_row| {
            let raw_id = user_row.id;
            row_to_user(user_row)
                .map(|user| (raw_id, user))
                .map_err(TaskRepositoryError::persistence)
        })
        .collect::<TaskRepositoryResult<HashMap<i64, User>>>()?;

    rows.into_iter()
        .map(|row| row_to_task(row, &users_by_id))
        .collect()
}

/// Identifiers of the users belonging to `company`, as a sub-select.
fn company_members(company: i64) -> users::BoxedQuery<'static, Pg, BigInt> {
    users::table
        .filter(users::company_id.eq(company))
        .select(users::id)
        .into_boxed()
}

fn lookup_user(users_by_id: &HashMap<i64, User>, raw_id: i64) -> TaskRepositoryResult<User> {
    users_by_id.get(&raw_id).cloned().ok_or_else(|| {
        TaskRepositoryError::persistence(std::io::Error::other(format!(
            "task references missing user {raw_id}"
        )))
    })
}

fn company_id_to_column(id: CompanyId) -> TaskRepositoryResult<i64> {
    i64::try_from(id.value()).map_err(TaskRepositoryError::persistence)
}

fn task_id_to_column(id: TaskId) -> TaskRepositoryResult<i64> {
    i64::try_from(id.value()).map_err(TaskRepositoryError::persistence)
}

fn task_id_from_column(raw: i64) -> TaskRepositoryResult<TaskId> {
    let value = u64::try_from(raw).map_err(TaskRepositoryError::persistence)?;
    TaskId::new(value).map_err(TaskRepositoryError::persistence)
}

fn to_new_row(task: &Task) -> TaskRepositoryResult<NewTaskRow> {
    let column =
        |user: &User| user_id_to_column(user.id()).map_err(TaskRepositoryError::persistence);
    Ok(NewTaskRow {
        id: task_id_to_column(task.id())?,
        title: task.title().as_str().to_owned(),
        detail: task.detail().map(|detail| detail.as_str().to_owned()),
        status: task.status().as_str().to_owned(),
        visibility: task.visibility().as_str().to_owned(),
        assignee_id: task.assignee().map(column).transpose()?,
        due_date: task.due_date(),
        creator_id: column(task.creator())?,
        updater_id: column(task.updater())?,
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

/// Maps a stored task row onto the aggregate.
///
/// Unknown status or visibility strings are reported as persistence
/// failures rather than defaulted.
fn row_to_task(row: TaskRow, users_by_id: &HashMap<i64, User>) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        detail,
        status,
        visibility,
        assignee_id,
        due_date,
        creator_id,
        updater_id,
        created_at,
        updated_at,
    } = row;

    let data = PersistedTaskData {
        id: task_id_from_column(id)?,
        title: TaskTitle::new(title).map_err(TaskRepositoryError::persistence)?,
        detail: detail
            .map(TaskDetail::new)
            .transpose()
            .map_err(TaskRepositoryError::persistence)?,
        status: TaskStatus::from_storage(&status).map_err(TaskRepositoryError::persistence)?,
        visibility: TaskVisibility::from_storage(&visibility)
            .map_err(TaskRepositoryError::persistence)?,
        assignee: assignee_id
            .map(|raw| lookup_user(users_by_id, raw))
            .transpose()?,
        due_date,
        creator: lookup_user(users_by_id, creator_id)?,
        updater: lookup_user(users_by_id, updater_id)?,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}
