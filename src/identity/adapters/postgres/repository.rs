//! `PostgreSQL` repository implementation for identity storage.

use super::{
    models::{NewUserRow, UserRow},
    schema::users,
};
use crate::company::domain::CompanyId;
use crate::identity::{
    domain::{Auth, PasswordHash, PersistedAuthData, User, UserId, UserName, UserRole, UserType},
    ports::{AuthRepository, IdentityRepositoryError, IdentityRepositoryResult, UserRepository},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::BigInt;

/// `PostgreSQL` connection pool type used by identity adapters.
pub type IdentityPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed identity repository.
#[derive(Debug, Clone)]
pub struct PostgresIdentityRepository {
    pool: IdentityPgPool,
}

impl PostgresIdentityRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: IdentityPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> IdentityRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> IdentityRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(IdentityRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(IdentityRepositoryError::persistence)?
    }

    async fn find_row(&self, id: UserId) -> IdentityRepositoryResult<Option<UserRow>> {
        let raw_id = user_id_to_column(id)?;
        self.run_blocking(move |connection| {
            users::table
                .filter(users::id.eq(raw_id))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(IdentityRepositoryError::persistence)
        })
        .await
    }
}

#[async_trait]
impl AuthRepository for PostgresIdentityRepository {
    async fn allocate_id(&self) -> IdentityRepositoryResult<UserId> {
        self.run_blocking(|connection| {
            let raw = diesel::select(diesel::dsl::sql::<BigInt>("nextval('users_id_seq')"))
                .get_result::<i64>(connection)
                .map_err(IdentityRepositoryError::persistence)?;
            user_id_from_column(raw)
        })
        .await
    }

    async fn store(&self, auth: &Auth) -> IdentityRepositoryResult<()> {
        let user_id = auth.id();
        let new_row = to_new_row(auth)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        IdentityRepositoryError::DuplicateUser(user_id)
                    }
                    _ => IdentityRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, auth: &Auth) -> IdentityRepositoryResult<()> {
        let user_id = auth.id();
        let row = to_new_row(auth)?;

        self.run_blocking(move |connection| {
            let updated_count = diesel::update(users::table.filter(users::id.eq(row.id)))
                .set((
                    users::name.eq(&row.name),
                    users::password_hash.eq(&row.password_hash),
                    users::role.eq(&row.role),
                    users::user_type.eq(&row.user_type),
                ))
                .execute(connection)
                .map_err(IdentityRepositoryError::persistence)?;

            if updated_count == 0 {
                return Err(IdentityRepositoryError::NotFound(user_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> IdentityRepositoryResult<Option<Auth>> {
        self.find_row(id).await?.map(row_to_auth).transpose()
    }
}

#[async_trait]
impl UserRepository for PostgresIdentityRepository {
    async fn find_by_id(&self, id: UserId) -> IdentityRepositoryResult<Option<User>> {
        self.find_row(id).await?.map(row_to_user).transpose()
    }
}

pub(crate) fn user_id_to_column(id: UserId) -> IdentityRepositoryResult<i64> {
    i64::try_from(id.value()).map_err(IdentityRepositoryError::persistence)
}

fn user_id_from_column(raw: i64) -> IdentityRepositoryResult<UserId> {
    let value = u64::try_from(raw).map_err(IdentityRepositoryError::persistence)?;
    UserId::new(value).map_err(IdentityRepositoryError::persistence)
}

fn company_id_from_column(raw: i64) -> IdentityRepositoryResult<CompanyId> {
    let value = u64::try_from(raw).map_err(IdentityRepositoryError::persistence)?;
    CompanyId::new(value).map_err(IdentityRepositoryError::persistence)
}

fn to_new_row(auth: &Auth) -> IdentityRepositoryResult<NewUserRow> {
    let company_id =
        i64::try_from(auth.company_id().value()).map_err(IdentityRepositoryError::persistence)?;
    Ok(NewUserRow {
        id: user_id_to_column(auth.id())?,
        name: auth.name().as_str().to_owned(),
        password_hash: auth.password_hash().as_str().to_owned(),
        role: auth.role().as_str().to_owned(),
        user_type: auth.user_type().as_str().to_owned(),
        company_id,
    })
}

fn row_to_auth(row: UserRow) -> IdentityRepositoryResult<Auth> {
    let password_hash = PasswordHash::from_persisted(row.password_hash.as_str())
        .map_err(IdentityRepositoryError::persistence)?;
    let user = row_to_user(row)?;
    Ok(Auth::from_persisted(PersistedAuthData {
        id: user.id(),
        name: user.name().clone(),
        password_hash,
        role: user.role(),
        user_type: user.user_type(),
        company_id: user.company_id(),
    }))
}

/// Maps a stored user row onto its read-projection.
///
/// Unknown role or user-type strings are reported as persistence failures
/// rather than defaulted.
pub(crate) fn row_to_user(row: UserRow) -> IdentityRepositoryResult<User> {
    let UserRow {
        id,
        name,
        role,
        user_type,
        company_id,
        ..
    } = row;

    let parsed_role =
        UserRole::from_storage(&role).map_err(IdentityRepositoryError::persistence)?;
    let parsed_type =
        UserType::from_storage(&user_type).map_err(IdentityRepositoryError::persistence)?;
    let parsed_name = UserName::new(name).map_err(IdentityRepositoryError::persistence)?;

    Ok(User::new(
        user_id_from_column(id)?,
        parsed_name,
        parsed_role,
        parsed_type,
        company_id_from_column(company_id)?,
    ))
}
