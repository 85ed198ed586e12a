//! `PostgreSQL` repository implementation for company storage.

use super::{
    models::{CompanyRow, NewCompanyRow},
    schema::companies,
};
use crate::company::{
    domain::{Company, CompanyId, CompanyName},
    ports::{CompanyRepository, CompanyRepositoryError, CompanyRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::BigInt;

/// `PostgreSQL` connection pool type used by company adapters.
pub type CompanyPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed company repository.
#[derive(Debug, Clone)]
pub struct PostgresCompanyRepository {
    pool: CompanyPgPool,
}

impl PostgresCompanyRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: CompanyPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> CompanyRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> CompanyRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(CompanyRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(CompanyRepositoryError::persistence)?
    }
}

#[async_trait]
impl CompanyRepository for PostgresCompanyRepository {
    async fn allocate_id(&self) -> CompanyRepositoryResult<CompanyId> {
        self.run_blocking(|connection| {
            let raw = diesel::select(diesel::dsl::sql::<BigInt>("nextval('companies_id_seq')"))
                .get_result::<i64>(connection)
                .map_err(CompanyRepositoryError::persistence)?;
            company_id_from_column(raw)
        })
        .await
    }

    async fn store(&self, company: &Company) -> CompanyRepositoryResult<()> {
        let company_id = company.id();
        let new_row = to_new_row(company)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(companies::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        CompanyRepositoryError::DuplicateCompany(company_id)
                    }
                    _ => CompanyRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, company: &Company) -> CompanyRepositoryResult<()> {
        let company_id = company.id();
        let row = to_new_row(company)?;

        self.run_blocking(move |connection| {
            let updated_count = diesel::update(companies::table.filter(companies::id.eq(row.id)))
                .set(companies::name.eq(&row.name))
                .execute(connection)
                .map_err(CompanyRepositoryError::persistence)?;

            if updated_count == 0 {
                return Err(CompanyRepositoryError::NotFound(company_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: CompanyId) -> CompanyRepositoryResult<Option<Company>> {
        let raw_id = company_id_to_column(id)?;
        self.run_blocking(move |connection| {
            let row = companies::table
                .filter(companies::id.eq(raw_id))
                .select(CompanyRow::as_select())
                .first::<CompanyRow>(connection)
                .optional()
                .map_err(CompanyRepositoryError::persistence)?;
            row.map(row_to_company).transpose()
        })
        .await
    }
}

fn company_id_to_column(id: CompanyId) -> CompanyRepositoryResult<i64> {
    i64::try_from(id.value()).map_err(CompanyRepositoryError::persistence)
}

fn company_id_from_column(raw: i64) -> CompanyRepositoryResult<CompanyId> {
    let value = u64::try_from(raw).map_err(CompanyRepositoryError::persistence)?;
    CompanyId::new(value).map_err(CompanyRepositoryError::persistence)
}

fn to_new_row(company: &Company) -> CompanyRepositoryResult<NewCompanyRow> {
    Ok(NewCompanyRow {
        id: company_id_to_column(company.id())?,
        name: company.name().as_str().to_owned(),
    })
}

fn row_to_company(row: CompanyRow) -> CompanyRepositoryResult<Company> {
    let CompanyRow { id, name } = row;
    let company_id = company_id_from_column(id)?;
    let company_name = CompanyName::new(name).map_err(CompanyRepositoryError::persistence)?;
    Ok(Company::new(company_id, company_name))
}
