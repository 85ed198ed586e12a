//! Shared tenancy setup for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use sha2::{Digest, Sha256};
use taskgate::company::{
    adapters::memory::InMemoryCompanyRepository,
    domain::{Company, CompanyId, CompanyName},
    ports::CompanyRepository,
    services::CompanyService,
};
use taskgate::identity::{
    adapters::memory::InMemoryIdentityRepository,
    domain::{Auth, AuthProfile, PasswordHash, UserName, UserRole, UserType},
    ports::AuthRepository,
    services::{AuthService, CreateUserRequest, UserService},
};
use taskgate::session::{
    SessionClaims, SessionConfig, SessionService, SigningKey, TokenIssueError, TokenIssuer,
};
use taskgate::task::{adapters::memory::InMemoryTaskRepository, services::TaskService};

/// Password every seeded user signs in with.
pub const PASSWORD: &str = "correct horse";

/// Issues `<claims-json>.<sha256(key || claims-json)>` tokens.
pub struct DigestIssuer {
    config: SessionConfig,
}

impl DigestIssuer {
    /// Creates an issuer signing with the configured key.
    #[must_use]
    pub const fn new(config: SessionConfig) -> Self {
        Self { config }
    }
}

impl TokenIssuer for DigestIssuer {
    fn issue(&self, claims: &SessionClaims) -> Result<String, TokenIssueError> {
        let payload =
            serde_json::to_string(claims).map_err(|err| TokenIssueError(err.to_string()))?;
        let mut hasher = Sha256::new();
        hasher.update(self.config.signing_key().as_bytes());
        hasher.update(payload.as_bytes());
        Ok(format!("{payload}.{:x}", hasher.finalize()))
    }
}

/// Task service over in-memory adapters.
pub type Tasks = TaskService<InMemoryTaskRepository, InMemoryIdentityRepository, DefaultClock>;

/// Session service over in-memory adapters.
pub type Sessions = SessionService<InMemoryIdentityRepository, DigestIssuer, DefaultClock>;

/// Two companies wired to every service.
///
/// Company 1 is the admin company with superadmin `u1`. Company 2 has admin
/// `u2`, editor `u3`, and viewer `u4`, all created through the services.
pub struct Tenancy {
    pub companies: CompanyService<InMemoryCompanyRepository>,
    pub accounts: AuthService<InMemoryIdentityRepository, InMemoryCompanyRepository>,
    pub users: UserService<InMemoryIdentityRepository>,
    pub tasks: Tasks,
    pub sessions: Sessions,
    pub tenant: CompanyId,
    pub u1: Auth,
    pub u2: Auth,
    pub u3: Auth,
    pub u4: Auth,
}

/// Builds the two-company tenancy.
///
/// # Errors
///
/// Returns an error if seeding or any administrative call fails.
#[fixture]
pub async fn tenancy() -> Result<Tenancy, eyre::Report> {
    let company_repo = Arc::new(InMemoryCompanyRepository::new());
    let identities = Arc::new(InMemoryIdentityRepository::new());

    company_repo
        .store(&Company::new(CompanyId::ADMIN, CompanyName::new("Admin Co")?))
        .await?;
    let u1 = Auth::new(
        identities.allocate_id().await?,
        AuthProfile {
            name: UserName::new("root")?,
            role: UserRole::Editor,
            user_type: UserType::Admin,
        },
        PasswordHash::from_password(PASSWORD)?,
        CompanyId::ADMIN,
    );
    identities.store(&u1).await?;

    let companies = CompanyService::new(Arc::clone(&company_repo));
    let accounts = AuthService::new(Arc::clone(&identities), company_repo);
    let tenant = companies.create(&u1, "Tenant B").await?;

    let u2_id = accounts
        .create(
            &u1,
            tenant,
            CreateUserRequest::new("b-admin", PASSWORD, UserRole::Editor, UserType::Admin),
        )
        .await?;
    let u2 = accounts.get(u2_id).await?;
    let u3_id = accounts
        .create(
            &u2,
            tenant,
            CreateUserRequest::new("b-editor", PASSWORD, UserRole::Editor, UserType::Normal),
        )
        .await?;
    let u4_id = accounts
        .create(
            &u2,
            tenant,
            CreateUserRequest::new("b-viewer", PASSWORD, UserRole::Viewer, UserType::Normal),
        )
        .await?;

    let config = SessionConfig::new(SigningKey::new("integration-key")?, 600)?;
    let clock = Arc::new(DefaultClock);
    Ok(Tenancy {
        users: UserService::new(Arc::clone(&identities)),
        tasks: TaskService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::clone(&identities),
            Arc::clone(&clock),
        ),
        sessions: SessionService::new(
            identities,
            Arc::new(DigestIssuer::new(config.clone())),
            clock,
            config,
        ),
        u3: accounts.get(u3_id).await?,
        u4: accounts.get(u4_id).await?,
        companies,
        accounts,
        tenant,
        u1,
        u2,
    })
}
