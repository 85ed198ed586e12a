//! Structured permission denials.

use super::Principal;
use crate::company::domain::CompanyId;
use crate::identity::domain::UserId;
use std::fmt;
use thiserror::Error;

/// Company-scoped action an actor asks to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Read any company record. Requires superuser standing.
    ReadCompanies,
    /// Create or rename companies. Requires superadmin standing.
    ManageCompanies,
    /// Create or update users of a company.
    AdministerUsers(CompanyId),
    /// Read users and tasks of a company.
    ViewCompany(CompanyId),
    /// Create or modify tasks of a company.
    EditTasks(CompanyId),
}

impl Action {
    /// Evaluates the predicate guarding this action for `principal`.
    #[must_use]
    pub fn is_permitted_for<P: Principal + ?Sized>(self, principal: &P) -> bool {
        match self {
            Self::ReadCompanies => principal.is_super_user(),
            Self::ManageCompanies => principal.is_super_admin(),
            Self::AdministerUsers(company_id) => principal.can_admin_action(company_id),
            Self::ViewCompany(company_id) => principal.can_view(company_id),
            Self::EditTasks(company_id) => principal.can_edit(company_id),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadCompanies => f.write_str("read company records"),
            Self::ManageCompanies => f.write_str("manage companies"),
            Self::AdministerUsers(company_id) => {
                write!(f, "administer users of company {company_id}")
            }
            Self::ViewCompany(company_id) => write!(f, "view company {company_id}"),
            Self::EditTasks(company_id) => write!(f, "edit tasks of company {company_id}"),
        }
    }
}

/// An authenticated actor was refused an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("user {actor} may not {action}")]
pub struct AccessDenied {
    actor: UserId,
    action: Action,
}

impl AccessDenied {
    /// Creates a denial record.
    #[must_use]
    pub const fn new(actor: UserId, action: Action) -> Self {
        Self { actor, action }
    }

    /// Returns the refused actor.
    #[must_use]
    pub const fn actor(&self) -> UserId {
        self.actor
    }

    /// Returns the refused action.
    #[must_use]
    pub const fn action(&self) -> Action {
        self.action
    }
}

/// Checks that `principal` may perform `action`.
///
/// # Errors
///
/// Returns [`AccessDenied`] when the guarding predicate is false.
pub fn authorize<P: Principal + ?Sized>(principal: &P, action: Action) -> Result<(), AccessDenied> {
    if action.is_permitted_for(principal) {
        return Ok(());
    }
    tracing::warn!(
        actor = %principal.user_id(),
        company = %principal.company_id(),
        %action,
        "access denied"
    );
    Err(AccessDenied::new(principal.user_id(), action))
}
