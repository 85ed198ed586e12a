//! Permission predicates over an authenticated principal.

use crate::company::domain::CompanyId;
use crate::identity::domain::{Auth, User, UserId, UserRole, UserType};

/// An actor whose identity, company membership, role, and type are known.
///
/// The provided methods are the permission predicates. They are total: any
/// combination of inputs yields a decision, never an error.
pub trait Principal {
    /// Returns the actor's user identifier.
    fn user_id(&self) -> UserId;

    /// Returns the company the actor belongs to.
    fn company_id(&self) -> CompanyId;

    /// Returns the actor's role.
    fn role(&self) -> UserRole;

    /// Returns the actor's user type.
    fn user_type(&self) -> UserType;

    /// Returns `true` when the actor is a member of `company_id`.
    fn belongs_to(&self, company_id: CompanyId) -> bool {
        self.company_id() == company_id
    }

    /// Returns `true` for any member of the admin company.
    ///
    /// Superusers may read the records of every company.
    fn is_super_user(&self) -> bool {
        self.company_id().is_admin_company()
    }

    /// Returns `true` for admin-type members of the admin company.
    ///
    /// Superadmins may perform every administrative action.
    fn is_super_admin(&self) -> bool {
        self.is_super_user() && self.user_type() == UserType::Admin
    }

    /// Returns `true` when the actor may create or update users of
    /// `company_id`.
    fn can_admin_action(&self, company_id: CompanyId) -> bool {
        self.is_super_admin()
            || (self.belongs_to(company_id) && self.user_type() == UserType::Admin)
    }

    /// Returns `true` when the actor may create or modify tasks of
    /// `company_id`.
    ///
    /// Only editors of that very company qualify; admin-company membership
    /// does not extend editing to other companies.
    fn can_edit(&self, company_id: CompanyId) -> bool {
        self.belongs_to(company_id) && self.role() == UserRole::Editor
    }

    /// Returns `true` when the actor may read resources of `company_id`.
    ///
    /// Membership suffices regardless of role; superusers may read every
    /// company.
    fn can_view(&self, company_id: CompanyId) -> bool {
        self.is_super_user() || self.belongs_to(company_id)
    }
}

impl Principal for Auth {
    fn user_id(&self) -> UserId {
        self.id()
    }

    fn company_id(&self) -> CompanyId {
        Self::company_id(self)
    }

    fn role(&self) -> UserRole {
        Self::role(self)
    }

    fn user_type(&self) -> UserType {
        Self::user_type(self)
    }
}

impl Principal for User {
    fn user_id(&self) -> UserId {
        self.id()
    }

    fn company_id(&self) -> CompanyId {
        Self::company_id(self)
    }

    fn role(&self) -> UserRole {
        Self::role(self)
    }

    fn user_type(&self) -> UserType {
        Self::user_type(self)
    }
}
