//! Company aggregate root.

use super::{CompanyId, CompanyName};
use serde::{Deserialize, Serialize};

/// Tenant grouping users and, through its members, tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    id: CompanyId,
    name: CompanyName,
}

impl Company {
    /// Creates a company from an allocated identifier and a validated name.
    #[must_use]
    pub const fn new(id: CompanyId, name: CompanyName) -> Self {
        Self { id, name }
    }

    /// Returns the company identifier.
    #[must_use]
    pub const fn id(&self) -> CompanyId {
        self.id
    }

    /// Returns the company name.
    #[must_use]
    pub const fn name(&self) -> &CompanyName {
        &self.name
    }

    /// Replaces the company name in place.
    pub fn rename(&mut self, name: CompanyName) {
        self.name = name;
    }
}
