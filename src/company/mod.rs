//! Company management for taskgate.
//!
//! Companies are the tenants of the system. One well-known company, the
//! admin company, grants its members cross-company privileges. Companies
//! are created and renamed by superadmins and are never deleted. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
