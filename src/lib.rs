//! Taskgate: multi-tenant task management with company-scoped access control.
//!
//! Companies contain users; users create tasks and are assigned to them.
//! Every read and write is gated by the caller's role, user type, and company
//! membership, with one admin company whose members act as superusers across
//! all tenants.
//!
//! # Architecture
//!
//! Taskgate follows hexagonal architecture principles:
//!
//! - **Domain**: Validated value types and aggregates with no infrastructure
//!   dependencies
//! - **Ports**: Async repository traits and the token issuer
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//!
//! # Modules
//!
//! - [`access`]: Permission predicates and task visibility rules
//! - [`company`]: Tenants and their administration
//! - [`identity`]: Users, credentials, and user administration
//! - [`task`]: Task lifecycle, validation, and visibility-filtered reads
//! - [`session`]: Sign-in and principal resolution
//! - [`config`]: Startup configuration
//! - [`error`]: Failure taxonomy shared by every service

pub mod access;
pub mod company;
pub mod config;
pub mod error;
pub mod identity;
pub mod session;
pub mod task;
