//! Task lifecycle management for taskgate.
//!
//! Tasks are created by editors of a company, optionally assigned to a
//! person-in-charge of the same company, and moved between `NEW`,
//! `PROCESSING`, and `DONE`. Every read goes through the visibility rules
//! in [`crate::access`]. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
