//! Adapter implementations for company persistence.

pub mod memory;
pub mod postgres;
