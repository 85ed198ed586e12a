//! User identities and credentials for taskgate.
//!
//! A [`domain::Auth`] is a credentialed user: the principal that signs in
//! and performs operations. A [`domain::User`] is the read-projection of the
//! same identity without its credential hash, which is what tasks embed as
//! creator, updater, and assignee. Users are created and updated by company
//! administrators and are never deleted.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
