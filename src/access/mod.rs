//! Authorization and task visibility engine.
//!
//! Everything in this module is a pure function of data already fetched for
//! the current request:
//!
//! - [`Principal`] carries the permission predicates every operation is
//!   gated on.
//! - [`authorize`] turns a denied predicate into a structured
//!   [`AccessDenied`] outcome.
//! - [`visibility`] decides which tasks a viewer may see, both for single
//!   task reads and for list queries pushed down to repositories.

mod denial;
mod principal;
pub mod visibility;

pub use denial::{AccessDenied, Action, authorize};
pub use principal::Principal;
pub use visibility::{
    AssignedTaskFilter, CompanyTaskFilter, VisibilityDenial, check_task_in_company,
    check_task_visible,
};
