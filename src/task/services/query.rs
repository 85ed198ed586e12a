//! Tunables for task list queries.

use serde::{Deserialize, Serialize};

/// Behaviour of task list operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TaskQueryConfig {
    /// Report a list with no qualifying rows as not found instead of
    /// returning an empty collection.
    ///
    /// Callers cannot tell an empty company from a fully filtered result
    /// while this is enabled.
    pub empty_result_is_not_found: bool,
}

impl Default for TaskQueryConfig {
    fn default() -> Self {
        Self {
            empty_result_is_not_found: true,
        }
    }
}
