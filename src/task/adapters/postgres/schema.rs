//! Diesel schema for task persistence.

use crate::identity::adapters::postgres::schema::users;

diesel::table! {
    /// Task records. Company scope is derived from the creator.
    tasks (id) {
        /// Task identifier, allocated from `tasks_id_seq`.
        id -> BigInt,
        /// Title, 1 to 50 code points.
        #[max_length = 50]
        title -> Varchar,
        /// Optional detail, at most 200 code points.
        detail -> Nullable<Text>,
        /// `NEW`, `PROCESSING`, or `DONE`.
        #[max_length = 16]
        status -> Varchar,
        /// `ME` or `COMPANY`.
        #[max_length = 16]
        visibility -> Varchar,
        /// Person-in-charge.
        assignee_id -> Nullable<BigInt>,
        /// Optional deadline.
        due_date -> Nullable<Timestamptz>,
        /// Creating user.
        creator_id -> BigInt,
        /// Last writer.
        updater_id -> BigInt,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(tasks, users);
