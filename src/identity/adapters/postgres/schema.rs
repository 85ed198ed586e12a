//! Diesel schema for identity persistence.

diesel::table! {
    /// Credentialed users. Each row belongs to exactly one company.
    users (id) {
        /// User identifier, allocated from `users_id_seq`.
        id -> BigInt,
        /// Display name, 1 to 20 code points.
        #[max_length = 80]
        name -> Varchar,
        /// Hex SHA-256 credential digest.
        #[max_length = 64]
        password_hash -> Varchar,
        /// `EDITOR` or `VIEWER`.
        #[max_length = 16]
        role -> Varchar,
        /// `ADMIN` or `NORMAL`.
        #[max_length = 16]
        user_type -> Varchar,
        /// Owning company.
        company_id -> BigInt,
    }
}
