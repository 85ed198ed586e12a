//! Diesel schema for company persistence.

diesel::table! {
    /// Tenant companies.
    companies (id) {
        /// Company identifier, allocated from `companies_id_seq`.
        id -> BigInt,
        /// Display name, 1 to 20 code points.
        #[max_length = 80]
        name -> Varchar,
    }
}
