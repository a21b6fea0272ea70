//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` when a migration changes the table.

diesel::table! {
    /// Registered users.
    ///
    /// `CHECK` constraints mirror the domain bounds so rows written outside
    /// the service still satisfy the domain invariants.
    users (id) {
        /// Primary key issued by a `BIGSERIAL` sequence.
        id -> Int8,
        /// Username, 1 to 50 characters.
        username -> Varchar,
        /// Age in years, 0 to 120.
        age -> Int4,
        /// `male` or `female`.
        gender -> Varchar,
    }
}
