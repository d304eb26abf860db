// Test Helper Modules
//
// Shared infrastructure for the payroll engine's test suites.
//
// Integration flows run against the in-memory repositories in `memory`,
// which mirror the MySQL implementations' semantics (uniqueness
// conflicts, ordering, all-or-nothing create) without needing a
// database. MySQL-backed tests use `test_database` and are ignored
// unless a test database is configured.

pub mod test_database;

// Re-export commonly used types and functions
pub use memory::*;
pub use test_data::*;
pub use test_database::*;
