pub mod pay_stub_repository;
pub mod payroll_repository;

pub use pay_stub_repository::{MySqlPayStubRepository, PayStubRepository};
pub use payroll_repository::{MySqlPayrollRepository, PayrollRepository};
