pub mod employees;
pub mod payroll;
pub mod periods;
pub mod taxes;
