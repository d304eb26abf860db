pub mod payroll_period;

pub use payroll_period::PayrollPeriod;
