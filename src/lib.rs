//! PayLedger Payroll Calculation Engine Library
//!
//! This library provides multi-tenant payroll calculation: progressive
//! income tax resolution, statutory contributions, itemized payroll
//! generation, pay stub numbering and period-wide batch processing.

pub mod config;
pub mod core;
pub mod modules;

// Re-export commonly used types
pub use modules::employees;
pub use modules::payroll;
pub use modules::periods;
pub use modules::taxes;
