pub mod calculator;
pub mod contributions;
pub mod payroll_service;
pub mod period_processor;
pub mod stub_numbers;

pub use calculator::PayrollCalculator;
pub use payroll_service::PayrollService;
pub use period_processor::PeriodProcessor;
pub use stub_numbers::StubNumberService;
