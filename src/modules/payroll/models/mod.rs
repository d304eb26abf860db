pub mod calculation;
pub mod pay_stub;
pub mod payroll;
pub mod payroll_item;
pub mod summary;

pub use calculation::{
    Allowance, Deduction, Overtime, PayrollCalculationInput, PayrollCalculationResult,
};
pub use pay_stub::{PayStub, PayStubStatus};
pub use payroll::{Payroll, PayrollStatus};
pub use payroll_item::{PayrollItem, PayrollItemCategory, PayrollItemType};
pub use summary::{EmployeeOutcome, OutcomeStatus, ProcessingSummary};
