use rust_decimal::Decimal;
use serde::Serialize;

/// How one employee fared in a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OutcomeStatus {
    #[serde(rename = "processed")]
    Processed,

    #[serde(rename = "skipped")]
    Skipped,

    #[serde(rename = "error")]
    Error,
}

impl std::fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutcomeStatus::Processed => write!(f, "processed"),
            OutcomeStatus::Skipped => write!(f, "skipped"),
            OutcomeStatus::Error => write!(f, "error"),
        }
    }
}

/// Per-employee detail line in a batch summary.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeOutcome {
    pub employee_id: String,
    pub staff_number: String,
    pub employee_name: String,
    pub status: OutcomeStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_salary: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Result of processing a whole period. The batch never aborts on a
/// per-employee failure, so counts always cover every active employee.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessingSummary {
    pub processed: u32,
    pub skipped: u32,
    pub errors: u32,
    pub details: Vec<EmployeeOutcome>,
}

impl ProcessingSummary {
    pub fn record_processed(
        &mut self,
        employee_id: impl Into<String>,
        staff_number: impl Into<String>,
        employee_name: impl Into<String>,
        net_salary: Decimal,
    ) {
        self.processed += 1;
        self.details.push(EmployeeOutcome {
            employee_id: employee_id.into(),
            staff_number: staff_number.into(),
            employee_name: employee_name.into(),
            status: OutcomeStatus::Processed,
            net_salary: Some(net_salary),
            reason: None,
        });
    }

    pub fn record_skipped(
        &mut self,
        employee_id: impl Into<String>,
        staff_number: impl Into<String>,
        employee_name: impl Into<String>,
        reason: impl Into<String>,
    ) {
        self.skipped += 1;
        self.details.push(EmployeeOutcome {
            employee_id: employee_id.into(),
            staff_number: staff_number.into(),
            employee_name: employee_name.into(),
            status: OutcomeStatus::Skipped,
            net_salary: None,
            reason: Some(reason.into()),
        });
    }

    pub fn record_error(
        &mut self,
        employee_id: impl Into<String>,
        staff_number: impl Into<String>,
        employee_name: impl Into<String>,
        reason: impl Into<String>,
    ) {
        self.errors += 1;
        self.details.push(EmployeeOutcome {
            employee_id: employee_id.into(),
            staff_number: staff_number.into(),
            employee_name: employee_name.into(),
            status: OutcomeStatus::Error,
            net_salary: None,
            reason: Some(reason.into()),
        });
    }

    /// Total employees the batch looked at.
    pub fn total(&self) -> u32 {
        self.processed + self.skipped + self.errors
    }
}
