use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Pay stub read lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR(20)", rename_all = "lowercase")]
pub enum PayStubStatus {
    #[serde(rename = "generated")]
    Generated,

    #[serde(rename = "viewed")]
    Viewed,
}

impl Default for PayStubStatus {
    fn default() -> Self {
        PayStubStatus::Generated
    }
}

impl std::fmt::Display for PayStubStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayStubStatus::Generated => write!(f, "generated"),
            PayStubStatus::Viewed => write!(f, "viewed"),
        }
    }
}

impl std::str::FromStr for PayStubStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "generated" => Ok(PayStubStatus::Generated),
            "viewed" => Ok(PayStubStatus::Viewed),
            _ => Err(format!("Invalid pay stub status: {}", s)),
        }
    }
}

/// The employee-facing record of one payroll, 1:1 with a payroll row.
/// `stub_number` is unique per tenant and human readable.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PayStub {
    pub id: String,
    pub tenant_id: String,
    pub employee_id: String,
    pub payroll_id: String,
    pub payroll_period_id: String,
    pub stub_number: String,

    #[serde(skip_deserializing)]
    pub status: PayStubStatus,

    #[serde(skip_deserializing)]
    pub generated_at: DateTime<Utc>,

    #[serde(skip_deserializing)]
    pub viewed_at: Option<DateTime<Utc>>,
}

impl PayStub {
    pub fn new(
        tenant_id: impl Into<String>,
        employee_id: impl Into<String>,
        payroll_id: impl Into<String>,
        payroll_period_id: impl Into<String>,
        stub_number: impl Into<String>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id: tenant_id.into(),
            employee_id: employee_id.into(),
            payroll_id: payroll_id.into(),
            payroll_period_id: payroll_period_id.into(),
            stub_number: stub_number.into(),
            status: PayStubStatus::Generated,
            generated_at,
            viewed_at: None,
        }
    }

    /// Record the first read. Returns true when the status changed,
    /// false when the stub was already viewed.
    pub fn mark_viewed(&mut self, at: DateTime<Utc>) -> bool {
        if self.status == PayStubStatus::Viewed {
            return false;
        }
        self.status = PayStubStatus::Viewed;
        self.viewed_at = Some(at);
        true
    }
}
