use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Employee record as the payroll engine sees it.
///
/// Employees are administered elsewhere; payroll only reads identity,
/// configured salary and active status. `basic_salary` is optional because
/// "no salary configured" is a state the period processor must recognize.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Employee {
    pub id: String,
    pub tenant_id: String,
    pub staff_number: String,
    pub first_name: String,
    pub last_name: String,
    pub basic_salary: Option<Decimal>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    pub fn new(
        tenant_id: impl Into<String>,
        staff_number: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        basic_salary: Option<Decimal>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id: tenant_id.into(),
            staff_number: staff_number.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            basic_salary,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// True when a positive salary is configured. Employees without one are
    /// rejected by the single-employee path and reported as errors in bulk
    /// processing.
    pub fn has_payable_salary(&self) -> bool {
        matches!(self.basic_salary, Some(salary) if salary > Decimal::ZERO)
    }
}
