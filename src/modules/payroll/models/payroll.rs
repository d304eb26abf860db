use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::calculation::PayrollCalculationResult;
use super::payroll_item::PayrollItem;
use crate::core::{AppError, Result};

/// Payroll approval lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR(20)", rename_all = "lowercase")]
pub enum PayrollStatus {
    /// Calculated and persisted, awaiting approval
    #[serde(rename = "pending")]
    Pending,

    /// Approved for payment
    #[serde(rename = "approved")]
    Approved,

    /// Payment disbursed
    #[serde(rename = "paid")]
    Paid,
}

impl Default for PayrollStatus {
    fn default() -> Self {
        PayrollStatus::Pending
    }
}

impl std::fmt::Display for PayrollStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayrollStatus::Pending => write!(f, "pending"),
            PayrollStatus::Approved => write!(f, "approved"),
            PayrollStatus::Paid => write!(f, "paid"),
        }
    }
}

impl std::str::FromStr for PayrollStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PayrollStatus::Pending),
            "approved" => Ok(PayrollStatus::Approved),
            "paid" => Ok(PayrollStatus::Paid),
            _ => Err(format!("Invalid payroll status: {}", s)),
        }
    }
}

/// One employee's payroll for one period. Created once by the period
/// processor and never recomputed in place; reprocessing requires
/// deleting the period's records first.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Payroll {
    pub id: String,
    pub tenant_id: String,
    pub employee_id: String,
    pub payroll_period_id: String,
    pub basic_salary: Decimal,
    pub gross_salary: Decimal,
    pub total_deductions: Decimal,
    pub net_salary: Decimal,

    #[serde(skip_deserializing)]
    pub status: PayrollStatus,

    #[serde(skip_deserializing)]
    pub created_at: DateTime<Utc>,

    #[serde(skip_deserializing)]
    pub updated_at: DateTime<Utc>,

    /// Itemized lines, joined from the payroll_items table.
    #[sqlx(skip)]
    #[serde(default)]
    pub items: Vec<PayrollItem>,
}

impl Payroll {
    /// Build a payroll row (with items) from a calculation result.
    pub fn from_calculation(
        tenant_id: impl Into<String>,
        employee_id: impl Into<String>,
        payroll_period_id: impl Into<String>,
        result: &PayrollCalculationResult,
    ) -> Self {
        let now = Utc::now();
        let id = Uuid::new_v4().to_string();
        let items = result
            .items
            .iter()
            .cloned()
            .map(|mut item| {
                item.payroll_id = Some(id.clone());
                item
            })
            .collect();

        Self {
            id,
            tenant_id: tenant_id.into(),
            employee_id: employee_id.into(),
            payroll_period_id: payroll_period_id.into(),
            basic_salary: result.basic_salary,
            gross_salary: result.gross_salary,
            total_deductions: result.total_deductions,
            net_salary: result.net_salary,
            status: PayrollStatus::Pending,
            created_at: now,
            updated_at: now,
            items,
        }
    }

    /// Advance the approval lifecycle. Only pending→approved and
    /// approved→paid are legal; payrolls never move backwards.
    pub fn update_status(&mut self, new_status: PayrollStatus) -> Result<()> {
        match (self.status, new_status) {
            (PayrollStatus::Pending, PayrollStatus::Approved)
            | (PayrollStatus::Approved, PayrollStatus::Paid) => {
                self.status = new_status;
                self.updated_at = Utc::now();
                Ok(())
            }
            _ => Err(AppError::invalid_state(format!(
                "Invalid payroll status transition from {} to {}",
                self.status, new_status
            ))),
        }
    }
}
