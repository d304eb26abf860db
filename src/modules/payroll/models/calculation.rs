use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::payroll_item::PayrollItem;

/// A named extra earning on top of basic salary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Allowance {
    pub name: String,
    pub amount: Decimal,
}

/// Overtime worked in a period; pay is `hours × rate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Overtime {
    pub hours: Decimal,
    pub rate: Decimal,
}

/// A named non-statutory deduction (loan repayment, advance recovery).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deduction {
    pub name: String,
    pub amount: Decimal,
}

/// Everything the calculation engine needs for one employee in one
/// period. Built per request; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollCalculationInput {
    pub employee_id: String,
    pub payroll_period_id: String,
    pub tenant_id: String,
    pub basic_salary: Decimal,

    #[serde(default)]
    pub allowances: Vec<Allowance>,

    #[serde(default)]
    pub overtime: Option<Overtime>,

    #[serde(default)]
    pub other_deductions: Vec<Deduction>,
}

impl PayrollCalculationInput {
    /// Input with basic salary only, as the period processor builds it.
    pub fn basic(
        employee_id: impl Into<String>,
        payroll_period_id: impl Into<String>,
        tenant_id: impl Into<String>,
        basic_salary: Decimal,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            payroll_period_id: payroll_period_id.into(),
            tenant_id: tenant_id.into(),
            basic_salary,
            allowances: Vec::new(),
            overtime: None,
            other_deductions: Vec::new(),
        }
    }
}

/// The full earnings/deductions breakdown for one calculation.
///
/// Invariants the engine maintains:
/// `gross_salary = basic_salary + allowances_total + overtime_amount`,
/// `total_deductions = income_tax + health + pension + other`,
/// `net_salary = gross_salary - total_deductions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollCalculationResult {
    pub basic_salary: Decimal,
    pub allowances_total: Decimal,
    pub overtime_amount: Decimal,
    pub gross_salary: Decimal,
    pub income_tax: Decimal,
    pub health_contribution: Decimal,
    pub pension_contribution: Decimal,
    pub other_deductions_total: Decimal,
    pub total_deductions: Decimal,
    pub net_salary: Decimal,

    /// Ordered display lines; zero-valued optional components are omitted.
    pub items: Vec<PayrollItem>,
}
