use rust_decimal::Decimal;
use tracing::info;

use super::contributions::{health_contribution, pension_contribution};
use crate::config::statutory::StatutoryConfig;
use crate::modules::payroll::models::{
    PayrollCalculationInput, PayrollCalculationResult, PayrollItem, PayrollItemCategory,
};
use crate::modules::taxes::models::TaxBracket;
use crate::modules::taxes::services::TaxResolver;

/// Turns (basic salary, allowances, overtime, other deductions) into a
/// full earnings/deductions breakdown with net pay.
///
/// Pure: no I/O, no shared state, safe to call concurrently. Callers
/// are expected to validate `basic_salary > 0`; the engine itself
/// never fails.
pub struct PayrollCalculator {
    config: StatutoryConfig,
    tax_resolver: TaxResolver,
}

impl PayrollCalculator {
    pub fn new(config: StatutoryConfig) -> Self {
        let tax_resolver = TaxResolver::new(config.tax.clone());
        Self {
            config,
            tax_resolver,
        }
    }

    /// Full payroll breakdown for one employee in one period.
    ///
    /// Pension is deducted pre-tax, so taxable income is gross minus
    /// the pension contribution. Each statutory component is rounded
    /// once, which keeps `net + deductions == gross` exact.
    pub fn calculate(
        &self,
        input: &PayrollCalculationInput,
        tenant_brackets: &[TaxBracket],
    ) -> PayrollCalculationResult {
        let allowances_total: Decimal = input.allowances.iter().map(|a| a.amount).sum();
        let overtime_amount = input
            .overtime
            .as_ref()
            .map(|o| o.hours * o.rate)
            .unwrap_or(Decimal::ZERO);
        let gross_salary = input.basic_salary + allowances_total + overtime_amount;

        let pension = pension_contribution(gross_salary, &self.config);
        let taxable_income = gross_salary - pension;
        let income_tax = self.tax_resolver.resolve(taxable_income, tenant_brackets);
        let health = health_contribution(gross_salary, &self.config);

        let other_deductions_total: Decimal =
            input.other_deductions.iter().map(|d| d.amount).sum();
        let total_deductions = income_tax + health + pension + other_deductions_total;
        let net_salary = gross_salary - total_deductions;

        let items = build_items(input, overtime_amount, income_tax, health, pension);

        info!(
            employee_id = %input.employee_id,
            %gross_salary,
            %total_deductions,
            %net_salary,
            "Calculated payroll"
        );

        PayrollCalculationResult {
            basic_salary: input.basic_salary,
            allowances_total,
            overtime_amount,
            gross_salary,
            income_tax,
            health_contribution: health,
            pension_contribution: pension,
            other_deductions_total,
            total_deductions,
            net_salary,
            items,
        }
    }
}

/// Emit display lines in a fixed order: basic salary, allowances,
/// overtime, then income tax, health, pension, other deductions.
/// Zero-valued overtime and statutory components are omitted, so
/// position always equals the line's index.
fn build_items(
    input: &PayrollCalculationInput,
    overtime_amount: Decimal,
    income_tax: Decimal,
    health: Decimal,
    pension: Decimal,
) -> Vec<PayrollItem> {
    let mut items: Vec<PayrollItem> = Vec::new();

    items.push(PayrollItem::earning(
        PayrollItemCategory::BasicSalary,
        "Basic Salary",
        input.basic_salary,
        0,
    ));

    for allowance in &input.allowances {
        let position = items.len() as i32;
        items.push(PayrollItem::earning(
            PayrollItemCategory::Allowance,
            allowance.name.clone(),
            allowance.amount,
            position,
        ));
    }

    if overtime_amount > Decimal::ZERO {
        let position = items.len() as i32;
        items.push(PayrollItem::earning(
            PayrollItemCategory::Overtime,
            "Overtime",
            overtime_amount,
            position,
        ));
    }

    if income_tax > Decimal::ZERO {
        let position = items.len() as i32;
        items.push(PayrollItem::deduction(
            PayrollItemCategory::IncomeTax,
            "Income Tax",
            income_tax,
            true,
            position,
        ));
    }

    if health > Decimal::ZERO {
        let position = items.len() as i32;
        items.push(PayrollItem::deduction(
            PayrollItemCategory::HealthInsurance,
            "Health Insurance",
            health,
            true,
            position,
        ));
    }

    if pension > Decimal::ZERO {
        let position = items.len() as i32;
        items.push(PayrollItem::deduction(
            PayrollItemCategory::Pension,
            "Pension Contribution",
            pension,
            true,
            position,
        ));
    }

    for deduction in &input.other_deductions {
        let position = items.len() as i32;
        items.push(PayrollItem::deduction(
            PayrollItemCategory::Other,
            deduction.name.clone(),
            deduction.amount,
            false,
            position,
        ));
    }

    items
}
