use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};

use super::calculator::PayrollCalculator;
use super::stub_numbers::StubNumberService;
use crate::config::statutory::StatutoryConfig;
use crate::core::{AppError, Result};
use crate::modules::employees::models::Employee;
use crate::modules::employees::repositories::EmployeeRepository;
use crate::modules::payroll::models::{
    PayStub, Payroll, PayrollCalculationInput, PayrollCalculationResult, ProcessingSummary,
};
use crate::modules::payroll::repositories::{PayStubRepository, PayrollRepository};
use crate::modules::periods::repositories::PeriodRepository;
use crate::modules::taxes::models::TaxBracket;
use crate::modules::taxes::repositories::TaxBracketRepository;

/// How many stub numbers to try before giving up on an insert.
const STUB_NUMBER_ATTEMPTS: u32 = 5;

/// Drives payroll calculation and persistence for one employee or a
/// whole period.
///
/// Each employee's payroll, items and stub are written in a single
/// transaction; a batch failure for one employee never rolls back the
/// others. Batches iterate employees strictly sequentially, so the
/// duplicate check for a later employee observes all earlier writes.
pub struct PeriodProcessor {
    calculator: PayrollCalculator,
    stub_numbers: StubNumberService,
    employees: Arc<dyn EmployeeRepository>,
    periods: Arc<dyn PeriodRepository>,
    tax_brackets: Arc<dyn TaxBracketRepository>,
    payrolls: Arc<dyn PayrollRepository>,
}

impl PeriodProcessor {
    pub fn new(
        config: StatutoryConfig,
        employees: Arc<dyn EmployeeRepository>,
        periods: Arc<dyn PeriodRepository>,
        tax_brackets: Arc<dyn TaxBracketRepository>,
        payrolls: Arc<dyn PayrollRepository>,
        stubs: Arc<dyn PayStubRepository>,
    ) -> Self {
        Self {
            calculator: PayrollCalculator::new(config),
            stub_numbers: StubNumberService::new(stubs),
            employees,
            periods,
            tax_brackets,
            payrolls,
        }
    }

    /// Process payroll for a single employee in a period.
    ///
    /// Fails with NotFound when the period or employee does not exist
    /// for the tenant, Conflict when a payroll already exists for the
    /// pair, and InvalidState when the employee has no positive salary.
    pub async fn process_employee(
        &self,
        period_id: &str,
        employee_id: &str,
        tenant_id: &str,
    ) -> Result<Payroll> {
        self.require_period(period_id, tenant_id).await?;

        if self
            .payrolls
            .exists_for_employee_period(employee_id, period_id, tenant_id)
            .await?
        {
            return Err(AppError::conflict(format!(
                "Payroll already exists for employee {} in period {}",
                employee_id, period_id
            )));
        }

        let employee = self
            .employees
            .find_by_id(employee_id, tenant_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Employee {} not found", employee_id)))?;

        let salary = employee
            .basic_salary
            .filter(|s| *s > Decimal::ZERO)
            .ok_or_else(|| {
                AppError::invalid_state(format!(
                    "No salary configured for employee {}",
                    employee_id
                ))
            })?;

        let brackets = self.tax_brackets.find_active(tenant_id).await?;
        let input = PayrollCalculationInput::basic(employee_id, period_id, tenant_id, salary);
        let result = self.calculator.calculate(&input, &brackets);

        self.persist_payroll(tenant_id, &employee, period_id, &result)
            .await
    }

    /// Process payroll for every active employee of the tenant.
    ///
    /// Employees with an existing payroll are skipped; missing salary or
    /// a persistence failure is recorded as an error; the batch always
    /// runs to the end. Only setup failures (period lookup, employee
    /// list, bracket load) abort the whole call.
    pub async fn process_period(
        &self,
        period_id: &str,
        tenant_id: &str,
    ) -> Result<ProcessingSummary> {
        self.require_period(period_id, tenant_id).await?;
        let employees = self.employees.find_active(tenant_id).await?;
        let brackets = self.tax_brackets.find_active(tenant_id).await?;

        info!(
            period_id = %period_id,
            employees = employees.len(),
            "Processing payroll period"
        );

        let mut summary = ProcessingSummary::default();
        for employee in &employees {
            self.process_batch_employee(employee, period_id, tenant_id, &brackets, &mut summary)
                .await;
        }

        info!(
            period_id = %period_id,
            processed = summary.processed,
            skipped = summary.skipped,
            errors = summary.errors,
            "Completed payroll period processing"
        );
        Ok(summary)
    }

    /// Delete every payroll, item and stub recorded against a period so
    /// it can be reprocessed. Returns how many payrolls were removed.
    pub async fn delete_for_period(&self, period_id: &str, tenant_id: &str) -> Result<u64> {
        self.require_period(period_id, tenant_id).await?;
        self.payrolls.delete_for_period(period_id, tenant_id).await
    }

    async fn require_period(&self, period_id: &str, tenant_id: &str) -> Result<()> {
        self.periods
            .find_by_id(period_id, tenant_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Payroll period {} not found", period_id))
            })?;
        Ok(())
    }

    async fn process_batch_employee(
        &self,
        employee: &Employee,
        period_id: &str,
        tenant_id: &str,
        brackets: &[TaxBracket],
        summary: &mut ProcessingSummary,
    ) {
        let exists = match self
            .payrolls
            .exists_for_employee_period(&employee.id, period_id, tenant_id)
            .await
        {
            Ok(exists) => exists,
            Err(e) => {
                warn!(employee_id = %employee.id, error = %e, "Payroll duplicate check failed");
                summary.record_error(
                    &employee.id,
                    &employee.staff_number,
                    employee.full_name(),
                    e.to_string(),
                );
                return;
            }
        };
        if exists {
            warn!(employee_id = %employee.id, "Skipping employee, payroll already exists");
            summary.record_skipped(
                &employee.id,
                &employee.staff_number,
                employee.full_name(),
                "Payroll already exists",
            );
            return;
        }

        let Some(salary) = employee.basic_salary.filter(|s| *s > Decimal::ZERO) else {
            warn!(employee_id = %employee.id, "No salary configured, recording error");
            summary.record_error(
                &employee.id,
                &employee.staff_number,
                employee.full_name(),
                "No salary configured",
            );
            return;
        };

        let input = PayrollCalculationInput::basic(&employee.id, period_id, tenant_id, salary);
        let result = self.calculator.calculate(&input, brackets);

        match self
            .persist_payroll(tenant_id, employee, period_id, &result)
            .await
        {
            Ok(payroll) => {
                summary.record_processed(
                    &employee.id,
                    &employee.staff_number,
                    employee.full_name(),
                    payroll.net_salary,
                );
            }
            // A concurrent writer beat this batch to the insert.
            Err(e) if e.is_conflict() => {
                warn!(employee_id = %employee.id, "Skipping employee, payroll already exists");
                summary.record_skipped(
                    &employee.id,
                    &employee.staff_number,
                    employee.full_name(),
                    "Payroll already exists",
                );
            }
            Err(e) => {
                warn!(employee_id = %employee.id, error = %e, "Payroll persistence failed");
                summary.record_error(
                    &employee.id,
                    &employee.staff_number,
                    employee.full_name(),
                    e.to_string(),
                );
            }
        }
    }

    /// Write payroll + items + stub in one transaction, retrying with a
    /// fresh stub number when the stub collides with a concurrent
    /// insert. A conflict on the payroll row itself is not retried.
    async fn persist_payroll(
        &self,
        tenant_id: &str,
        employee: &Employee,
        period_id: &str,
        result: &PayrollCalculationResult,
    ) -> Result<Payroll> {
        let payroll = Payroll::from_calculation(tenant_id, &employee.id, period_id, result);

        for attempt in 1..=STUB_NUMBER_ATTEMPTS {
            let now = Utc::now();
            let stub_number = self.stub_numbers.next_stub_number(tenant_id, now).await?;
            let stub = PayStub::new(
                tenant_id,
                &employee.id,
                &payroll.id,
                period_id,
                &stub_number,
                now,
            );

            match self.payrolls.create(&payroll, &stub).await {
                Ok(()) => return Ok(payroll),
                Err(e) if e.is_conflict() => {
                    // The transaction rolled back; find out which
                    // constraint fired. A payroll row for the pair means
                    // a concurrent duplicate, otherwise the stub number
                    // collided and a recount is worth another try.
                    if self
                        .payrolls
                        .exists_for_employee_period(&employee.id, period_id, tenant_id)
                        .await?
                    {
                        return Err(AppError::conflict(format!(
                            "Payroll already exists for employee {} in period {}",
                            employee.id, period_id
                        )));
                    }
                    warn!(
                        attempt,
                        stub_number = %stub_number,
                        employee_id = %employee.id,
                        "Stub number collision, retrying with a fresh count"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(format!(
            "Could not allocate a unique stub number for employee {} after {} attempts",
            employee.id, STUB_NUMBER_ATTEMPTS
        )))
    }
}
