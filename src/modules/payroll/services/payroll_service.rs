use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::calculator::PayrollCalculator;
use crate::config::statutory::StatutoryConfig;
use crate::core::{AppError, Result};
use crate::modules::payroll::models::{
    PayStub, Payroll, PayrollCalculationInput, PayrollCalculationResult,
};
use crate::modules::payroll::repositories::{PayStubRepository, PayrollRepository};
use crate::modules::taxes::repositories::TaxBracketRepository;

/// Read-side payroll operations: stateless calculation previews and
/// access to persisted payrolls and pay stubs.
pub struct PayrollService {
    calculator: PayrollCalculator,
    tax_brackets: Arc<dyn TaxBracketRepository>,
    payrolls: Arc<dyn PayrollRepository>,
    stubs: Arc<dyn PayStubRepository>,
}

impl PayrollService {
    pub fn new(
        config: StatutoryConfig,
        tax_brackets: Arc<dyn TaxBracketRepository>,
        payrolls: Arc<dyn PayrollRepository>,
        stubs: Arc<dyn PayStubRepository>,
    ) -> Self {
        Self {
            calculator: PayrollCalculator::new(config),
            tax_brackets,
            payrolls,
            stubs,
        }
    }

    /// Calculate a payroll breakdown without persisting anything.
    /// Uses the tenant's active tax brackets when any are configured.
    pub async fn calculate_preview(
        &self,
        input: &PayrollCalculationInput,
    ) -> Result<PayrollCalculationResult> {
        let brackets = self.tax_brackets.find_active(&input.tenant_id).await?;
        Ok(self.calculator.calculate(input, &brackets))
    }

    /// Payroll with its items, or NotFound.
    pub async fn get_payroll(&self, id: &str, tenant_id: &str) -> Result<Payroll> {
        self.payrolls
            .find_by_id(id, tenant_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Payroll {} not found", id)))
    }

    /// Pay stub by id. The first read transitions the stub from
    /// generated to viewed and records when.
    pub async fn get_pay_stub(&self, id: &str, tenant_id: &str) -> Result<PayStub> {
        let stub = self
            .stubs
            .find_by_id(id, tenant_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Pay stub {} not found", id)))?;

        self.record_view(stub).await
    }

    /// Pay stub attached to a payroll, with the same first-read
    /// transition as `get_pay_stub`.
    pub async fn get_pay_stub_for_payroll(
        &self,
        payroll_id: &str,
        tenant_id: &str,
    ) -> Result<PayStub> {
        let stub = self
            .stubs
            .find_by_payroll(payroll_id, tenant_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("No pay stub for payroll {}", payroll_id))
            })?;

        self.record_view(stub).await
    }

    async fn record_view(&self, mut stub: PayStub) -> Result<PayStub> {
        let now = Utc::now();
        if stub.mark_viewed(now) {
            self.stubs
                .mark_viewed(&stub.id, &stub.tenant_id, now)
                .await?;
            info!(stub_id = %stub.id, stub_number = %stub.stub_number, "Pay stub viewed");
        }
        Ok(stub)
    }
}
