use async_trait::async_trait;
use sqlx::MySqlPool;
use tracing::info;

use crate::core::{AppError, Result};
use crate::modules::periods::models::PayrollPeriod;

/// Repository for payroll period persistence.
#[async_trait]
pub trait PeriodRepository: Send + Sync {
    async fn create(&self, period: &PayrollPeriod) -> Result<()>;
    async fn find_by_id(&self, id: &str, tenant_id: &str) -> Result<Option<PayrollPeriod>>;
    async fn list(&self, tenant_id: &str) -> Result<Vec<PayrollPeriod>>;

    /// Delete a period together with every payroll, payroll item and pay
    /// stub recorded against it, in one transaction.
    async fn delete(&self, id: &str, tenant_id: &str) -> Result<()>;
}

/// MySQL implementation of the period repository.
pub struct MySqlPeriodRepository {
    pool: MySqlPool,
}

impl MySqlPeriodRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PeriodRepository for MySqlPeriodRepository {
    async fn create(&self, period: &PayrollPeriod) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO payroll_periods
                (id, tenant_id, name, start_date, end_date, pay_date, description,
                 created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&period.id)
        .bind(&period.tenant_id)
        .bind(&period.name)
        .bind(period.start_date)
        .bind(period.end_date)
        .bind(period.pay_date)
        .bind(&period.description)
        .bind(period.created_at)
        .bind(period.updated_at)
        .execute(&self.pool)
        .await?;

        info!(period_id = %period.id, name = %period.name, "Created payroll period");
        Ok(())
    }

    async fn find_by_id(&self, id: &str, tenant_id: &str) -> Result<Option<PayrollPeriod>> {
        let period = sqlx::query_as::<_, PayrollPeriod>(
            r#"
            SELECT id, tenant_id, name, start_date, end_date, pay_date, description,
                   created_at, updated_at
            FROM payroll_periods
            WHERE id = ? AND tenant_id = ?
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(period)
    }

    async fn list(&self, tenant_id: &str) -> Result<Vec<PayrollPeriod>> {
        let periods = sqlx::query_as::<_, PayrollPeriod>(
            r#"
            SELECT id, tenant_id, name, start_date, end_date, pay_date, description,
                   created_at, updated_at
            FROM payroll_periods
            WHERE tenant_id = ?
            ORDER BY start_date DESC
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(periods)
    }

    async fn delete(&self, id: &str, tenant_id: &str) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        // Foreign keys are RESTRICT, so children go first: stubs, then
        // items, then payrolls, then the period row itself.
        sqlx::query(
            r#"
            DELETE ps FROM pay_stubs ps
            INNER JOIN payrolls p ON p.id = ps.payroll_id
            WHERE p.payroll_period_id = ? AND p.tenant_id = ?
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            DELETE pi FROM payroll_items pi
            INNER JOIN payrolls p ON p.id = pi.payroll_id
            WHERE p.payroll_period_id = ? AND p.tenant_id = ?
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM payrolls WHERE payroll_period_id = ? AND tenant_id = ?")
            .bind(id)
            .bind(tenant_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM payroll_periods WHERE id = ? AND tenant_id = ?")
            .bind(id)
            .bind(tenant_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(AppError::not_found(format!("Payroll period {} not found", id)));
        }

        tx.commit().await?;
        info!(period_id = %id, "Deleted payroll period and its payroll records");
        Ok(())
    }
}
