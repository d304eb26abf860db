use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::MySqlPool;

use crate::core::Result;
use crate::modules::payroll::models::PayStub;

/// Read and update access to pay stubs. Stub rows are created by
/// `PayrollRepository::create` alongside their payroll.
#[async_trait]
pub trait PayStubRepository: Send + Sync {
    /// How many of the tenant's stub numbers start with `prefix`.
    /// The numbering service derives the next sequence from this.
    async fn count_with_prefix(&self, tenant_id: &str, prefix: &str) -> Result<i64>;

    async fn find_by_id(&self, id: &str, tenant_id: &str) -> Result<Option<PayStub>>;

    async fn find_by_payroll(&self, payroll_id: &str, tenant_id: &str)
        -> Result<Option<PayStub>>;

    /// Persist the generated→viewed transition. A no-op when the stub
    /// was already viewed; the first `viewed_at` always wins.
    async fn mark_viewed(&self, id: &str, tenant_id: &str, viewed_at: DateTime<Utc>)
        -> Result<()>;
}

/// MySQL implementation of the pay stub repository.
pub struct MySqlPayStubRepository {
    pool: MySqlPool,
}

impl MySqlPayStubRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PayStubRepository for MySqlPayStubRepository {
    async fn count_with_prefix(&self, tenant_id: &str, prefix: &str) -> Result<i64> {
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM pay_stubs
            WHERE tenant_id = ? AND stub_number LIKE CONCAT(?, '%')
            "#,
        )
        .bind(tenant_id)
        .bind(prefix)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    async fn find_by_id(&self, id: &str, tenant_id: &str) -> Result<Option<PayStub>> {
        let stub = sqlx::query_as::<_, PayStub>(
            r#"
            SELECT id, tenant_id, employee_id, payroll_id, payroll_period_id,
                   stub_number, status, generated_at, viewed_at
            FROM pay_stubs
            WHERE id = ? AND tenant_id = ?
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(stub)
    }

    async fn find_by_payroll(
        &self,
        payroll_id: &str,
        tenant_id: &str,
    ) -> Result<Option<PayStub>> {
        let stub = sqlx::query_as::<_, PayStub>(
            r#"
            SELECT id, tenant_id, employee_id, payroll_id, payroll_period_id,
                   stub_number, status, generated_at, viewed_at
            FROM pay_stubs
            WHERE payroll_id = ? AND tenant_id = ?
            "#,
        )
        .bind(payroll_id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(stub)
    }

    async fn mark_viewed(
        &self,
        id: &str,
        tenant_id: &str,
        viewed_at: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE pay_stubs
            SET status = 'viewed', viewed_at = ?
            WHERE id = ? AND tenant_id = ? AND status = 'generated'
            "#,
        )
        .bind(viewed_at)
        .bind(id)
        .bind(tenant_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
