use async_trait::async_trait;
use sqlx::MySqlPool;
use tracing::info;

use crate::core::{AppError, Result};
use crate::modules::payroll::models::{PayStub, Payroll, PayrollItem};

/// Persistence for payrolls, their items and the attached pay stub.
///
/// `create` writes all three together; an employee's payroll either lands
/// completely or not at all. Duplicate payrolls and duplicate stub
/// numbers both surface as `Conflict` (distinct messages), backed by the
/// storage uniqueness constraints.
#[async_trait]
pub trait PayrollRepository: Send + Sync {
    async fn exists_for_employee_period(
        &self,
        employee_id: &str,
        payroll_period_id: &str,
        tenant_id: &str,
    ) -> Result<bool>;

    async fn create(&self, payroll: &Payroll, stub: &PayStub) -> Result<()>;

    /// Payroll with its items populated, ordered by position.
    async fn find_by_id(&self, id: &str, tenant_id: &str) -> Result<Option<Payroll>>;

    async fn find_by_period(
        &self,
        payroll_period_id: &str,
        tenant_id: &str,
    ) -> Result<Vec<Payroll>>;

    /// Remove every stub, item and payroll recorded against a period.
    /// Returns the number of payrolls removed.
    async fn delete_for_period(&self, payroll_period_id: &str, tenant_id: &str) -> Result<u64>;
}

/// MySQL implementation of the payroll repository.
pub struct MySqlPayrollRepository {
    pool: MySqlPool,
}

impl MySqlPayrollRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PayrollRepository for MySqlPayrollRepository {
    async fn exists_for_employee_period(
        &self,
        employee_id: &str,
        payroll_period_id: &str,
        tenant_id: &str,
    ) -> Result<bool> {
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM payrolls
            WHERE employee_id = ? AND payroll_period_id = ? AND tenant_id = ?
            "#,
        )
        .bind(employee_id)
        .bind(payroll_period_id)
        .bind(tenant_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0 > 0)
    }

    async fn create(&self, payroll: &Payroll, stub: &PayStub) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO payrolls
                (id, tenant_id, employee_id, payroll_period_id, basic_salary,
                 gross_salary, total_deductions, net_salary, status,
                 created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&payroll.id)
        .bind(&payroll.tenant_id)
        .bind(&payroll.employee_id)
        .bind(&payroll.payroll_period_id)
        .bind(payroll.basic_salary)
        .bind(payroll.gross_salary)
        .bind(payroll.total_deductions)
        .bind(payroll.net_salary)
        .bind(payroll.status)
        .bind(payroll.created_at)
        .bind(payroll.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::conflict(format!(
                        "Payroll already exists for employee {} in period {}",
                        payroll.employee_id, payroll.payroll_period_id
                    ));
                }
            }
            AppError::Database(e)
        })?;

        for item in &payroll.items {
            sqlx::query(
                r#"
                INSERT INTO payroll_items
                    (id, payroll_id, item_type, category, name, amount,
                     is_statutory, position)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&item.id)
            .bind(&payroll.id)
            .bind(item.item_type)
            .bind(item.category)
            .bind(&item.name)
            .bind(item.amount)
            .bind(item.is_statutory)
            .bind(item.position)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            r#"
            INSERT INTO pay_stubs
                (id, tenant_id, employee_id, payroll_id, payroll_period_id,
                 stub_number, status, generated_at, viewed_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&stub.id)
        .bind(&stub.tenant_id)
        .bind(&stub.employee_id)
        .bind(&payroll.id)
        .bind(&stub.payroll_period_id)
        .bind(&stub.stub_number)
        .bind(stub.status)
        .bind(stub.generated_at)
        .bind(stub.viewed_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::conflict(format!(
                        "Pay stub number {} already exists",
                        stub.stub_number
                    ));
                }
            }
            AppError::Database(e)
        })?;

        tx.commit().await?;

        info!(
            payroll_id = %payroll.id,
            employee_id = %payroll.employee_id,
            stub_number = %stub.stub_number,
            "Created payroll with {} items",
            payroll.items.len()
        );
        Ok(())
    }

    async fn find_by_id(&self, id: &str, tenant_id: &str) -> Result<Option<Payroll>> {
        let payroll = sqlx::query_as::<_, Payroll>(
            r#"
            SELECT id, tenant_id, employee_id, payroll_period_id, basic_salary,
                   gross_salary, total_deductions, net_salary, status,
                   created_at, updated_at
            FROM payrolls
            WHERE id = ? AND tenant_id = ?
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(mut payroll) = payroll else {
            return Ok(None);
        };

        payroll.items = sqlx::query_as::<_, PayrollItem>(
            r#"
            SELECT id, payroll_id, item_type, category, name, amount,
                   is_statutory, position
            FROM payroll_items
            WHERE payroll_id = ?
            ORDER BY position ASC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(payroll))
    }

    async fn find_by_period(
        &self,
        payroll_period_id: &str,
        tenant_id: &str,
    ) -> Result<Vec<Payroll>> {
        let payrolls = sqlx::query_as::<_, Payroll>(
            r#"
            SELECT id, tenant_id, employee_id, payroll_period_id, basic_salary,
                   gross_salary, total_deductions, net_salary, status,
                   created_at, updated_at
            FROM payrolls
            WHERE payroll_period_id = ? AND tenant_id = ?
            ORDER BY created_at ASC
            "#,
        )
        .bind(payroll_period_id)
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payrolls)
    }

    async fn delete_for_period(&self, payroll_period_id: &str, tenant_id: &str) -> Result<u64> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            DELETE ps FROM pay_stubs ps
            INNER JOIN payrolls p ON p.id = ps.payroll_id
            WHERE p.payroll_period_id = ? AND p.tenant_id = ?
            "#,
        )
        .bind(payroll_period_id)
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
        .bind(payroll_period_id)
        .bind(tenant_id)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM payrolls WHERE payroll_period_id = ? AND tenant_id = ?")
            .bind(payroll_period_id)
            .bind(tenant_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let removed = result.rows_affected();
        info!(
            period_id = %payroll_period_id,
            removed,
            "Deleted payroll records for period"
        );
        Ok(removed)
    }
}
