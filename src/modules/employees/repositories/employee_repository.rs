use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::core::Result;
use crate::modules::employees::models::Employee;

/// Read access to employee records, always tenant-scoped.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn find_by_id(&self, id: &str, tenant_id: &str) -> Result<Option<Employee>>;

    /// Active employees of the tenant, in a stable order so bulk processing
    /// outcomes line up run to run.
    async fn find_active(&self, tenant_id: &str) -> Result<Vec<Employee>>;
}

pub struct MySqlEmployeeRepository {
    pool: MySqlPool,
}

impl MySqlEmployeeRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeRepository for MySqlEmployeeRepository {
    async fn find_by_id(&self, id: &str, tenant_id: &str) -> Result<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, tenant_id, staff_number, first_name, last_name,
                   basic_salary, is_active, created_at, updated_at
            FROM employees
            WHERE id = ? AND tenant_id = ?
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    async fn find_active(&self, tenant_id: &str) -> Result<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, tenant_id, staff_number, first_name, last_name,
                   basic_salary, is_active, created_at, updated_at
            FROM employees
            WHERE tenant_id = ? AND is_active = TRUE
            ORDER BY staff_number
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(employees)
    }
}
