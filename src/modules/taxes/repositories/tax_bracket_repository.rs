use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::core::Result;
use crate::modules::taxes::models::TaxBracket;

/// Read access to tenant tax schedules. Brackets are seeded and
/// administered outside the engine; the engine only reads the active set.
#[async_trait]
pub trait TaxBracketRepository: Send + Sync {
    /// Active brackets for a tenant, sorted ascending by `min_amount`.
    /// An empty result means the tenant uses the built-in default table.
    async fn find_active(&self, tenant_id: &str) -> Result<Vec<TaxBracket>>;
}

/// MySQL implementation of the tax bracket repository.
pub struct MySqlTaxBracketRepository {
    pool: MySqlPool,
}

impl MySqlTaxBracketRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaxBracketRepository for MySqlTaxBracketRepository {
    async fn find_active(&self, tenant_id: &str) -> Result<Vec<TaxBracket>> {
        let brackets = sqlx::query_as::<_, TaxBracket>(
            r#"
            SELECT id, tenant_id, min_amount, max_amount, rate, fixed_amount,
                   effective_date, is_active, created_at
            FROM tax_brackets
            WHERE tenant_id = ? AND is_active = TRUE
            ORDER BY min_amount ASC
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(brackets)
    }
}
