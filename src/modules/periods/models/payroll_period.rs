use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::{AppError, Result};

/// A named date range against which payroll is processed once per employee.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PayrollPeriod {
    pub id: String,
    pub tenant_id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub pay_date: NaiveDate,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PayrollPeriod {
    /// Create a new period with validation.
    pub fn new(
        tenant_id: impl Into<String>,
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        pay_date: NaiveDate,
        description: Option<String>,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AppError::validation("Period name cannot be empty"));
        }
        if end_date < start_date {
            return Err(AppError::validation(format!(
                "Period end date {} is before start date {}",
                end_date, start_date
            )));
        }
        if pay_date < start_date {
            return Err(AppError::validation(format!(
                "Pay date {} is before the period starts on {}",
                pay_date, start_date
            )));
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            tenant_id: tenant_id.into(),
            name,
            start_date,
            end_date,
            pay_date,
            description,
            created_at: now,
            updated_at: now,
        })
    }
}
