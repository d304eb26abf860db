use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::core::{AppError, Result};

/// One band of a tenant's progressive income tax schedule.
///
/// `fixed_amount` is the tax already accumulated by all lower brackets,
/// precomputed at seeding time. The resolver trusts it instead of
/// re-deriving the sum on every call. `max_amount = None` marks the
/// unbounded top bracket.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TaxBracket {
    pub id: String,
    pub tenant_id: String,
    pub min_amount: Decimal,
    pub max_amount: Option<Decimal>,
    pub rate: Decimal,
    pub fixed_amount: Decimal,
    pub effective_date: NaiveDate,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl TaxBracket {
    pub fn new(
        tenant_id: impl Into<String>,
        min_amount: Decimal,
        max_amount: Option<Decimal>,
        rate: Decimal,
        fixed_amount: Decimal,
        effective_date: NaiveDate,
    ) -> Result<Self> {
        if min_amount < Decimal::ZERO {
            return Err(AppError::validation("Bracket minimum cannot be negative"));
        }
        if let Some(max) = max_amount {
            if max <= min_amount {
                return Err(AppError::validation(format!(
                    "Bracket maximum {} must exceed minimum {}",
                    max, min_amount
                )));
            }
        }
        if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
            return Err(AppError::validation(format!(
                "Bracket rate {} must be between 0 and 100",
                rate
            )));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            tenant_id: tenant_id.into(),
            min_amount,
            max_amount,
            rate,
            fixed_amount,
            effective_date,
            is_active: true,
            created_at: Utc::now(),
        })
    }

    /// Validate that an active set sorted by `min_amount` forms a
    /// contiguous schedule with a single unbounded top bracket.
    pub fn validate_schedule(brackets: &[TaxBracket]) -> Result<()> {
        for (i, pair) in brackets.windows(2).enumerate() {
            let (lower, upper) = (&pair[0], &pair[1]);
            match lower.max_amount {
                Some(max) if max == upper.min_amount => {}
                Some(max) => {
                    return Err(AppError::validation(format!(
                        "Bracket {} ends at {} but bracket {} starts at {}",
                        i,
                        max,
                        i + 1,
                        upper.min_amount
                    )));
                }
                None => {
                    return Err(AppError::validation(
                        "Only the top bracket may be unbounded",
                    ));
                }
            }
        }
        if let Some(last) = brackets.last() {
            if last.max_amount.is_some() {
                return Err(AppError::validation("Top bracket must be unbounded"));
            }
        }
        Ok(())
    }
}
