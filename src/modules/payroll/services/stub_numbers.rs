use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};

use crate::core::Result;
use crate::modules::payroll::repositories::PayStubRepository;

/// Stub number prefix for a tenant's calendar month, e.g. `PS202401`.
pub fn stub_prefix(on: DateTime<Utc>) -> String {
    format!("PS{}{:02}", on.year(), on.month())
}

/// Full stub number, e.g. `PS2024010007`. The sequence is zero-padded
/// to four digits; consumers parse this format, so it is a contract.
pub fn format_stub_number(on: DateTime<Utc>, sequence: i64) -> String {
    format!("{}{:04}", stub_prefix(on), sequence)
}

/// Proposes human-readable stub numbers, scoped to tenant and calendar
/// month. The sequence restarts at 1 each month.
///
/// A proposal is `count + 1` over the existing stubs with the month's
/// prefix. Two concurrent callers can read the same count and propose
/// the same number; the `(tenant_id, stub_number)` unique constraint is
/// what actually guarantees uniqueness, and callers retry on conflict.
pub struct StubNumberService {
    stubs: Arc<dyn PayStubRepository>,
}

impl StubNumberService {
    pub fn new(stubs: Arc<dyn PayStubRepository>) -> Self {
        Self { stubs }
    }

    /// Next stub number for the tenant in the month of `on`.
    pub async fn next_stub_number(&self, tenant_id: &str, on: DateTime<Utc>) -> Result<String> {
        let prefix = stub_prefix(on);
        let count = self.stubs.count_with_prefix(tenant_id, &prefix).await?;
        Ok(format_stub_number(on, count + 1))
    }
}
