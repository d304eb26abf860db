use rust_decimal::Decimal;

use crate::config::statutory::StatutoryConfig;
use crate::core::money::{percent_of, round_unit};

/// Flat monthly health insurance fee for a gross salary.
///
/// A step function over the configured bands: the first band whose
/// `up_to` threshold exceeds the salary wins its fee; salaries at or
/// above every threshold pay the ceiling fee. Total, never fails.
pub fn health_contribution(gross_salary: Decimal, config: &StatutoryConfig) -> Decimal {
    for band in &config.health.bands {
        if gross_salary < band.up_to {
            return band.fee;
        }
    }
    config.health.ceiling_fee
}

/// Monthly pension contribution: the configured rate applied to
/// pensionable pay (gross capped at `pensionable_cap`), the product
/// itself capped at `contribution_cap`, rounded to whole units.
pub fn pension_contribution(gross_salary: Decimal, config: &StatutoryConfig) -> Decimal {
    let pensionable = gross_salary.min(config.pension.pensionable_cap);
    let raw = percent_of(pensionable, config.pension.rate);
    round_unit(raw.min(config.pension.contribution_cap))
}
