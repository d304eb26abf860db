//! Statutory deduction tables.
//!
//! The default progressive tax table, personal relief, health-insurance
//! bands and pension caps live here as data rather than inline literals in
//! the calculators. Deployments override them with a YAML or JSON file
//! (`STATUTORY_CONFIG_PATH`); the built-in defaults are the documented
//! constants below.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;

use crate::core::{AppError, Result};

/// All statutory tables used by the payroll calculators.
#[derive(Debug, Clone, Deserialize)]
pub struct StatutoryConfig {
    pub tax: DefaultTaxTable,
    pub health: HealthTable,
    pub pension: PensionRules,
}

/// Fallback progressive tax table, used when a tenant has no configured
/// brackets. Unlike tenant tables, this one subtracts a personal relief
/// from the computed tax (floored at zero).
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultTaxTable {
    pub brackets: Vec<DefaultTaxBracket>,
    pub personal_relief: Decimal,
}

/// One bracket of the default table. `fixed_amount` is the precomputed tax
/// accumulated by all lower brackets at `min_amount`; the resolver trusts
/// it rather than re-deriving it.
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultTaxBracket {
    pub min_amount: Decimal,
    pub max_amount: Option<Decimal>,
    /// Percentage, 0-100
    pub rate: Decimal,
    pub fixed_amount: Decimal,
}

/// Banded flat-fee health-insurance table.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthTable {
    /// Ascending by `up_to`; the first band whose `up_to` exceeds the gross
    /// salary wins.
    pub bands: Vec<HealthBand>,
    /// Fee for salaries at or above the top band threshold.
    pub ceiling_fee: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthBand {
    /// Exclusive upper bound of the band.
    pub up_to: Decimal,
    pub fee: Decimal,
}

/// Capped-percentage pension contribution rules.
#[derive(Debug, Clone, Deserialize)]
pub struct PensionRules {
    /// Percentage, 0-100
    pub rate: Decimal,
    /// Pensionable pay is gross salary capped at this amount.
    pub pensionable_cap: Decimal,
    /// Absolute ceiling on the contribution itself.
    pub contribution_cap: Decimal,
}

impl Default for StatutoryConfig {
    fn default() -> Self {
        StatutoryConfig {
            tax: DefaultTaxTable {
                brackets: vec![
                    DefaultTaxBracket {
                        min_amount: Decimal::ZERO,
                        max_amount: Some(Decimal::from(24_000)),
                        rate: Decimal::from(10),
                        fixed_amount: Decimal::ZERO,
                    },
                    DefaultTaxBracket {
                        min_amount: Decimal::from(24_000),
                        max_amount: Some(Decimal::from(32_333)),
                        rate: Decimal::from(25),
                        fixed_amount: Decimal::from(2_400),
                    },
                    DefaultTaxBracket {
                        min_amount: Decimal::from(32_333),
                        max_amount: Some(Decimal::from(500_000)),
                        rate: Decimal::from(30),
                        // 2400 + 25% of (32333 - 24000)
                        fixed_amount: Decimal::new(4_483_25, 2),
                    },
                    DefaultTaxBracket {
                        min_amount: Decimal::from(500_000),
                        max_amount: Some(Decimal::from(800_000)),
                        rate: Decimal::new(32_5, 1),
                        fixed_amount: Decimal::new(14_478_335, 2),
                    },
                    DefaultTaxBracket {
                        min_amount: Decimal::from(800_000),
                        max_amount: None,
                        rate: Decimal::from(35),
                        fixed_amount: Decimal::new(24_228_335, 2),
                    },
                ],
                personal_relief: Decimal::from(2_400),
            },
            health: HealthTable {
                bands: vec![
                    HealthBand { up_to: Decimal::from(6_000), fee: Decimal::from(150) },
                    HealthBand { up_to: Decimal::from(8_000), fee: Decimal::from(300) },
                    HealthBand { up_to: Decimal::from(12_000), fee: Decimal::from(400) },
                    HealthBand { up_to: Decimal::from(15_000), fee: Decimal::from(500) },
                    HealthBand { up_to: Decimal::from(20_000), fee: Decimal::from(600) },
                    HealthBand { up_to: Decimal::from(25_000), fee: Decimal::from(750) },
                    HealthBand { up_to: Decimal::from(30_000), fee: Decimal::from(850) },
                    HealthBand { up_to: Decimal::from(35_000), fee: Decimal::from(900) },
                    HealthBand { up_to: Decimal::from(40_000), fee: Decimal::from(950) },
                    HealthBand { up_to: Decimal::from(45_000), fee: Decimal::from(1_000) },
                    HealthBand { up_to: Decimal::from(50_000), fee: Decimal::from(1_100) },
                    HealthBand { up_to: Decimal::from(60_000), fee: Decimal::from(1_200) },
                    HealthBand { up_to: Decimal::from(70_000), fee: Decimal::from(1_300) },
                    HealthBand { up_to: Decimal::from(80_000), fee: Decimal::from(1_400) },
                    HealthBand { up_to: Decimal::from(90_000), fee: Decimal::from(1_500) },
                    HealthBand { up_to: Decimal::from(100_000), fee: Decimal::from(1_600) },
                ],
                ceiling_fee: Decimal::from(1_700),
            },
            pension: PensionRules {
                rate: Decimal::from(6),
                pensionable_cap: Decimal::from(18_000),
                contribution_cap: Decimal::from(1_080),
            },
        }
    }
}

impl StatutoryConfig {
    /// Load a statutory table override from a YAML or JSON file, selected
    /// by extension. The loaded tables are validated before use.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::Configuration(format!(
                "Cannot read statutory config {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: StatutoryConfig = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content).map_err(|e| {
                AppError::Configuration(format!("Invalid statutory YAML: {}", e))
            })?,
            Some("json") => serde_json::from_str(&content).map_err(|e| {
                AppError::Configuration(format!("Invalid statutory JSON: {}", e))
            })?,
            _ => {
                return Err(AppError::Configuration(format!(
                    "Unsupported statutory config format: {}",
                    path.display()
                )))
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Check table invariants: brackets contiguous and ascending, bands
    /// strictly ascending with non-decreasing fees, caps positive.
    pub fn validate(&self) -> Result<()> {
        if self.tax.brackets.is_empty() {
            return Err(AppError::Configuration(
                "Default tax table must have at least one bracket".to_string(),
            ));
        }
        if self.tax.personal_relief < Decimal::ZERO {
            return Err(AppError::Configuration(
                "Personal relief cannot be negative".to_string(),
            ));
        }

        for (i, bracket) in self.tax.brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE_HUNDRED {
                return Err(AppError::Configuration(format!(
                    "Tax bracket {} rate must be within 0-100, got {}",
                    i, bracket.rate
                )));
            }

            let is_last = i == self.tax.brackets.len() - 1;
            match (bracket.max_amount, is_last) {
                (None, false) => {
                    return Err(AppError::Configuration(format!(
                        "Tax bracket {} is unbounded but not the top bracket",
                        i
                    )));
                }
                (Some(max), _) if max <= bracket.min_amount => {
                    return Err(AppError::Configuration(format!(
                        "Tax bracket {} max {} must exceed min {}",
                        i, max, bracket.min_amount
                    )));
                }
                _ => {}
            }

            if let Some(next) = self.tax.brackets.get(i + 1) {
                if bracket.max_amount != Some(next.min_amount) {
                    return Err(AppError::Configuration(format!(
                        "Tax brackets {} and {} are not contiguous",
                        i,
                        i + 1
                    )));
                }
            }
        }

        let mut previous: Option<&HealthBand> = None;
        for (i, band) in self.health.bands.iter().enumerate() {
            if band.fee < Decimal::ZERO {
                return Err(AppError::Configuration(format!(
                    "Health band {} fee cannot be negative",
                    i
                )));
            }
            if let Some(prev) = previous {
                if band.up_to <= prev.up_to {
                    return Err(AppError::Configuration(format!(
                        "Health band {} threshold {} must exceed the previous {}",
                        i, band.up_to, prev.up_to
                    )));
                }
                if band.fee < prev.fee {
                    return Err(AppError::Configuration(format!(
                        "Health band {} fee {} is lower than the previous band",
                        i, band.fee
                    )));
                }
            }
            previous = Some(band);
        }
        if let Some(last) = self.health.bands.last() {
            if self.health.ceiling_fee < last.fee {
                return Err(AppError::Configuration(
                    "Health ceiling fee is lower than the top band fee".to_string(),
                ));
            }
        }

        if self.pension.rate < Decimal::ZERO || self.pension.rate > Decimal::ONE_HUNDRED {
            return Err(AppError::Configuration(format!(
                "Pension rate must be within 0-100, got {}",
                self.pension.rate
            )));
        }
        if self.pension.pensionable_cap <= Decimal::ZERO
            || self.pension.contribution_cap <= Decimal::ZERO
        {
            return Err(AppError::Configuration(
                "Pension caps must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
