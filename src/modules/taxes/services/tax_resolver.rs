use rust_decimal::Decimal;
use tracing::debug;

use crate::config::statutory::DefaultTaxTable;
use crate::core::money::{percent_of, round_unit};
use crate::modules::taxes::models::TaxBracket;

/// Resolves monthly income tax from a progressive bracket schedule.
///
/// Tenant-configured brackets take precedence; when a tenant has none the
/// built-in default table applies, and only then is the personal relief
/// subtracted (floored at zero). The resolver never fetches brackets
/// itself; callers pass the active set in.
pub struct TaxResolver {
    default_table: DefaultTaxTable,
}

/// The terms of one bracket, independent of where it came from.
struct BracketTerms {
    min_amount: Decimal,
    max_amount: Option<Decimal>,
    rate: Decimal,
    fixed_amount: Decimal,
}

impl TaxResolver {
    pub fn new(default_table: DefaultTaxTable) -> Self {
        Self { default_table }
    }

    /// Income tax for `taxable_income`, rounded to the nearest whole
    /// currency unit. Zero or negative income yields zero tax.
    pub fn resolve(&self, taxable_income: Decimal, tenant_brackets: &[TaxBracket]) -> Decimal {
        if taxable_income <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        if !tenant_brackets.is_empty() {
            let tax = marginal_tax(
                taxable_income,
                tenant_brackets.iter().map(|b| BracketTerms {
                    min_amount: b.min_amount,
                    max_amount: b.max_amount,
                    rate: b.rate,
                    fixed_amount: b.fixed_amount,
                }),
            );
            let rounded = round_unit(tax);
            debug!(%taxable_income, tax = %rounded, source = "tenant", "Resolved income tax");
            return rounded;
        }

        let gross_tax = marginal_tax(
            taxable_income,
            self.default_table.brackets.iter().map(|b| BracketTerms {
                min_amount: b.min_amount,
                max_amount: b.max_amount,
                rate: b.rate,
                fixed_amount: b.fixed_amount,
            }),
        );
        let after_relief = (gross_tax - self.default_table.personal_relief).max(Decimal::ZERO);
        let rounded = round_unit(after_relief);
        debug!(%taxable_income, tax = %rounded, source = "default", "Resolved income tax");
        rounded
    }
}

/// Walk brackets sorted ascending by `min_amount`; the last bracket the
/// income reaches into wins. Its `fixed_amount` already carries the tax
/// accumulated by every lower bracket, so only the slice inside the
/// winning bracket is taxed at its rate.
fn marginal_tax(income: Decimal, brackets: impl Iterator<Item = BracketTerms>) -> Decimal {
    let mut tax = Decimal::ZERO;
    for bracket in brackets {
        if income <= bracket.min_amount {
            break;
        }
        let in_bracket = match bracket.max_amount {
            Some(max) => (income - bracket.min_amount).min(max - bracket.min_amount),
            None => income - bracket.min_amount,
        };
        tax = bracket.fixed_amount + percent_of(in_bracket, bracket.rate);
    }
    tax
}
