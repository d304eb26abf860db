use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a monetary amount to the nearest whole currency unit, half away
/// from zero.
///
/// Statutory components (income tax, health, pension) are rounded exactly
/// once, here, so the gross/net identity holds without drift:
/// `net = gross - sum(rounded components)`.
pub fn round_unit(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// A percentage stored as 0-100 applied to an amount.
pub fn percent_of(amount: Decimal, rate: Decimal) -> Decimal {
    amount * rate / Decimal::ONE_HUNDRED
}
