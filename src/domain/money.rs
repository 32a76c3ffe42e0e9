use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Mul, Neg, Sub, SubAssign};

/// A monetary value in reais.
///
/// Wraps `rust_decimal::Decimal` so that withholding arithmetic never goes
/// through binary floating point. Values keep full precision; rounding to
/// centavos only happens when a value is presented. Arithmetic saturates at
/// the limits of `Decimal` instead of panicking.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(pub Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Rounds to two decimal places, half away from zero.
    pub fn to_centavos(self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Applies a percentage expressed on the 0-100 scale.
    ///
    /// Saturates at the representable range instead of overflowing.
    pub fn percent(self, percent: Decimal) -> Self {
        Self(self.0.saturating_mul(percent / Decimal::ONE_HUNDRED))
    }

    pub fn max(self, other: Self) -> Self {
        if self >= other { self } else { other }
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_centavos().0)
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;
    fn mul(self, rhs: Decimal) -> Self::Output {
        Self(self.0.saturating_mul(rhs))
    }
}

impl Neg for Money {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_arithmetic() {
        let gross = Money::new(dec!(1000.00));
        assert_eq!(gross - Money::new(dec!(110.00)), Money::new(dec!(890.00)));
        assert_eq!(gross * dec!(0.11), Money::new(dec!(110.00)));
        assert_eq!(gross.percent(dec!(5)), Money::new(dec!(50.00)));
    }

    #[test]
    fn test_arithmetic_saturates_at_the_range_limits() {
        let max = Money::new(Decimal::MAX);
        assert_eq!(max.percent(dec!(100)), max);
        assert_eq!(max.percent(dec!(250)), max);
        assert_eq!(max * dec!(3), max);
        assert_eq!(Money::new(Decimal::MIN) - max, Money::new(Decimal::MIN));

        let mut net = Money::new(Decimal::MIN);
        net -= max;
        assert_eq!(net, Money::new(Decimal::MIN));
    }

    #[test]
    fn test_to_centavos_rounds_half_away_from_zero() {
        assert_eq!(Money::new(dec!(1.005)).to_centavos(), Money::new(dec!(1.01)));
        assert_eq!(Money::new(dec!(-1.005)).to_centavos(), Money::new(dec!(-1.01)));
        assert_eq!(Money::new(dec!(1.004)).to_centavos(), Money::new(dec!(1.00)));
    }

    #[test]
    fn test_max_floors_at_zero() {
        assert_eq!(Money::new(dec!(-3)).max(Money::ZERO), Money::ZERO);
        assert_eq!(Money::new(dec!(3)).max(Money::ZERO), Money::new(dec!(3)));
    }

    #[test]
    fn test_serde_is_transparent() {
        let parsed: Money = serde_json::from_str("1234.5").unwrap();
        assert_eq!(parsed, Money::new(dec!(1234.5)));
        let parsed: Money = serde_json::from_str("\"0.01\"").unwrap();
        assert_eq!(parsed, Money::new(dec!(0.01)));
    }
}
