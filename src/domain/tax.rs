//! Withholding computation for autonomous-worker receipts.
//!
//! Everything here is a pure function of its inputs. Out-of-range inputs
//! (negative gross values, ISS percentages outside 0-100) are not rejected and
//! simply flow through the arithmetic.

use super::money::Money;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Flat INSS withholding rate.
pub const INSS_RATE: Decimal = dec!(0.11);

/// ISS percentage used when the record does not carry one.
pub const DEFAULT_ISS_PERCENT: Decimal = dec!(5);

/// One row of the IRRF table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IrrfBracket {
    /// Inclusive upper bound; `None` for the open-ended top bracket.
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
    pub deduction: Decimal,
}

/// Ordered by ascending upper bound.
pub const IRRF_BRACKETS: [IrrfBracket; 5] = [
    IrrfBracket {
        upper_bound: Some(dec!(2640.00)),
        rate: dec!(0),
        deduction: dec!(0),
    },
    IrrfBracket {
        upper_bound: Some(dec!(2826.65)),
        rate: dec!(0.075),
        deduction: dec!(198.00),
    },
    IrrfBracket {
        upper_bound: Some(dec!(3751.05)),
        rate: dec!(0.15),
        deduction: dec!(410.28),
    },
    IrrfBracket {
        upper_bound: Some(dec!(4664.68)),
        rate: dec!(0.225),
        deduction: dec!(691.02),
    },
    IrrfBracket {
        upper_bound: None,
        rate: dec!(0.275),
        deduction: dec!(884.08),
    },
];

impl IrrfBracket {
    fn contains(&self, gross: Money) -> bool {
        self.upper_bound.is_none_or(|bound| gross.value() <= bound)
    }

    /// Applies this bracket's rate to the whole gross value.
    fn withholding(&self, gross: Money) -> Money {
        (gross * self.rate - Money::new(self.deduction)).max(Money::ZERO)
    }
}

/// The withholdings and resulting net value for one gross amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBreakdown {
    pub gross_value: Money,
    pub inss: Money,
    pub iss: Money,
    pub irrf: Money,
    /// Not clamped; may be zero or negative.
    pub net_value: Money,
}

/// Returns the bracket that applies to `gross`.
pub fn irrf_bracket(gross: Money) -> &'static IrrfBracket {
    IRRF_BRACKETS
        .iter()
        .find(|bracket| bracket.contains(gross))
        .unwrap_or(&IRRF_BRACKETS[IRRF_BRACKETS.len() - 1])
}

/// IRRF withholding: the first matching bracket's rate over the entire gross
/// value, minus that bracket's deduction, floored at zero.
pub fn compute_irrf(gross: Money) -> Money {
    irrf_bracket(gross).withholding(gross)
}

/// Computes the full breakdown for `gross` with the given ISS percentage.
pub fn compute_taxes(gross: Money, iss_percent: Decimal) -> TaxBreakdown {
    let inss = gross * INSS_RATE;
    let iss = gross.percent(iss_percent);
    let irrf = compute_irrf(gross);

    let mut net_value = gross;
    net_value -= inss;
    net_value -= iss;
    net_value -= irrf;

    TaxBreakdown {
        gross_value: gross,
        inss,
        iss,
        irrf,
        net_value,
    }
}

pub fn compute_taxes_default_iss(gross: Money) -> TaxBreakdown {
    compute_taxes(gross, DEFAULT_ISS_PERCENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(value: Decimal) -> Money {
        Money::new(value)
    }

    #[test]
    fn test_below_exemption_threshold() {
        let result = compute_taxes(money(dec!(1000)), dec!(5));
        assert_eq!(result.inss, money(dec!(110.00)));
        assert_eq!(result.iss, money(dec!(50.00)));
        assert_eq!(result.irrf, Money::ZERO);
        assert_eq!(result.net_value, money(dec!(840.00)));
    }

    #[test]
    fn test_top_bracket() {
        let result = compute_taxes(money(dec!(5000)), dec!(5));
        assert_eq!(result.inss, money(dec!(550.00)));
        assert_eq!(result.iss, money(dec!(250.00)));
        assert_eq!(result.irrf, money(dec!(490.92)));
        assert_eq!(result.net_value, money(dec!(3709.08)));
    }

    #[test]
    fn test_zero_gross() {
        let result = compute_taxes(Money::ZERO, dec!(5));
        assert_eq!(result.inss, Money::ZERO);
        assert_eq!(result.iss, Money::ZERO);
        assert_eq!(result.irrf, Money::ZERO);
        assert_eq!(result.net_value, Money::ZERO);
    }

    #[test]
    fn test_bracket_boundaries_are_inclusive() {
        assert_eq!(compute_irrf(money(dec!(2640.00))), Money::ZERO);
        assert_eq!(
            compute_irrf(money(dec!(2826.65))),
            money(dec!(2826.65) * dec!(0.075) - dec!(198.00))
        );
        assert_eq!(
            compute_irrf(money(dec!(3751.05))),
            money(dec!(3751.05) * dec!(0.15) - dec!(410.28))
        );
        assert_eq!(
            compute_irrf(money(dec!(4664.68))),
            money(dec!(4664.68) * dec!(0.225) - dec!(691.02))
        );
        assert_eq!(irrf_bracket(money(dec!(4664.69))).rate, dec!(0.275));
    }

    #[test]
    fn test_deduction_never_yields_negative_irrf() {
        // 2640.01 * 0.075 = 198.00075, just above the deduction
        let just_above = compute_irrf(money(dec!(2640.01)));
        assert!(just_above >= Money::ZERO);
        assert_eq!(just_above, money(dec!(0.00075)));
    }

    #[test]
    fn test_negative_net_is_not_clamped() {
        let result = compute_taxes(money(dec!(100)), dec!(95));
        assert_eq!(result.net_value, money(dec!(-6)));
    }

    #[test]
    fn test_default_iss_is_five_percent() {
        assert_eq!(
            compute_taxes_default_iss(money(dec!(200))),
            compute_taxes(money(dec!(200)), dec!(5))
        );
    }
}
