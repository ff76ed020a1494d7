use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};

use crate::decimal::{Money, Rate};
use crate::errors::{Result, TenureError};
use crate::types::Tenure;

use super::overflow;

/// solves for the number of level payments that clear a principal
pub struct TenureSolver;

impl TenureSolver {
    /// smallest whole number of periods that fully amortizes `principal`
    ///
    /// `N = -ln(1 - P*R/EMI) / ln(1 + R)`, rounded up so the final partial
    /// period counts as a full one. Returns [`Tenure::Never`] when the payment
    /// does not exceed the first period's interest.
    pub fn solve(principal: Money, rate: Rate, payment: Money) -> Result<Tenure> {
        if !principal.is_positive() {
            return Ok(Tenure::Months(0));
        }
        if !payment.is_positive() {
            return Ok(Tenure::Never);
        }

        let p = principal.as_decimal();
        let emi = payment.as_decimal();

        if rate.is_zero() {
            let periods = p
                .checked_div(emi)
                .ok_or_else(|| overflow(format!("{} / {}", p, emi)))?;
            return to_tenure(periods.ceil());
        }

        let r = rate.as_decimal();
        let interest = p
            .checked_mul(r)
            .ok_or_else(|| overflow(format!("{} * {}", p, r)))?;

        if emi <= interest {
            return Ok(Tenure::Never);
        }

        let remaining_fraction = Decimal::ONE - interest / emi;
        let numerator = remaining_fraction.checked_ln().ok_or_else(|| log_domain(remaining_fraction))?;
        let one_plus_r = Decimal::ONE + r;
        let denominator = one_plus_r.checked_ln().ok_or_else(|| log_domain(one_plus_r))?;

        let periods = (-numerator)
            .checked_div(denominator)
            .ok_or_else(|| overflow(format!("{} / {}", -numerator, denominator)))?;

        to_tenure(periods.ceil())
    }
}

fn to_tenure(periods: Decimal) -> Result<Tenure> {
    periods
        .to_u32()
        .map(Tenure::Months)
        .ok_or_else(|| TenureError::CalculationError {
            message: format!("tenure of {} periods is out of range", periods),
        })
}

fn log_domain(value: Decimal) -> TenureError {
    TenureError::CalculationError {
        message: format!("logarithm undefined for {}", value),
    }
}
