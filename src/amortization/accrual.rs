use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::errors::Result;

use super::{growth_factor, overflow};

/// projects the outstanding principal forward under a level payment
pub struct AccrualProjector;

impl AccrualProjector {
    /// principal left after `periods` payments of `payment` at periodic `rate`
    ///
    /// Uses the closed form `P(1+R)^n - EMI((1+R)^n - 1)/R`, falling back to
    /// `P - EMI*n` when the rate is zero. The result may be negative once the
    /// loan has been overpaid; it is returned as-is.
    pub fn project(principal: Money, rate: Rate, payment: Money, periods: u32) -> Result<Money> {
        if periods == 0 {
            return Ok(principal);
        }

        let p = principal.as_decimal();
        let emi = payment.as_decimal();

        if rate.is_zero() {
            let paid = emi
                .checked_mul(Decimal::from(periods))
                .ok_or_else(|| overflow(format!("{} * {}", emi, periods)))?;
            return Ok(Money::from_decimal(p - paid));
        }

        let r = rate.as_decimal();
        let growth = growth_factor(rate, periods)?;

        let grown = p
            .checked_mul(growth)
            .ok_or_else(|| overflow(format!("{} * {}", p, growth)))?;
        let repaid = emi
            .checked_mul(growth - Decimal::ONE)
            .and_then(|v| v.checked_div(r))
            .ok_or_else(|| overflow(format!("{} * ({} - 1) / {}", emi, growth, r)))?;

        Ok(Money::from_decimal(grown - repaid))
    }
}
