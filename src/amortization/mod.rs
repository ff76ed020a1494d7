pub mod accrual;
pub mod tenure;

use rust_decimal::{Decimal, MathematicalOps};

use crate::decimal::Rate;
use crate::errors::{Result, TenureError};

pub use accrual::AccrualProjector;
pub use tenure::TenureSolver;

/// (1 + r)^n, failing instead of overflowing for very long horizons
pub(crate) fn growth_factor(rate: Rate, periods: u32) -> Result<Decimal> {
    (Decimal::ONE + rate.as_decimal())
        .checked_powu(periods as u64)
        .ok_or_else(|| overflow(format!("(1 + {})^{}", rate.as_decimal(), periods)))
}

pub(crate) fn overflow(expression: String) -> TenureError {
    TenureError::CalculationError {
        message: format!("decimal overflow evaluating {}", expression),
    }
}
