use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::period::YearMonth;

/// loan terms the tenure is projected from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    pub annual_rate: Rate,
    pub periodic_payment: Money,
    pub start_period: YearMonth,
}

impl LoanTerms {
    pub fn new(
        principal: Money,
        annual_rate: Rate,
        periodic_payment: Money,
        start_period: YearMonth,
    ) -> Self {
        Self {
            principal,
            annual_rate,
            periodic_payment,
            start_period,
        }
    }

    /// rate applied each monthly period
    pub fn periodic_rate(&self) -> Rate {
        self.annual_rate.monthly_rate()
    }
}

/// lump-sum prepayment applied against principal in a given month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrepaymentEvent {
    pub amount: Money,
    pub effective_month: YearMonth,
}

impl PrepaymentEvent {
    pub fn new(amount: Money, effective_month: YearMonth) -> Self {
        Self {
            amount,
            effective_month,
        }
    }
}

/// remaining tenure in months
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tenure {
    Months(u32),
    /// the payment never covers the periodic interest
    Never,
}

impl Tenure {
    pub fn months(&self) -> Option<u32> {
        match self {
            Tenure::Months(months) => Some(*months),
            Tenure::Never => None,
        }
    }

    pub fn is_never(&self) -> bool {
        matches!(self, Tenure::Never)
    }
}

/// principal position around a single prepayment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepaymentSnapshot {
    pub effective_month: YearMonth,
    /// months of EMIs since the previous event (or the loan start)
    pub months_elapsed: u32,
    pub principal_before: Money,
    pub amount: Money,
    pub principal_after: Money,
}

/// effect of the prepayments against the original tenure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PrepaymentEffect {
    MonthsSaved {
        months: u32,
        original_closure_month: YearMonth,
    },
    NoMeaningfulEffect {
        original_closure_month: YearMonth,
    },
}

impl PrepaymentEffect {
    pub fn months_saved(&self) -> Option<u32> {
        match self {
            PrepaymentEffect::MonthsSaved { months, .. } => Some(*months),
            PrepaymentEffect::NoMeaningfulEffect { .. } => None,
        }
    }

    pub fn original_closure_month(&self) -> YearMonth {
        match self {
            PrepaymentEffect::MonthsSaved {
                original_closure_month,
                ..
            }
            | PrepaymentEffect::NoMeaningfulEffect {
                original_closure_month,
            } => *original_closure_month,
        }
    }
}
