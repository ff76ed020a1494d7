use serde::{Deserialize, Serialize};

use crate::amortization::{AccrualProjector, TenureSolver};
use crate::decimal::Money;
use crate::errors::{Result, TenureError};
use crate::period::YearMonth;
use crate::types::{LoanTerms, PrepaymentEffect, PrepaymentEvent, PrepaymentSnapshot, Tenure};

/// outcome of a tenure calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// one entry per prepayment, in the order they were applied
    pub snapshots: Vec<PrepaymentSnapshot>,
    /// month the remaining tenure is counted from
    pub tenure_start_month: YearMonth,
    pub remaining_tenure: Tenure,
    /// `None` when the loan never amortizes
    pub loan_closure_month: Option<YearMonth>,
    pub total_months_paid_to_last_prepayment: u32,
    /// principal the remaining tenure was solved on, at working precision
    pub solved_principal: Money,
    /// months cut from the original tenure; `None` unless positive
    pub months_saved: Option<u32>,
    pub prepayment_effect: Option<PrepaymentEffect>,
}

impl CalculationResult {
    /// principal just before each prepayment was applied
    pub fn principal_before_each_prepayment(&self) -> Vec<Money> {
        self.snapshots.iter().map(|s| s.principal_before).collect()
    }

    pub fn remaining_tenure_months(&self) -> Option<u32> {
        self.remaining_tenure.months()
    }

    pub fn never_amortizes(&self) -> bool {
        self.remaining_tenure.is_never()
    }

    /// get json representation of the result
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("JSON error: {}", e))
    }

    /// short alias for json output
    pub fn json(&self) -> String {
        self.to_json_pretty()
    }
}

/// folds prepayments into the principal and solves the residual tenure
pub struct PrepaymentSequencer;

impl PrepaymentSequencer {
    /// apply `prepayments` in order against `terms`
    ///
    /// Events must be in non-decreasing month order starting no earlier than
    /// the loan start; the sequencer does not sort them.
    pub fn sequence(
        terms: &LoanTerms,
        prepayments: &[PrepaymentEvent],
        original_tenure_months: Option<u32>,
    ) -> Result<CalculationResult> {
        validate_terms(terms, prepayments)?;

        let rate = terms.periodic_rate();
        let emi = terms.periodic_payment;

        let mut principal = terms.principal;
        let mut cursor = terms.start_period;
        let mut total_months_paid: u32 = 0;
        let mut snapshots = Vec::with_capacity(prepayments.len());

        for (index, event) in prepayments.iter().enumerate() {
            let gap = cursor.months_until(event.effective_month);
            if gap < 0 {
                return Err(TenureError::OutOfOrderEvent {
                    index: index + 1,
                    effective_month: event.effective_month,
                    cursor,
                });
            }
            let gap = u32::try_from(gap).map_err(|_| TenureError::CalculationError {
                message: format!("gap of {} months is out of range", gap),
            })?;

            total_months_paid += gap;
            let principal_before = AccrualProjector::project(principal, rate, emi, gap)?;
            let principal_after = principal_before - event.amount;

            tracing::debug!(
                prepayment = index + 1,
                month = %event.effective_month.to_iso(),
                gap,
                %principal_before,
                amount = %event.amount,
                %principal_after,
                "applied prepayment"
            );

            snapshots.push(PrepaymentSnapshot {
                effective_month: event.effective_month,
                months_elapsed: gap,
                principal_before,
                amount: event.amount,
                principal_after,
            });

            principal = principal_after;
            cursor = event.effective_month;
        }

        let remaining_tenure = TenureSolver::solve(principal, rate, emi)?;

        let loan_closure_month = match remaining_tenure {
            Tenure::Months(months) => Some(add_months(cursor, months)?),
            Tenure::Never => {
                tracing::warn!(
                    %principal,
                    emi = %emi,
                    "emi does not cover periodic interest, loan never amortizes"
                );
                None
            }
        };

        tracing::debug!(
            tenure_start = %cursor.to_iso(),
            remaining = ?remaining_tenure,
            closure = ?loan_closure_month.map(|m| m.to_iso()),
            "solved remaining tenure"
        );

        let (months_saved, prepayment_effect) = match original_tenure_months {
            Some(original) => {
                let original_closure_month = add_months(terms.start_period, original)?;
                let saved = remaining_tenure
                    .months()
                    .map(|remaining| original as i64 - (total_months_paid as i64 + remaining as i64));

                let effect = match saved {
                    Some(months) if months > 0 => PrepaymentEffect::MonthsSaved {
                        months: months as u32,
                        original_closure_month,
                    },
                    _ => PrepaymentEffect::NoMeaningfulEffect {
                        original_closure_month,
                    },
                };
                (effect.months_saved(), Some(effect))
            }
            None => (None, None),
        };

        Ok(CalculationResult {
            snapshots,
            tenure_start_month: cursor,
            remaining_tenure,
            loan_closure_month,
            total_months_paid_to_last_prepayment: total_months_paid,
            solved_principal: principal,
            months_saved,
            prepayment_effect,
        })
    }
}

/// core re-validation of amounts and rate, independent of the request boundary
fn validate_terms(terms: &LoanTerms, prepayments: &[PrepaymentEvent]) -> Result<()> {
    require_positive("principal", terms.principal)?;
    require_positive("periodic payment", terms.periodic_payment)?;

    if terms.annual_rate.is_negative() {
        return Err(TenureError::InvalidInterestRate {
            rate: terms.annual_rate,
        });
    }

    for (index, event) in prepayments.iter().enumerate() {
        require_positive(&format!("prepayment #{} amount", index + 1), event.amount)?;
    }

    Ok(())
}

pub(crate) fn require_positive(field: &str, value: Money) -> Result<()> {
    if value.is_positive() {
        Ok(())
    } else {
        Err(TenureError::NonPositiveInput {
            field: field.to_string(),
            value,
        })
    }
}

fn add_months(month: YearMonth, months: u32) -> Result<YearMonth> {
    month
        .checked_add_months(months)
        .ok_or_else(|| TenureError::InvalidDate {
            message: format!("{} plus {} months is out of range", month, months),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use rust_decimal_macros::dec;

    fn month(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    fn home_loan() -> LoanTerms {
        LoanTerms::new(
            Money::from_major(5_028_000),
            Rate::from_annual_percentage(dec!(8.7)),
            Money::from_major(41_200),
            month(2023, 7),
        )
    }

    #[test]
    fn test_single_prepayment_scenario() {
        let prepayments = [PrepaymentEvent::new(Money::from_major(200_000), month(2024, 8))];

        let result = PrepaymentSequencer::sequence(&home_loan(), &prepayments, None).unwrap();

        assert_eq!(result.snapshots.len(), 1);
        let snapshot = &result.snapshots[0];
        assert_eq!(snapshot.months_elapsed, 13);
        assert_eq!(snapshot.principal_before.round_dp(2), Money::from_decimal(dec!(4963531.90)));
        assert_eq!(snapshot.principal_after.round_dp(2), Money::from_decimal(dec!(4763531.90)));

        assert_eq!(result.total_months_paid_to_last_prepayment, 13);
        assert_eq!(result.tenure_start_month, month(2024, 8));
        assert_eq!(result.solved_principal, snapshot.principal_after);
        assert_eq!(result.remaining_tenure, Tenure::Months(253));
        assert_eq!(result.loan_closure_month, Some(month(2045, 9)));
        assert_eq!(result.months_saved, None);
        assert_eq!(result.prepayment_effect, None);
    }

    #[test]
    fn test_two_prepayments_with_original_tenure() {
        let prepayments = [
            PrepaymentEvent::new(Money::from_major(200_000), month(2024, 8)),
            PrepaymentEvent::new(Money::from_major(200_000), month(2025, 6)),
        ];

        let result = PrepaymentSequencer::sequence(&home_loan(), &prepayments, Some(300)).unwrap();

        let before = result.principal_before_each_prepayment();
        assert_eq!(before[0].round_dp(2), Money::from_decimal(dec!(4963531.90)));
        assert_eq!(before[1].round_dp(2), Money::from_decimal(dec!(4694671.13)));
        assert_eq!(result.snapshots[1].months_elapsed, 10);

        assert_eq!(result.total_months_paid_to_last_prepayment, 23);
        assert_eq!(result.remaining_tenure, Tenure::Months(217));
        assert_eq!(result.loan_closure_month, Some(month(2043, 7)));
        assert_eq!(result.months_saved, Some(60));
        assert_eq!(
            result.prepayment_effect,
            Some(PrepaymentEffect::MonthsSaved {
                months: 60,
                original_closure_month: month(2048, 7),
            })
        );
    }

    #[test]
    fn test_no_prepayments_solves_from_start() {
        let result = PrepaymentSequencer::sequence(&home_loan(), &[], Some(300)).unwrap();

        assert!(result.snapshots.is_empty());
        assert_eq!(result.solved_principal, Money::from_major(5_028_000));
        assert_eq!(result.tenure_start_month, month(2023, 7));
        assert_eq!(result.total_months_paid_to_last_prepayment, 0);
        assert_eq!(result.remaining_tenure, Tenure::Months(300));
        assert_eq!(result.loan_closure_month, Some(month(2048, 7)));
        assert_eq!(result.months_saved, None);
        assert_eq!(
            result.prepayment_effect,
            Some(PrepaymentEffect::NoMeaningfulEffect {
                original_closure_month: month(2048, 7),
            })
        );
    }

    #[test]
    fn test_zero_rate_without_prepayments() {
        let terms = LoanTerms::new(
            Money::from_major(120_000),
            Rate::ZERO,
            Money::from_major(7_000),
            month(2024, 1),
        );

        let result = PrepaymentSequencer::sequence(&terms, &[], None).unwrap();

        assert_eq!(result.remaining_tenure, Tenure::Months(18));
        assert_eq!(result.loan_closure_month, Some(month(2025, 7)));
    }

    #[test]
    fn test_prepayment_exceeding_principal_closes_loan() {
        let terms = LoanTerms::new(
            Money::from_major(100_000),
            Rate::from_percentage(12),
            Money::from_major(5_000),
            month(2024, 1),
        );
        let prepayments = [PrepaymentEvent::new(Money::from_major(200_000), month(2024, 3))];

        let result = PrepaymentSequencer::sequence(&terms, &prepayments, None).unwrap();

        assert!(!result.snapshots[0].principal_after.is_positive());
        assert_eq!(result.remaining_tenure, Tenure::Months(0));
        assert_eq!(result.loan_closure_month, Some(month(2024, 3)));
    }

    #[test]
    fn test_out_of_order_prepayments_are_rejected() {
        let prepayments = [
            PrepaymentEvent::new(Money::from_major(100_000), month(2024, 8)),
            PrepaymentEvent::new(Money::from_major(100_000), month(2024, 6)),
        ];

        let err = PrepaymentSequencer::sequence(&home_loan(), &prepayments, None).unwrap_err();

        assert_eq!(
            err,
            TenureError::OutOfOrderEvent {
                index: 2,
                effective_month: month(2024, 6),
                cursor: month(2024, 8),
            }
        );
    }

    #[test]
    fn test_prepayment_before_loan_start_is_rejected() {
        let prepayments = [PrepaymentEvent::new(Money::from_major(100_000), month(2023, 1))];

        let err = PrepaymentSequencer::sequence(&home_loan(), &prepayments, None).unwrap_err();
        assert!(matches!(err, TenureError::OutOfOrderEvent { index: 1, .. }));
    }

    #[test]
    fn test_same_month_prepayments_are_allowed() {
        let prepayments = [
            PrepaymentEvent::new(Money::from_major(100_000), month(2024, 8)),
            PrepaymentEvent::new(Money::from_major(100_000), month(2024, 8)),
        ];

        let result = PrepaymentSequencer::sequence(&home_loan(), &prepayments, None).unwrap();

        assert_eq!(result.snapshots[1].months_elapsed, 0);
        assert_eq!(result.snapshots[1].principal_before, result.snapshots[0].principal_after);
        assert_eq!(result.remaining_tenure, Tenure::Months(253));
    }

    #[test]
    fn test_larger_prepayment_never_lengthens_tenure() {
        let mut previous = u32::MAX;

        for amount in [0_i64, 50_000, 200_000, 1_000_000, 3_000_000, 6_000_000] {
            let prepayments: Vec<PrepaymentEvent> = if amount == 0 {
                Vec::new()
            } else {
                vec![PrepaymentEvent::new(Money::from_major(amount), month(2024, 8))]
            };

            let result = PrepaymentSequencer::sequence(&home_loan(), &prepayments, None).unwrap();
            let months = result.remaining_tenure_months().unwrap();

            assert!(months <= previous, "{} months after prepaying {}", months, amount);
            previous = months;
        }
    }

    #[test]
    fn test_non_amortizing_loan_has_no_closure() {
        let terms = LoanTerms::new(
            Money::from_major(100_000),
            Rate::from_percentage(12),
            Money::from_major(1_000),
            month(2024, 1),
        );

        let result = PrepaymentSequencer::sequence(&terms, &[], Some(240)).unwrap();

        assert!(result.never_amortizes());
        assert_eq!(result.loan_closure_month, None);
        assert_eq!(result.months_saved, None);
        assert_eq!(
            result.prepayment_effect,
            Some(PrepaymentEffect::NoMeaningfulEffect {
                original_closure_month: month(2044, 1),
            })
        );
    }

    #[test]
    fn test_non_positive_inputs_are_rejected() {
        let mut terms = home_loan();
        terms.periodic_payment = Money::ZERO;
        assert!(matches!(
            PrepaymentSequencer::sequence(&terms, &[], None),
            Err(TenureError::NonPositiveInput { .. })
        ));

        let prepayments = [PrepaymentEvent::new(Money::from_major(-5), month(2024, 8))];
        let err = PrepaymentSequencer::sequence(&home_loan(), &prepayments, None).unwrap_err();
        assert_eq!(
            err,
            TenureError::NonPositiveInput {
                field: "prepayment #1 amount".to_string(),
                value: Money::from_major(-5),
            }
        );
    }

    #[test]
    fn test_negative_rate_is_rejected() {
        let mut terms = home_loan();
        terms.annual_rate = Rate::from_decimal(dec!(-0.01));

        assert!(matches!(
            PrepaymentSequencer::sequence(&terms, &[], None),
            Err(TenureError::InvalidInterestRate { .. })
        ));
    }

    #[test]
    fn test_result_serializes_to_json() {
        let prepayments = [PrepaymentEvent::new(Money::from_major(200_000), month(2024, 8))];
        let result = PrepaymentSequencer::sequence(&home_loan(), &prepayments, Some(300)).unwrap();

        let json = result.json();
        assert!(json.contains("\"loan_closure_month\": \"2045-09\""));
        assert!(json.contains("\"kind\": \"months_saved\""));

        let parsed: CalculationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }
}
