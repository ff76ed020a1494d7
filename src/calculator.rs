use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::CalculatorConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{Result, TenureError};
use crate::period::YearMonth;
use crate::sequencer::{require_positive, CalculationResult, PrepaymentSequencer};
use crate::types::{LoanTerms, PrepaymentEvent};

/// prepayment as entered by the caller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrepaymentInput {
    pub amount: Money,
    pub year: i32,
    pub month: u32,
}

/// raw inputs for a tenure calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenureRequest {
    pub loan_amount: Money,
    pub annual_rate_percent: Decimal,
    pub monthly_emi: Money,
    pub start_year: i32,
    pub start_month: u32,
    #[serde(default)]
    pub prepayments: Vec<PrepaymentInput>,
    #[serde(default)]
    pub original_tenure_years: Option<u32>,
}

impl TenureRequest {
    pub fn builder() -> TenureRequestBuilder {
        TenureRequestBuilder::new()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| TenureError::InvalidConfiguration {
            message: format!("malformed tenure request: {}", e),
        })
    }

    /// calculate with the default home loan limits
    pub fn calculate(&self) -> Result<CalculationResult> {
        calculate_tenure(self)
    }
}

/// remaining tenure, closure month and months saved for a request
pub fn calculate_tenure(request: &TenureRequest) -> Result<CalculationResult> {
    calculate_tenure_with_config(request, &CalculatorConfig::default())
}

pub fn calculate_tenure_with_config(
    request: &TenureRequest,
    config: &CalculatorConfig,
) -> Result<CalculationResult> {
    config.validate()?;
    let (terms, events, original_tenure_months) = validate_request(request, config)?;

    let mut result = PrepaymentSequencer::sequence(&terms, &events, original_tenure_months)?;

    for snapshot in &mut result.snapshots {
        snapshot.principal_before = snapshot.principal_before.round_dp(config.currency_dp);
        snapshot.principal_after = snapshot.principal_after.round_dp(config.currency_dp);
    }

    Ok(result)
}

/// boundary checks: every input-shape error surfaces before any calculation
fn validate_request(
    request: &TenureRequest,
    config: &CalculatorConfig,
) -> Result<(LoanTerms, Vec<PrepaymentEvent>, Option<u32>)> {
    require_positive("loan amount", request.loan_amount)?;
    require_positive("monthly emi", request.monthly_emi)?;

    let annual_rate = Rate::from_annual_percentage(request.annual_rate_percent);
    if annual_rate.is_negative() {
        return Err(TenureError::InvalidInterestRate { rate: annual_rate });
    }

    let start_period = YearMonth::new(request.start_year, request.start_month)?;

    if request.prepayments.len() > config.max_prepayments {
        return Err(TenureError::TooManyPrepayments {
            count: request.prepayments.len(),
            max: config.max_prepayments,
        });
    }

    let events = request
        .prepayments
        .iter()
        .enumerate()
        .map(|(index, input)| -> Result<PrepaymentEvent> {
            require_positive(&format!("prepayment #{} amount", index + 1), input.amount)?;
            let effective_month = YearMonth::new(input.year, input.month)?;
            Ok(PrepaymentEvent::new(input.amount, effective_month))
        })
        .collect::<Result<Vec<_>>>()?;

    let original_tenure_months = match request.original_tenure_years {
        Some(years) => {
            config.check_tenure_years(years)?;
            let months = years.checked_mul(12).ok_or(TenureError::InvalidTenure {
                years,
                min: config.min_tenure_years,
                max: config.max_tenure_years,
            })?;
            Some(months)
        }
        None => None,
    };

    let terms = LoanTerms::new(request.loan_amount, annual_rate, request.monthly_emi, start_period);

    Ok((terms, events, original_tenure_months))
}

/// builder for tenure requests
#[derive(Debug, Default)]
pub struct TenureRequestBuilder {
    loan_amount: Option<Money>,
    annual_rate_percent: Option<Decimal>,
    monthly_emi: Option<Money>,
    start: Option<(i32, u32)>,
    prepayments: Vec<PrepaymentInput>,
    original_tenure_years: Option<u32>,
}

impl TenureRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loan_amount(mut self, amount: Money) -> Self {
        self.loan_amount = Some(amount);
        self
    }

    /// annual rate as a percentage, e.g. `dec!(8.7)`
    pub fn annual_rate_percent(mut self, rate: Decimal) -> Self {
        self.annual_rate_percent = Some(rate);
        self
    }

    pub fn monthly_emi(mut self, emi: Money) -> Self {
        self.monthly_emi = Some(emi);
        self
    }

    pub fn start(mut self, year: i32, month: u32) -> Self {
        self.start = Some((year, month));
        self
    }

    pub fn prepayment(mut self, amount: Money, year: i32, month: u32) -> Self {
        self.prepayments.push(PrepaymentInput { amount, year, month });
        self
    }

    pub fn original_tenure_years(mut self, years: u32) -> Self {
        self.original_tenure_years = Some(years);
        self
    }

    pub fn build(self) -> Result<TenureRequest> {
        let loan_amount = self.loan_amount.ok_or(TenureError::InvalidConfiguration {
            message: "Loan amount required".to_string(),
        })?;

        let annual_rate_percent = self.annual_rate_percent.ok_or(TenureError::InvalidConfiguration {
            message: "Interest rate required".to_string(),
        })?;

        let monthly_emi = self.monthly_emi.ok_or(TenureError::InvalidConfiguration {
            message: "Monthly EMI required".to_string(),
        })?;

        let (start_year, start_month) = self.start.ok_or(TenureError::InvalidConfiguration {
            message: "Start month required".to_string(),
        })?;

        Ok(TenureRequest {
            loan_amount,
            annual_rate_percent,
            monthly_emi,
            start_year,
            start_month,
            prepayments: self.prepayments,
            original_tenure_years: self.original_tenure_years,
        })
    }
}
