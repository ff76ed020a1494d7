use serde::{Deserialize, Serialize};

use crate::errors::{Result, TenureError};

/// longest original tenure a config may allow
pub const TENURE_YEARS_CEILING: u32 = 100;

/// limits applied at the request boundary and result reporting precision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// most prepayment events accepted in one request
    pub max_prepayments: usize,
    pub min_tenure_years: u32,
    pub max_tenure_years: u32,
    /// decimal places reported principals are rounded to
    pub currency_dp: u32,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self::home_loan()
    }
}

impl CalculatorConfig {
    /// create home loan configuration
    pub fn home_loan() -> Self {
        Self {
            max_prepayments: 10,
            min_tenure_years: 1,
            max_tenure_years: 40,
            currency_dp: 2,
        }
    }

    /// parse from a json document; missing fields take the home loan defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CalculatorConfig =
            serde_json::from_str(json).map_err(|e| TenureError::InvalidConfiguration {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_tenure_years == 0 {
            return Err(TenureError::InvalidConfiguration {
                message: "minimum tenure must be at least one year".to_string(),
            });
        }
        if self.min_tenure_years > self.max_tenure_years {
            return Err(TenureError::InvalidConfiguration {
                message: format!(
                    "minimum tenure {} exceeds maximum tenure {}",
                    self.min_tenure_years, self.max_tenure_years
                ),
            });
        }
        if self.max_tenure_years > TENURE_YEARS_CEILING {
            return Err(TenureError::InvalidConfiguration {
                message: format!(
                    "maximum tenure {} exceeds {} years",
                    self.max_tenure_years, TENURE_YEARS_CEILING
                ),
            });
        }
        if self.currency_dp > 8 {
            return Err(TenureError::InvalidConfiguration {
                message: format!("currency precision {} exceeds 8 decimal places", self.currency_dp),
            });
        }
        Ok(())
    }

    /// check an original tenure in years against the configured bounds
    pub fn check_tenure_years(&self, years: u32) -> Result<()> {
        if years < self.min_tenure_years || years > self.max_tenure_years {
            return Err(TenureError::InvalidTenure {
                years,
                min: self.min_tenure_years,
                max: self.max_tenure_years,
            });
        }
        Ok(())
    }
}
