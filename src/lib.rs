pub mod amortization;
pub mod calculator;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod period;
pub mod sequencer;
pub mod types;

// re-export key types
pub use amortization::{AccrualProjector, TenureSolver};
pub use calculator::{
    calculate_tenure, calculate_tenure_with_config, PrepaymentInput, TenureRequest,
    TenureRequestBuilder,
};
pub use config::CalculatorConfig;
pub use decimal::{Money, Rate};
pub use errors::{Result, TenureError};
pub use period::YearMonth;
pub use sequencer::{CalculationResult, PrepaymentSequencer};
pub use types::{LoanTerms, PrepaymentEffect, PrepaymentEvent, PrepaymentSnapshot, Tenure};

// re-export external dependencies that users will need
pub use chrono;
pub use rust_decimal::Decimal;
