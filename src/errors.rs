use thiserror::Error;

use crate::decimal::{Money, Rate};
use crate::period::YearMonth;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TenureError {
    #[error("non-positive input: {field} must be greater than zero, got {value}")]
    NonPositiveInput {
        field: String,
        value: Money,
    },

    #[error("prepayment #{index} at {effective_month} precedes {cursor}")]
    OutOfOrderEvent {
        index: usize,
        effective_month: YearMonth,
        cursor: YearMonth,
    },

    #[error("invalid month: {month} (expected 1-12)")]
    InvalidMonth {
        month: u32,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("invalid original tenure: {years} years (expected {min}-{max})")]
    InvalidTenure {
        years: u32,
        min: u32,
        max: u32,
    },

    #[error("invalid interest rate: {rate}")]
    InvalidInterestRate {
        rate: Rate,
    },

    #[error("too many prepayments: {count} supplied, at most {max} allowed")]
    TooManyPrepayments {
        count: usize,
        max: usize,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, TenureError>;
