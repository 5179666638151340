//! Error types for the EFT generator.
//!
//! Every variant is fatal: it aborts validation and prevents any output from
//! being produced. Non-fatal findings are reported as
//! [`ValidationWarning`](crate::validation::ValidationWarning)s instead.

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type alias for generator operations
pub type Result<T> = std::result::Result<T, EftError>;

/// Errors that stop a CPA-005 file from being generated.
#[derive(Error, Debug)]
pub enum EftError {
    /// A configuration field does not match its required pattern
    #[error("{field} should be {expected}: {value:?}")]
    InvalidField {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    /// A payment segment field does not match its required pattern
    #[error(
        "{field} should be {expected}: {value:?} (transaction {transaction_index}, segment {segment_index})"
    )]
    InvalidSegmentField {
        transaction_index: usize,
        segment_index: usize,
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    /// Destination currency other than CAD or USD
    #[error("Unsupported destination currency: {0:?}")]
    UnsupportedCurrency(String),

    /// Transaction direction other than credit (C) or debit (D)
    #[error("Unsupported transaction direction: {0:?}")]
    UnsupportedDirection(String),

    /// More transactions than the trailer record can describe
    #[error("Transaction count exceeds {max}: {count}")]
    TooManyTransactions { count: usize, max: usize },

    /// Segment amount rounds to less than one cent, or is 100,000,000 or more
    #[error(
        "Segment amount must be at least 0.01 and less than 100,000,000: {amount} (transaction {transaction_index}, segment {segment_index})"
    )]
    AmountOutOfRange {
        transaction_index: usize,
        segment_index: usize,
        amount: Decimal,
    },

    /// Only some of the return institution, transit and account numbers are set
    #[error(
        "return_institution_number, return_transit_number and return_account_number must be defined together, or not at all"
    )]
    IncompleteReturnAccount,

    /// Failed to read input or write output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// A CSV row could not be turned into a payment segment
    #[error("Invalid record at row {row}: {message}")]
    InvalidRecord { row: usize, message: String },
}
