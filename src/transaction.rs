//! Transaction models: payment segments, their grouping into transactions,
//! and the raw CSV row they can be loaded from.

use crate::amount::Amount;
use crate::error::EftError;
use chrono::NaiveDate;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Whether funds are sent to a payee or collected from a payor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Sending funds.
    Credit,
    /// Receiving funds.
    Debit,
}

impl Direction {
    /// Logical record type id written at the start of a detail record.
    pub fn record_type(&self) -> char {
        match self {
            Direction::Credit => 'C',
            Direction::Debit => 'D',
        }
    }
}

impl FromStr for Direction {
    type Err = EftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "credit" => Ok(Direction::Credit),
            "d" | "debit" => Ok(Direction::Debit),
            _ => Err(EftError::UnsupportedDirection(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.record_type())
    }
}

/// One payment instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionSegment {
    /// CPA transaction type code, e.g. 200 for payroll deposits.
    pub cpa_code: u16,

    /// Amount in dollars.
    pub amount: Amount,

    /// Credit: date funds are available. Debit: due date. Defaults to today.
    pub payment_date: Option<NaiveDate>,

    /// 1 to 3 digits.
    pub bank_institution_number: String,

    /// 1 to 5 digits.
    pub bank_transit_number: String,

    /// 1 to 12 digits.
    pub bank_account_number: String,

    /// Payee name for credits, payor name for debits.
    pub payee_name: String,

    /// Should be unique within the file. Generated when absent.
    pub cross_reference_number: Option<String>,
}

impl TransactionSegment {
    pub fn new(
        cpa_code: u16,
        amount: Amount,
        bank_institution_number: impl Into<String>,
        bank_transit_number: impl Into<String>,
        bank_account_number: impl Into<String>,
        payee_name: impl Into<String>,
    ) -> Self {
        TransactionSegment {
            cpa_code,
            amount,
            payment_date: None,
            bank_institution_number: bank_institution_number.into(),
            bank_transit_number: bank_transit_number.into(),
            bank_account_number: bank_account_number.into(),
            payee_name: payee_name.into(),
            cross_reference_number: None,
        }
    }

    pub fn with_payment_date(mut self, date: NaiveDate) -> Self {
        self.payment_date = Some(date);
        self
    }

    pub fn with_cross_reference(mut self, reference: impl Into<String>) -> Self {
        self.cross_reference_number = Some(reference.into());
        self
    }
}

/// A group of segments sharing one direction.
///
/// More than six segments are split over several detail records; a
/// transaction with no segments produces no detail record at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub direction: Direction,
    pub segments: Vec<TransactionSegment>,
}

impl Transaction {
    pub fn new(direction: Direction, segments: Vec<TransactionSegment>) -> Self {
        Transaction {
            direction,
            segments,
        }
    }

    pub fn credit(segments: Vec<TransactionSegment>) -> Self {
        Self::new(Direction::Credit, segments)
    }

    pub fn debit(segments: Vec<TransactionSegment>) -> Self {
        Self::new(Direction::Debit, segments)
    }
}

/// Raw segment row as read from CSV.
///
/// Rows that share a non-empty `transaction` key and are adjacent in the file
/// are grouped into a single transaction.
#[derive(Debug, Deserialize)]
pub struct SegmentRecord {
    /// Optional grouping key
    #[serde(default)]
    pub transaction: Option<String>,

    /// Direction: C, D, credit or debit
    #[serde(rename = "type")]
    pub direction: String,

    pub cpa_code: u16,

    /// Dollars, read as an exact decimal string
    pub amount: Amount,

    /// ISO date (YYYY-MM-DD), defaults to today when empty
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,

    pub institution: String,

    pub transit: String,

    pub account: String,

    pub payee_name: String,

    #[serde(default)]
    pub cross_reference: Option<String>,
}

impl SegmentRecord {
    /// Splits the raw CSV row into its grouping key, direction and segment.
    pub fn parse(self) -> crate::Result<(Option<String>, Direction, TransactionSegment)> {
        let direction = Direction::from_str(&self.direction)?;

        let segment = TransactionSegment {
            cpa_code: self.cpa_code,
            amount: self.amount,
            payment_date: self.payment_date,
            bank_institution_number: self.institution,
            bank_transit_number: self.transit,
            bank_account_number: self.account,
            payee_name: self.payee_name,
            cross_reference_number: non_empty(self.cross_reference),
        };

        Ok((non_empty(self.transaction), direction, segment))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
