//! Running totals for the trailer record.

use crate::transaction::Direction;

/// Per-direction record counts and values, in cents.
///
/// # Invariants
///
/// - Counts track logical detail records, not segments: a transaction with
///   seven segments adds two to its direction's count.
/// - Values are sums of amounts already rounded to cents, so the trailer
///   always equals the sum of the amount fields in the detail records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub debit_value: u64,
    pub debit_count: u64,
    pub credit_value: u64,
    pub credit_count: u64,
}

impl Totals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one new detail record.
    pub fn record_started(&mut self, direction: Direction) {
        match direction {
            Direction::Credit => self.credit_count += 1,
            Direction::Debit => self.debit_count += 1,
        }
    }

    /// Adds an amount, already converted to cents.
    pub fn add_amount(&mut self, direction: Direction, cents: u64) {
        match direction {
            Direction::Credit => self.credit_value += cents,
            Direction::Debit => self.debit_value += cents,
        }
    }
}
