//! CPA-005 file generator.
//!
//! Holds the configuration and the transactions to pay or collect, and runs
//! validation followed by formatting to produce the file body.

use crate::clock::{Clock, SystemClock};
use crate::codes::{CodeLookup, CpaCodes};
use crate::config::EftConfiguration;
use crate::error::{EftError, Result};
use crate::format::format_file;
use crate::transaction::{SegmentRecord, Transaction, TransactionSegment};
use crate::validation::{validate, ValidationWarning};
use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use std::io::{Read, Write};

/// Builds one CPA-005 file.
///
/// Transactions are kept in the order they are added, which is the order
/// their detail records appear in the output.
///
/// # Reproducible Output
///
/// Absent creation and payment dates default to today as reported by the
/// generator's [`Clock`]. Supply explicit dates, or a
/// [`FixedClock`](crate::clock::FixedClock), to get byte-identical output
/// across runs.
pub struct EftGenerator {
    config: EftConfiguration,
    transactions: Vec<Transaction>,
    clock: Box<dyn Clock>,
    codes: Box<dyn CodeLookup>,
}

impl EftGenerator {
    /// Creates a generator using the system clock and the built-in CPA code table.
    pub fn new(config: EftConfiguration) -> Self {
        EftGenerator {
            config,
            transactions: Vec::new(),
            clock: Box::new(SystemClock),
            codes: Box::new(CpaCodes),
        }
    }

    /// Replaces the source of "today".
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Replaces the transaction code table used to flag unknown codes.
    pub fn with_code_lookup(mut self, codes: impl CodeLookup + 'static) -> Self {
        self.codes = Box::new(codes);
        self
    }

    pub fn configuration(&self) -> &EftConfiguration {
        &self.config
    }

    pub fn set_configuration(&mut self, config: EftConfiguration) {
        self.config = config;
    }

    pub fn add_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    /// Adds a credit transaction holding a single segment.
    pub fn add_credit_transaction(&mut self, segment: TransactionSegment) {
        self.add_transaction(Transaction::credit(vec![segment]));
    }

    /// Adds a debit transaction holding a single segment.
    pub fn add_debit_transaction(&mut self, segment: TransactionSegment) {
        self.add_transaction(Transaction::debit(vec![segment]));
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Appends transactions read from CSV.
    ///
    /// Adjacent rows sharing a non-empty `transaction` key become segments of
    /// one transaction; every other row becomes its own transaction. Unlike
    /// validation warnings, a malformed row stops loading.
    ///
    /// Returns the number of segments read.
    pub fn load_csv<R: Read>(&mut self, reader: R) -> Result<usize> {
        let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

        let mut current_key: Option<String> = None;
        let mut segments = 0;

        for (row_idx, result) in csv_reader.deserialize::<SegmentRecord>().enumerate() {
            let row = row_idx + 2; // 1-indexed, accounting for header row
            let record = result?;
            let (key, direction, segment) = record.parse()?;

            let same_transaction = key.is_some() && key == current_key;
            match self.transactions.last_mut() {
                Some(last) if same_transaction => {
                    if last.direction != direction {
                        return Err(EftError::InvalidRecord {
                            row,
                            message: format!(
                                "transaction {:?} mixes credit and debit segments",
                                key.unwrap_or_default()
                            ),
                        });
                    }
                    last.segments.push(segment);
                }
                _ => self.add_transaction(Transaction::new(direction, vec![segment])),
            }

            current_key = key;
            segments += 1;
        }

        debug!(
            "Loaded {} segments, {} transactions total",
            segments,
            self.transactions.len()
        );
        Ok(segments)
    }

    /// Checks the configuration and transactions without producing output.
    ///
    /// Returns all warnings, or the first fatal error.
    pub fn validate(&self) -> Result<Vec<ValidationWarning>> {
        validate(&self.config, &self.transactions, self.codes.as_ref())
    }

    /// Returns `true` if [`generate`](Self::generate) would succeed.
    pub fn can_generate(&self) -> bool {
        match self.validate() {
            Ok(_) => true,
            Err(e) => {
                debug!("Cannot generate CPA-005 file: {}", e);
                false
            }
        }
    }

    /// Validates and formats the file, returning it with the warnings found.
    pub fn generate_with_warnings(&self) -> Result<(String, Vec<ValidationWarning>)> {
        let warnings = self.validate()?;
        let today = self.clock.today();
        let contents = format_file(&self.config, &self.transactions, today)?;
        Ok((contents, warnings))
    }

    /// Validates and formats the file.
    ///
    /// Warnings are logged at warn level and do not stop generation.
    pub fn generate(&self) -> Result<String> {
        let (contents, warnings) = self.generate_with_warnings()?;

        if !warnings.is_empty() {
            debug!("Proceeding with {} warnings", warnings.len());
            for warning in &warnings {
                warn!("{}", warning);
            }
        }

        Ok(contents)
    }

    /// Generates the file and writes it to `writer`.
    pub fn write_output<W: Write>(&self, mut writer: W) -> Result<()> {
        let contents = self.generate()?;
        writer.write_all(contents.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

impl std::fmt::Debug for EftGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EftGenerator")
            .field("config", &self.config)
            .field("transactions", &self.transactions)
            .finish_non_exhaustive()
    }
}
