//! CPA-005 record formatting.
//!
//! Builds the header (`A`), detail (`C`/`D`) and trailer (`Z`) logical
//! records. Every record is exactly [`RECORD_LENGTH`] characters and records
//! are joined with [`NEWLINE`].
//!
//! Callers must run [`validate`](crate::validation::validate) first; the
//! formatter assumes field lengths and digit patterns have been checked.

use crate::amount::Amount;
use crate::config::EftConfiguration;
use crate::error::{EftError, Result};
use crate::julian::JulianDate;
use crate::totals::Totals;
use crate::transaction::{Transaction, TransactionSegment};
use crate::validation::{LONG_NAME_WIDTH, PAYEE_NAME_WIDTH, SEGMENTS_PER_RECORD, SHORT_NAME_WIDTH};
use chrono::NaiveDate;
use log::debug;

/// Width of every logical record.
pub const RECORD_LENGTH: usize = 1464;

/// Width of one payment segment inside a detail record.
pub const SEGMENT_LENGTH: usize = 240;

/// Record separator.
pub const NEWLINE: &str = "\r\n";

/// Formats a complete file body from validated input.
///
/// `today` replaces every absent creation or payment date.
pub(crate) fn format_file(
    config: &EftConfiguration,
    transactions: &[Transaction],
    today: NaiveDate,
) -> Result<String> {
    let mut formatter = RecordFormatter::new(config, today);

    let mut lines = vec![formatter.header()];
    for (transaction_index, transaction) in transactions.iter().enumerate() {
        lines.extend(formatter.details(transaction_index, transaction)?);
    }
    lines.push(formatter.trailer());

    debug!(
        "Formatted {} detail records ({} credit, {} debit)",
        formatter.record_count - 1,
        formatter.totals.credit_count,
        formatter.totals.debit_count
    );

    Ok(lines.join(NEWLINE))
}

/// Keeps the logical record counter and running totals while records are built.
struct RecordFormatter<'a> {
    config: &'a EftConfiguration,
    today: NaiveDate,
    /// Number of the last record produced; the header is record 1.
    record_count: u64,
    totals: Totals,
}

impl<'a> RecordFormatter<'a> {
    fn new(config: &'a EftConfiguration, today: NaiveDate) -> Self {
        RecordFormatter {
            config,
            today,
            record_count: 1,
            totals: Totals::new(),
        }
    }

    fn header(&self) -> String {
        let config = self.config;
        let creation_date = config.file_creation_date.unwrap_or(self.today);

        let data_centre = match &config.destination_data_centre {
            Some(data_centre) => format!("{:0>5}", data_centre),
            None => " ".repeat(5),
        };
        let currency = config
            .destination_currency
            .map(|c| c.code())
            .unwrap_or("");

        let mut line = format!(
            "A{:09}{:<10.10}{:0>4}{}{:5}{:20}{:3}",
            1,
            config.originator_id,
            last_four(&config.file_creation_number),
            JulianDate(creation_date),
            data_centre,
            "",
            currency,
        );
        pad_record(&mut line);
        line
    }

    /// One detail record per group of up to six segments.
    fn details(&mut self, transaction_index: usize, transaction: &Transaction) -> Result<Vec<String>> {
        let direction = transaction.direction;
        let mut lines = Vec::new();

        for (chunk_index, chunk) in transaction.segments.chunks(SEGMENTS_PER_RECORD).enumerate() {
            self.record_count += 1;
            self.totals.record_started(direction);

            let mut line = format!(
                "{}{:09}{}",
                direction.record_type(),
                self.record_count,
                self.origination_control_data()
            );

            for (offset, segment) in chunk.iter().enumerate() {
                let segment_index = chunk_index * SEGMENTS_PER_RECORD + offset;
                let cents = segment
                    .amount
                    .to_minor_units()
                    .filter(|cents| (1..=Amount::MAX_MINOR_UNITS).contains(cents))
                    .ok_or_else(|| EftError::AmountOutOfRange {
                        transaction_index,
                        segment_index,
                        amount: segment.amount.value(),
                    })?;

                line.push_str(&self.segment(segment, segment_index, cents));
                self.totals.add_amount(direction, cents);
            }

            pad_record(&mut line);
            lines.push(line);
        }

        Ok(lines)
    }

    fn segment(&self, segment: &TransactionSegment, segment_index: usize, cents: u64) -> String {
        let config = self.config;
        let payment_date = segment.payment_date.unwrap_or(self.today);

        let cross_reference = match &segment.cross_reference_number {
            Some(reference) => reference.clone(),
            None => format!(
                "f{}r{}s{}",
                config.file_creation_number,
                self.record_count,
                segment_index + 1
            ),
        };

        format!(
            concat!(
                "{code:03}{cents:010}{date}",
                "0{institution:0>3}{transit:0>5}{account:<12}",
                "{trace:0>22}{stored:0>3}",
                "{short_name:<short_width$.short_width$}",
                "{payee:<payee_width$.payee_width$}",
                "{long_name:<long_width$.long_width$}",
                "{originator_id:<10.10}{cross_reference:<19.19}",
                "0{return_institution}{return_transit}{return_account:<12}",
                "{sundry:15}{filler:22}{settlement:2}{invalid:0>11}",
            ),
            code = segment.cpa_code,
            cents = cents,
            date = JulianDate(payment_date),
            institution = segment.bank_institution_number,
            transit = segment.bank_transit_number,
            account = segment.bank_account_number,
            trace = "",
            stored = "",
            short_name = config.resolved_short_name(),
            short_width = SHORT_NAME_WIDTH,
            payee = segment.payee_name,
            payee_width = PAYEE_NAME_WIDTH,
            long_name = config.originator_long_name,
            long_width = LONG_NAME_WIDTH,
            originator_id = config.originator_id,
            cross_reference = cross_reference,
            return_institution = zero_padded_or_blank(config.return_institution_number.as_deref(), 3),
            return_transit = zero_padded_or_blank(config.return_transit_number.as_deref(), 5),
            return_account = config.return_account_number.as_deref().unwrap_or(""),
            sundry = "",
            filler = "",
            settlement = "",
            invalid = "",
        )
    }

    fn trailer(&self) -> String {
        let totals = &self.totals;
        let mut line = format!(
            "Z{:09}{}{:014}{:08}{:014}{:08}{:014}{:08}{:014}{:08}",
            self.record_count + 1,
            self.origination_control_data(),
            totals.debit_value,
            totals.debit_count,
            totals.credit_value,
            totals.credit_count,
            // error corrections "E", then "F"
            0,
            0,
            0,
            0,
        );
        pad_record(&mut line);
        line
    }

    /// Originator id and file creation number, repeated on every record.
    fn origination_control_data(&self) -> String {
        format!(
            "{:<10.10}{:0>4}",
            self.config.originator_id,
            last_four(&self.config.file_creation_number)
        )
    }
}

fn last_four(value: &str) -> &str {
    let start = value.len().saturating_sub(4);
    value.get(start..).unwrap_or(value)
}

fn zero_padded_or_blank(value: Option<&str>, width: usize) -> String {
    match value {
        Some(value) => format!("{:0>width$}", value, width = width),
        None => " ".repeat(width),
    }
}

fn pad_record(line: &mut String) {
    let len = line.chars().count();
    if len < RECORD_LENGTH {
        line.extend(std::iter::repeat(' ').take(RECORD_LENGTH - len));
    }
}
