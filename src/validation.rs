//! Structural validation of a configuration and its transactions.
//!
//! Fatal problems return an [`EftError`] on the first occurrence. Everything
//! else is collected as [`ValidationWarning`]s and never stops generation.

use crate::codes::CodeLookup;
use crate::config::EftConfiguration;
use crate::error::{EftError, Result};
use crate::transaction::Transaction;
use std::collections::HashSet;
use std::fmt;

/// Maximum number of transactions a single file may carry.
pub const MAX_TRANSACTIONS: usize = 999_999_999;

/// Segments packed into one detail record.
pub const SEGMENTS_PER_RECORD: usize = 6;

/// Width of the originator short name field; longer names are truncated.
pub const SHORT_NAME_WIDTH: usize = 15;

/// Width of the originator long name field; longer names are truncated.
pub const LONG_NAME_WIDTH: usize = 30;

/// Width of the payee/payor name field; longer names are truncated.
pub const PAYEE_NAME_WIDTH: usize = 30;

/// Field a warning refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningField {
    OriginatorShortName,
    OriginatorLongName,
    Transactions,
    Segments,
    CpaCode,
    PayeeName,
    CrossReferenceNumber,
}

impl WarningField {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningField::OriginatorShortName => "originator_short_name",
            WarningField::OriginatorLongName => "originator_long_name",
            WarningField::Transactions => "transactions",
            WarningField::Segments => "segments",
            WarningField::CpaCode => "cpa_code",
            WarningField::PayeeName => "payee_name",
            WarningField::CrossReferenceNumber => "cross_reference_number",
        }
    }
}

impl fmt::Display for WarningField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-fatal finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    pub field: WarningField,
    pub transaction_index: Option<usize>,
    pub segment_index: Option<usize>,
    pub message: String,
}

impl ValidationWarning {
    fn config(field: WarningField, message: String) -> Self {
        ValidationWarning {
            field,
            transaction_index: None,
            segment_index: None,
            message,
        }
    }

    fn transaction(field: WarningField, transaction_index: usize, message: String) -> Self {
        ValidationWarning {
            field,
            transaction_index: Some(transaction_index),
            segment_index: None,
            message,
        }
    }

    fn segment(
        field: WarningField,
        transaction_index: usize,
        segment_index: usize,
        message: String,
    ) -> Self {
        ValidationWarning {
            field,
            transaction_index: Some(transaction_index),
            segment_index: Some(segment_index),
            message,
        }
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.transaction_index, self.segment_index) {
            (Some(t), Some(s)) => write!(f, "transaction {} segment {}: ", t, s)?,
            (Some(t), None) => write!(f, "transaction {}: ", t)?,
            _ => {}
        }
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Checks that `value` is between `min` and `max` ASCII digits long.
pub fn is_digits(value: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_digit())
}

/// Validates the configuration and all transactions.
///
/// Returns every warning on success, or the first fatal error.
pub fn validate(
    config: &EftConfiguration,
    transactions: &[Transaction],
    codes: &dyn CodeLookup,
) -> Result<Vec<ValidationWarning>> {
    let mut warnings = validate_config(config)?;
    warnings.extend(validate_transactions(transactions, codes)?);
    Ok(warnings)
}

fn validate_config(config: &EftConfiguration) -> Result<Vec<ValidationWarning>> {
    let mut warnings = Vec::new();

    if config.originator_id.chars().count() > 10 {
        return Err(invalid_field(
            "originator_id",
            &config.originator_id,
            "at most 10 characters",
        ));
    }

    if !is_digits(&config.file_creation_number, 1, 4) {
        return Err(invalid_field(
            "file_creation_number",
            &config.file_creation_number,
            "1 to 4 digits",
        ));
    }

    if let Some(data_centre) = &config.destination_data_centre {
        if !is_digits(data_centre, 0, 5) {
            return Err(invalid_field(
                "destination_data_centre",
                data_centre,
                "0 to 5 digits",
            ));
        }
    }

    if config.originator_short_name.is_none() {
        warnings.push(ValidationWarning::config(
            WarningField::OriginatorShortName,
            "originator_short_name not defined, using originator_long_name.".to_string(),
        ));
    }

    let short_name = config.resolved_short_name();
    if short_name.chars().count() > SHORT_NAME_WIDTH {
        warnings.push(ValidationWarning::config(
            WarningField::OriginatorShortName,
            format!(
                "originator_short_name will be truncated to {} characters: {}",
                SHORT_NAME_WIDTH, short_name
            ),
        ));
    }

    if config.originator_long_name.chars().count() > LONG_NAME_WIDTH {
        warnings.push(ValidationWarning::config(
            WarningField::OriginatorLongName,
            format!(
                "originator_long_name will be truncated to {} characters: {}",
                LONG_NAME_WIDTH, config.originator_long_name
            ),
        ));
    }

    for (field, value) in [
        (WarningField::OriginatorShortName, short_name),
        (WarningField::OriginatorLongName, config.originator_long_name.as_str()),
    ] {
        if !value.is_ascii() {
            warnings.push(ValidationWarning::config(field, non_ascii_message(field, value)));
        }
    }

    validate_return_account(config)?;

    Ok(warnings)
}

fn validate_return_account(config: &EftConfiguration) -> Result<()> {
    let fields = [
        ("return_institution_number", &config.return_institution_number, 3, "1 to 3 digits"),
        ("return_transit_number", &config.return_transit_number, 5, "1 to 5 digits"),
        ("return_account_number", &config.return_account_number, 12, "1 to 12 digits"),
    ];

    let mut missing = 0;
    for (field, value, max, expected) in fields {
        match value {
            Some(value) if !is_digits(value, 1, max) => {
                return Err(invalid_field(field, value, expected));
            }
            Some(_) => {}
            None => missing += 1,
        }
    }

    if missing > 0 && missing < 3 {
        return Err(EftError::IncompleteReturnAccount);
    }

    Ok(())
}

fn validate_transactions(
    transactions: &[Transaction],
    codes: &dyn CodeLookup,
) -> Result<Vec<ValidationWarning>> {
    let mut warnings = Vec::new();

    if transactions.is_empty() {
        warnings.push(ValidationWarning::config(
            WarningField::Transactions,
            "There are no transactions to include in the file.".to_string(),
        ));
    } else if transactions.len() > MAX_TRANSACTIONS {
        return Err(EftError::TooManyTransactions {
            count: transactions.len(),
            max: MAX_TRANSACTIONS,
        });
    }

    let mut cross_references: HashSet<&str> = HashSet::new();

    for (transaction_index, transaction) in transactions.iter().enumerate() {
        if transaction.segments.is_empty() {
            warnings.push(ValidationWarning::transaction(
                WarningField::Segments,
                transaction_index,
                "Transaction has no segments, will be ignored.".to_string(),
            ));
        } else if transaction.segments.len() > SEGMENTS_PER_RECORD {
            warnings.push(ValidationWarning::transaction(
                WarningField::Segments,
                transaction_index,
                format!(
                    "Transaction has more than {} segments, will be split into multiple records.",
                    SEGMENTS_PER_RECORD
                ),
            ));
        }

        for (segment_index, segment) in transaction.segments.iter().enumerate() {
            let segment_error = |field: &'static str, value: String, expected: &'static str| {
                EftError::InvalidSegmentField {
                    transaction_index,
                    segment_index,
                    field,
                    value,
                    expected,
                }
            };

            if segment.cpa_code > 999 {
                return Err(segment_error(
                    "cpa_code",
                    segment.cpa_code.to_string(),
                    "at most 3 digits",
                ));
            }

            if !codes.is_known(segment.cpa_code) {
                warnings.push(ValidationWarning::segment(
                    WarningField::CpaCode,
                    transaction_index,
                    segment_index,
                    format!("Unknown CPA code: {}", segment.cpa_code),
                ));
            }

            if !segment.amount.is_in_range() {
                return Err(EftError::AmountOutOfRange {
                    transaction_index,
                    segment_index,
                    amount: segment.amount.value(),
                });
            }

            let routing = [
                ("bank_institution_number", &segment.bank_institution_number, 3, "1 to 3 digits"),
                ("bank_transit_number", &segment.bank_transit_number, 5, "1 to 5 digits"),
                ("bank_account_number", &segment.bank_account_number, 12, "1 to 12 digits"),
            ];
            for (field, value, max, expected) in routing {
                if !is_digits(value, 1, max) {
                    return Err(segment_error(field, value.clone(), expected));
                }
            }

            if segment.payee_name.chars().count() > PAYEE_NAME_WIDTH {
                warnings.push(ValidationWarning::segment(
                    WarningField::PayeeName,
                    transaction_index,
                    segment_index,
                    format!(
                        "payee_name will be truncated to {} characters: {}",
                        PAYEE_NAME_WIDTH, segment.payee_name
                    ),
                ));
            }

            if !segment.payee_name.is_ascii() {
                warnings.push(ValidationWarning::segment(
                    WarningField::PayeeName,
                    transaction_index,
                    segment_index,
                    non_ascii_message(WarningField::PayeeName, &segment.payee_name),
                ));
            }

            if let Some(reference) = segment.cross_reference_number.as_deref() {
                if !reference.is_ascii() {
                    warnings.push(ValidationWarning::segment(
                        WarningField::CrossReferenceNumber,
                        transaction_index,
                        segment_index,
                        non_ascii_message(WarningField::CrossReferenceNumber, reference),
                    ));
                }
                if !cross_references.insert(reference) {
                    warnings.push(ValidationWarning::segment(
                        WarningField::CrossReferenceNumber,
                        transaction_index,
                        segment_index,
                        format!("cross_reference_number should be unique: {}", reference),
                    ));
                }
            }
        }
    }

    Ok(warnings)
}

/// Multi-byte characters make a record longer than its fixed byte width.
fn non_ascii_message(field: WarningField, value: &str) -> String {
    format!(
        "{} contains non-ASCII characters, record will exceed its fixed byte width: {}",
        field, value
    )
}

fn invalid_field(field: &'static str, value: &str, expected: &'static str) -> EftError {
    EftError::InvalidField {
        field,
        value: value.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::Amount;
    use crate::codes::CpaCodes;
    use crate::transaction::TransactionSegment;
    use std::str::FromStr;

    fn config() -> EftConfiguration {
        EftConfiguration::new("0123456789", "0001", "The City of Example").with_short_name("EXAMPLE")
    }

    fn segment(amount: &str) -> TransactionSegment {
        TransactionSegment::new(
            385,
            Amount::from_str(amount).unwrap(),
            "111",
            "22222",
            "333333333",
            "Test Property Owner",
        )
    }

    fn check(config: &EftConfiguration, transactions: &[Transaction]) -> Result<Vec<ValidationWarning>> {
        validate(config, transactions, &CpaCodes)
    }

    #[test]
    fn test_is_digits() {
        assert!(is_digits("0001", 1, 4));
        assert!(is_digits("", 0, 5));
        assert!(!is_digits("", 1, 4));
        assert!(!is_digits("12345", 1, 4));
        assert!(!is_digits("12a", 1, 4));
    }

    #[test]
    fn test_clean_input_has_no_warnings() {
        let warnings = check(&config(), &[Transaction::debit(vec![segment("10")])]).unwrap();
        assert!(warnings.is_empty(), "{:?}", warnings);
    }

    #[test]
    fn test_originator_id_too_long() {
        let mut config = config();
        config.originator_id = "12345678901".to_string();
        assert!(matches!(
            check(&config, &[]),
            Err(EftError::InvalidField { field: "originator_id", .. })
        ));
    }

    #[test]
    fn test_file_creation_number_must_be_digits() {
        let mut config = config();
        config.file_creation_number = "abcdefg".to_string();
        assert!(matches!(
            check(&config, &[]),
            Err(EftError::InvalidField { field: "file_creation_number", .. })
        ));
    }

    #[test]
    fn test_data_centre_pattern() {
        let config = config().with_data_centre("");
        assert!(check(&config, &[]).is_ok());

        let config = config.with_data_centre("123456");
        assert!(matches!(
            check(&config, &[]),
            Err(EftError::InvalidField { field: "destination_data_centre", .. })
        ));
    }

    #[test]
    fn test_missing_short_name_warns() {
        let config = EftConfiguration::new("01", "1", "Short Long Name");
        let warnings = check(&config, &[Transaction::credit(vec![segment("1")])]).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, WarningField::OriginatorShortName);
    }

    #[test]
    fn test_long_names_warn_truncation() {
        let config = EftConfiguration::new(
            "01",
            "1",
            "This name exceeds the 30 character limit and will be truncated.",
        );
        let warnings = check(&config, &[Transaction::credit(vec![segment("1")])]).unwrap();
        let fields: Vec<_> = warnings.iter().map(|w| w.field).collect();
        assert_eq!(
            fields,
            vec![
                WarningField::OriginatorShortName,
                WarningField::OriginatorShortName,
                WarningField::OriginatorLongName,
            ]
        );
    }

    #[test]
    fn test_partial_return_account_is_fatal() {
        let mut config = config();
        config.return_institution_number = Some("123".to_string());
        assert!(matches!(
            check(&config, &[]),
            Err(EftError::IncompleteReturnAccount)
        ));

        let config = config.with_return_account("123", "45678", "901234567890");
        assert!(check(&config, &[]).is_ok());
    }

    #[test]
    fn test_return_account_pattern() {
        let config = config().with_return_account("1234", "45678", "9");
        assert!(matches!(
            check(&config, &[]),
            Err(EftError::InvalidField { field: "return_institution_number", .. })
        ));
    }

    #[test]
    fn test_empty_transaction_list_warns() {
        let warnings = check(&config(), &[]).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, WarningField::Transactions);
    }

    #[test]
    fn test_segment_count_warnings() {
        let transactions = vec![
            Transaction::credit(Vec::new()),
            Transaction::debit(vec![segment("1"); 7]),
        ];
        let warnings = check(&config(), &transactions).unwrap();
        assert_eq!(warnings.len(), 2);
        assert!(warnings
            .iter()
            .all(|w| w.field == WarningField::Segments && w.segment_index.is_none()));
        assert_eq!(warnings[0].transaction_index, Some(0));
        assert_eq!(warnings[1].transaction_index, Some(1));
    }

    #[test]
    fn test_unknown_code_warns() {
        let mut seg = segment("1");
        seg.cpa_code = 999;
        let warnings = check(&config(), &[Transaction::credit(vec![seg])]).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, WarningField::CpaCode);
        assert_eq!(warnings[0].segment_index, Some(0));
    }

    #[test]
    fn test_four_digit_code_is_fatal() {
        let mut seg = segment("1");
        seg.cpa_code = 1000;
        assert!(matches!(
            check(&config(), &[Transaction::credit(vec![seg])]),
            Err(EftError::InvalidSegmentField { field: "cpa_code", .. })
        ));
    }

    #[test]
    fn test_amount_bounds() {
        for bad in ["0", "0.004", "-1", "100000000", "123456789"] {
            let result = check(&config(), &[Transaction::credit(vec![segment(bad)])]);
            assert!(
                matches!(result, Err(EftError::AmountOutOfRange { .. })),
                "{} should be rejected",
                bad
            );
        }
        assert!(check(&config(), &[Transaction::credit(vec![segment("99999999.99")])]).is_ok());
    }

    #[test]
    fn test_bank_routing_patterns() {
        let mut seg = segment("1");
        seg.bank_transit_number = "123456".to_string();
        let err = check(&config(), &[Transaction::debit(vec![segment("1"), seg])]).unwrap_err();
        match err {
            EftError::InvalidSegmentField {
                transaction_index,
                segment_index,
                field,
                ..
            } => {
                assert_eq!(transaction_index, 0);
                assert_eq!(segment_index, 1);
                assert_eq!(field, "bank_transit_number");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_ascii_names_warn() {
        let config = EftConfiguration::new("01", "1", "Ville de Montréal").with_short_name("Montréal");
        let mut seg = segment("1");
        seg.payee_name = "Hélène Côté".to_string();
        let warnings = check(&config, &[Transaction::credit(vec![seg])]).unwrap();

        let fields: Vec<_> = warnings.iter().map(|w| w.field).collect();
        assert_eq!(
            fields,
            vec![
                WarningField::OriginatorShortName,
                WarningField::OriginatorLongName,
                WarningField::PayeeName,
            ]
        );
        assert!(warnings.iter().all(|w| w.message.contains("non-ASCII")));
        assert_eq!(warnings[2].segment_index, Some(0));
    }

    #[test]
    fn test_ascii_names_do_not_warn() {
        let config = EftConfiguration::new("01", "1", "Ville de Montreal").with_short_name("Montreal");
        let warnings = check(&config, &[Transaction::credit(vec![segment("1")])]).unwrap();
        assert!(warnings.is_empty(), "{:?}", warnings);
    }

    #[test]
    fn test_long_payee_name_warns() {
        let mut seg = segment("1");
        seg.payee_name = "A".repeat(31);
        let warnings = check(&config(), &[Transaction::debit(vec![seg])]).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, WarningField::PayeeName);
    }

    #[test]
    fn test_duplicate_cross_reference_warns_on_repeats_only() {
        let transactions = vec![
            Transaction::credit(vec![
                segment("1").with_cross_reference("REF-1"),
                segment("2").with_cross_reference("REF-1"),
            ]),
            Transaction::debit(vec![segment("3").with_cross_reference("REF-1"), segment("4")]),
        ];
        let warnings = check(&config(), &transactions).unwrap();
        assert_eq!(warnings.len(), 2);
        assert!(warnings
            .iter()
            .all(|w| w.field == WarningField::CrossReferenceNumber));
        assert_eq!(warnings[0].segment_index, Some(1));
        assert_eq!(warnings[1].transaction_index, Some(1));
    }

    #[test]
    fn test_fatal_error_stops_at_first_problem() {
        let mut config = config();
        config.originator_id = "12345678901".to_string();
        config.file_creation_number = "x".to_string();
        assert!(matches!(
            check(&config, &[]),
            Err(EftError::InvalidField { field: "originator_id", .. })
        ));
    }

    #[test]
    fn test_warning_display() {
        let warning = ValidationWarning::segment(WarningField::PayeeName, 2, 3, "too long".to_string());
        assert_eq!(warning.to_string(), "transaction 2 segment 3: payee_name: too long");
    }
}
