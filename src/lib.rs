//! # EFT Generator
//!
//! Produces CPA-005 electronic funds transfer files, the fixed-width format
//! Canadian financial institutions accept for batches of credits and debits.
//!
//! ## Pipeline
//!
//! 1. **Validation** checks the configuration and every payment segment.
//!    Fatal problems stop immediately with an [`EftError`]; everything else
//!    is returned as a list of [`ValidationWarning`]s.
//! 2. **Formatting** writes a header record, detail records holding up to
//!    six segments each, and a trailer with running debit and credit totals.
//!
//! All records are 1464 characters wide and separated by CRLF.
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use eft_generator::{Amount, EftConfiguration, EftGenerator, FixedClock, TransactionSegment};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
//! let config = EftConfiguration::new("0123456789", "1", "The City of Example")
//!     .with_short_name("EXAMPLE");
//!
//! let mut generator = EftGenerator::new(config).with_clock(FixedClock(today));
//! generator.add_debit_transaction(TransactionSegment::new(
//!     385,
//!     "1234.56".parse::<Amount>().unwrap(),
//!     "111",
//!     "22222",
//!     "333333333",
//!     "Test Property Owner",
//! ));
//!
//! let file = generator.generate().unwrap();
//! assert!(file.starts_with('A'));
//! ```

pub mod amount;
pub mod clock;
pub mod codes;
pub mod config;
pub mod error;
pub mod format;
pub mod generator;
pub mod julian;
pub mod totals;
pub mod transaction;
pub mod validation;

pub use amount::Amount;
pub use clock::{Clock, FixedClock, SystemClock};
pub use codes::{CodeLookup, CpaCodes};
pub use config::{Currency, EftConfiguration};
pub use error::{EftError, Result};
pub use format::{NEWLINE, RECORD_LENGTH};
pub use generator::EftGenerator;
pub use transaction::{Direction, SegmentRecord, Transaction, TransactionSegment};
pub use validation::{ValidationWarning, WarningField};
