//! File-level configuration: who is sending the file and how it is routed.

use crate::error::EftError;
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

/// Destination currency written to the header record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    Cad,
    Usd,
}

impl Currency {
    /// Three-letter code used in the header.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Cad => "CAD",
            Currency::Usd => "USD",
        }
    }
}

impl FromStr for Currency {
    type Err = EftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CAD" => Ok(Currency::Cad),
            "USD" => Ok(Currency::Usd),
            _ => Err(EftError::UnsupportedCurrency(s.to_string())),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Configuration for one CPA-005 file.
///
/// Required fields are taken by [`EftConfiguration::new`]; optional ones are
/// set with the `with_*` builders. Values are checked by
/// [`validate`](crate::validation::validate), not on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EftConfiguration {
    /// Originator's id, also known as client number or customer number. At most 10 characters.
    pub originator_id: String,

    /// Short name printed on statements. Falls back to the long name.
    pub originator_short_name: Option<String>,

    pub originator_long_name: String,

    /// 1 to 4 digits. Should differ from the previous ten files submitted.
    pub file_creation_number: String,

    /// Defaults to today.
    pub file_creation_date: Option<NaiveDate>,

    /// Processing centre, 0 to 5 digits.
    pub destination_data_centre: Option<String>,

    pub destination_currency: Option<Currency>,

    /// Routing for returned items. All three or none.
    pub return_institution_number: Option<String>,
    pub return_transit_number: Option<String>,
    pub return_account_number: Option<String>,
}

impl EftConfiguration {
    /// Creates a configuration with only the required fields set.
    pub fn new(
        originator_id: impl Into<String>,
        file_creation_number: impl Into<String>,
        originator_long_name: impl Into<String>,
    ) -> Self {
        EftConfiguration {
            originator_id: originator_id.into(),
            originator_short_name: None,
            originator_long_name: originator_long_name.into(),
            file_creation_number: file_creation_number.into(),
            file_creation_date: None,
            destination_data_centre: None,
            destination_currency: None,
            return_institution_number: None,
            return_transit_number: None,
            return_account_number: None,
        }
    }

    pub fn with_short_name(mut self, short_name: impl Into<String>) -> Self {
        self.originator_short_name = Some(short_name.into());
        self
    }

    pub fn with_creation_date(mut self, date: NaiveDate) -> Self {
        self.file_creation_date = Some(date);
        self
    }

    pub fn with_data_centre(mut self, data_centre: impl Into<String>) -> Self {
        self.destination_data_centre = Some(data_centre.into());
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.destination_currency = Some(currency);
        self
    }

    /// Sets the institution, transit and account numbers for returned items.
    pub fn with_return_account(
        mut self,
        institution: impl Into<String>,
        transit: impl Into<String>,
        account: impl Into<String>,
    ) -> Self {
        self.return_institution_number = Some(institution.into());
        self.return_transit_number = Some(transit.into());
        self.return_account_number = Some(account.into());
        self
    }

    /// Short name as it will be written: the configured one, or the long name.
    pub fn resolved_short_name(&self) -> &str {
        self.originator_short_name
            .as_deref()
            .unwrap_or(&self.originator_long_name)
    }
}
