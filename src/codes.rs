//! CPA transaction type codes.
//!
//! The validator only needs to know whether a code is recognised; the
//! contents of the table are supplied through [`CodeLookup`].

/// Answers whether a transaction type code is known.
pub trait CodeLookup {
    fn is_known(&self, code: u16) -> bool;
}

impl<F> CodeLookup for F
where
    F: Fn(u16) -> bool,
{
    fn is_known(&self, code: u16) -> bool {
        self(code)
    }
}

/// Built-in table of CPA Standard 007 transaction codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpaCodes;

impl CpaCodes {
    /// Known codes with their descriptions, sorted by code.
    pub const TABLE: &'static [(u16, &'static str)] = &[
        (200, "Payroll Deposit"),
        (201, "Commission"),
        (202, "Vacation Pay"),
        (203, "Bonus"),
        (204, "Overtime"),
        (205, "Retroactive Pay"),
        (206, "Travel Expenses"),
        (230, "Pension"),
        (231, "Annuity"),
        (232, "Superannuation"),
        (233, "Retirement Income Fund"),
        (240, "Dividend"),
        (241, "Interest"),
        (250, "Federal Payment"),
        (260, "Provincial Payment"),
        (270, "Municipal Payment"),
        (280, "Investment"),
        (300, "Utility"),
        (310, "Telephone Bill"),
        (320, "Gas Bill"),
        (330, "Hydro Bill"),
        (340, "Water Bill"),
        (350, "Cable Bill"),
        (370, "Insurance Premium"),
        (380, "Taxes"),
        (381, "Income Tax"),
        (385, "Property Taxes"),
        (390, "Rent"),
        (400, "Business Payment"),
        (401, "Business Pre-Authorized Debit"),
        (430, "Bill Payment"),
        (450, "Miscellaneous Payment"),
        (460, "Cash Management"),
        (470, "Loan Payment"),
        (480, "Mortgage Payment"),
        (490, "Credit Card Payment"),
        (700, "Business to Business"),
        (701, "Electronic Data Interchange"),
    ];

    /// Returns the description of a known code.
    pub fn describe(code: u16) -> Option<&'static str> {
        Self::TABLE
            .binary_search_by_key(&code, |(c, _)| *c)
            .ok()
            .map(|idx| Self::TABLE[idx].1)
    }
}

impl CodeLookup for CpaCodes {
    fn is_known(&self, code: u16) -> bool {
        Self::describe(code).is_some()
    }
}
