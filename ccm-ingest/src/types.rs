use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format printed on statement rows (`DD/MM/YYYY`).
pub const STATEMENT_DATE_FORMAT: &str = "%d/%m/%Y";

/// One transaction row recovered from a statement's layout text.
///
/// Dates are kept exactly as printed; amounts are canonical decimal strings
/// (`"1234,56"`) or `None` when the column held nothing parseable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementRecord {
    pub date: String,
    pub value_date: String,
    pub operation: String,
    pub debit: Option<String>,
    pub credit: Option<String>,
}

impl StatementRecord {
    /// Transaction date as a calendar date, if it is a real one.
    pub fn transaction_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, STATEMENT_DATE_FORMAT).ok()
    }

    pub fn value_date_parsed(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.value_date, STATEMENT_DATE_FORMAT).ok()
    }

    /// False when both amount columns came out empty (likely misaligned columns).
    pub fn has_amount(&self) -> bool {
        self.debit.is_some() || self.credit.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str) -> StatementRecord {
        StatementRecord {
            date: date.to_string(),
            value_date: "02/01/2023".to_string(),
            operation: "CARTE X1234".to_string(),
            debit: None,
            credit: Some("10,00".to_string()),
        }
    }

    #[test]
    fn test_transaction_date_parses_day_first() {
        let r = record("31/01/2023");
        assert_eq!(r.transaction_date(), NaiveDate::from_ymd_opt(2023, 1, 31));
        assert_eq!(r.value_date_parsed(), NaiveDate::from_ymd_opt(2023, 1, 2));
    }

    #[test]
    fn test_transaction_date_none_for_impossible_date() {
        // Kept verbatim by the parser, rejected only by the helper.
        assert_eq!(record("31/02/2023").transaction_date(), None);
    }

    #[test]
    fn test_has_amount() {
        let mut r = record("01/01/2023");
        assert!(r.has_amount());
        r.credit = None;
        assert!(!r.has_amount());
    }
}
