//! Statement-format profile: header labels and column boundaries.

use anyhow::{Result, bail, ensure};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DEBIT_START: usize = 150;
pub const DEFAULT_CREDIT_START: usize = 200;

/// Literal column labels of the statement header line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderLabels {
    pub date: String,
    pub value_date: String,
    pub operation: String,
    pub debit: String,
    pub credit: String,
}

impl Default for HeaderLabels {
    fn default() -> Self {
        Self {
            date: "Date".to_string(),
            value_date: "Date valeur".to_string(),
            operation: "Opération".to_string(),
            debit: "Débit euros".to_string(),
            credit: "Crédit euros".to_string(),
        }
    }
}

impl HeaderLabels {
    /// Labels in the order they appear on the header line.
    pub fn in_order(&self) -> [&str; 5] {
        [
            &self.date,
            &self.value_date,
            &self.operation,
            &self.debit,
            &self.credit,
        ]
    }
}

/// Character offsets where the debit and credit columns begin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnBounds {
    pub debit_start: usize,
    pub credit_start: usize,
}

impl Default for ColumnBounds {
    fn default() -> Self {
        Self {
            debit_start: DEFAULT_DEBIT_START,
            credit_start: DEFAULT_CREDIT_START,
        }
    }
}

impl ColumnBounds {
    pub fn new(debit_start: usize, credit_start: usize) -> Result<Self> {
        let bounds = Self {
            debit_start,
            credit_start,
        };
        bounds.validate()?;
        Ok(bounds)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.debit_start < self.credit_start,
            "debit column ({}) must start before credit column ({})",
            self.debit_start,
            self.credit_start
        );
        Ok(())
    }
}

/// Everything the layout parser needs to know about one statement format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub labels: HeaderLabels,
    pub bounds: ColumnBounds,
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<()> {
        self.bounds.validate()?;
        for label in self.labels.in_order() {
            if label.trim().is_empty() {
                bail!("header labels must not be blank");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_french_statement() {
        let cfg = LayoutConfig::default();
        assert_eq!(cfg.bounds.debit_start, 150);
        assert_eq!(cfg.bounds.credit_start, 200);
        assert_eq!(cfg.labels.debit, "Débit euros");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_bounds_reject_inverted_columns() {
        assert!(ColumnBounds::new(200, 150).is_err());
        assert!(ColumnBounds::new(150, 150).is_err());
        assert!(ColumnBounds::new(40, 60).is_ok());
    }

    #[test]
    fn test_blank_label_rejected() {
        let mut cfg = LayoutConfig::default();
        cfg.labels.credit = "  ".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg: LayoutConfig =
            serde_json::from_str(r#"{"bounds": {"debit_start": 90}}"#).unwrap();
        assert_eq!(cfg.bounds.debit_start, 90);
        assert_eq!(cfg.bounds.credit_start, DEFAULT_CREDIT_START);
        assert_eq!(cfg.labels, HeaderLabels::default());
    }
}
