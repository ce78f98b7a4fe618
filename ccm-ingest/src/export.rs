//! Output table writers.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::types::StatementRecord;

pub const CSV_HEADER: [&str; 5] = [
    "Date",
    "Date de valeur",
    "Operation",
    "Debit Euros",
    "Credit Euros",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => bail!("unknown output format: {other} (expected csv or json)"),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => f.write_str("csv"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Header row, then one row per record. Absent amounts become empty cells.
pub fn write_csv<W: Write>(records: &[StatementRecord], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER).context("writing CSV header")?;

    for r in records {
        wtr.write_record([
            r.date.as_str(),
            r.value_date.as_str(),
            r.operation.as_str(),
            r.debit.as_deref().unwrap_or(""),
            r.credit.as_deref().unwrap_or(""),
        ])
        .with_context(|| format!("writing row dated {}", r.date))?;
    }

    wtr.flush().context("flushing CSV output")?;
    Ok(())
}

/// Pretty JSON array; absent amounts are `null`.
pub fn write_json<W: Write>(records: &[StatementRecord], mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, records).context("writing JSON output")?;
    writeln!(writer)?;
    writer.flush().context("flushing JSON output")?;
    Ok(())
}

pub fn write_records<W: Write>(
    records: &[StatementRecord],
    format: OutputFormat,
    writer: W,
) -> Result<()> {
    match format {
        OutputFormat::Csv => write_csv(records, writer),
        OutputFormat::Json => write_json(records, writer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<StatementRecord> {
        vec![
            StatementRecord {
                date: "01/01/2023".into(),
                value_date: "02/01/2023".into(),
                operation: "CARTE COFFEE, SHOP".into(),
                debit: Some("12,50".into()),
                credit: None,
            },
            StatementRecord {
                date: "03/01/2023".into(),
                value_date: "03/01/2023".into(),
                operation: "VIR SEPA".into(),
                debit: None,
                credit: Some("2100,00".into()),
            },
        ]
    }

    #[test]
    fn test_csv_header_and_rows() {
        let mut buf = Vec::new();
        write_csv(&sample(), &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = out.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Date,Date de valeur,Operation,Debit Euros,Credit Euros");
        // Comma amounts and descriptions are quoted.
        assert_eq!(lines[1], r#"01/01/2023,02/01/2023,"CARTE COFFEE, SHOP","12,50","#);
        assert_eq!(lines[2], r#"03/01/2023,03/01/2023,VIR SEPA,,"2100,00""#);
    }

    #[test]
    fn test_csv_empty_still_has_header() {
        let mut buf = Vec::new();
        write_csv(&[], &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_json_uses_null_for_absent() {
        let mut buf = Vec::new();
        write_records(&sample(), OutputFormat::Json, &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["debit"], "12,50");
        assert!(value[0]["credit"].is_null());
        assert_eq!(value.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xlsx".parse::<OutputFormat>().is_err());
    }
}
