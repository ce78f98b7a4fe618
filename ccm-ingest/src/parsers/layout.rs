//! Fixed-width statement layout parser.
//!
//! Works on `pdftotext -layout` output, where every row keeps the horizontal
//! position it had on the printed page:
//!
//!   Date        Date valeur  Opération                 Débit euros      Crédit euros
//!   01/01/2023 02/01/2023 CARTE X1234 COFFEE SHOP         12,50
//!   03/01/2023 03/01/2023 VIR SEPA EMPLOYER                              2.100,00
//!
//! A row is any line holding two adjacent `DD/MM/YYYY` dates. The description
//! has no delimiter, so debit and credit are cut at character offsets taken
//! from the header line (or the configured defaults when no header is seen).

use std::sync::OnceLock;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::{debug, warn};

use crate::amount::normalize_amount;
use crate::config::{ColumnBounds, LayoutConfig};
use crate::types::StatementRecord;

/// pdftotext starts every page after the first with a form feed.
const PAGE_BREAK: char = '\u{c}';

fn date_pair_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d{2}/\d{2}/\d{4}) (\d{2}/\d{2}/\d{4})").expect("date pair regex")
    })
}

/// Character offset of a byte index within `line`.
fn char_offset(line: &str, byte_idx: usize) -> usize {
    line[..byte_idx].chars().count()
}

/// Characters `start..end` of `line`, clamped to the line length.
fn char_slice(line: &str, start: usize, end: usize) -> String {
    line.chars()
        .skip(start)
        .take(end.saturating_sub(start))
        .collect()
}

fn char_tail(line: &str, start: usize) -> String {
    line.chars().skip(start).collect()
}

/// Parser for one statement format. Cheap to reuse across documents: column
/// calibration lives only for the duration of a single [`LayoutParser::parse`].
#[derive(Debug, Clone)]
pub struct LayoutParser {
    config: LayoutConfig,
    header_re: Regex,
}

impl LayoutParser {
    pub fn new(config: LayoutConfig) -> Result<Self> {
        config.validate()?;

        let labels = config.labels.in_order().map(regex::escape);
        let pattern = format!(
            r"{}\s*{}\s*{}\s*(?P<debit>{})\s*(?P<credit>{})",
            labels[0], labels[1], labels[2], labels[3], labels[4]
        );
        let header_re = Regex::new(&pattern).context("compiling header pattern")?;

        Ok(Self { config, header_re })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Column boundaries announced by `line`, if it is a header line.
    pub fn calibrate(&self, line: &str) -> Option<ColumnBounds> {
        let line = line.trim_start_matches(PAGE_BREAK);
        let caps = self.header_re.captures(line)?;
        let debit = caps.name("debit")?;
        let credit = caps.name("credit")?;

        Some(ColumnBounds {
            debit_start: char_offset(line, debit.start()),
            credit_start: char_offset(line, credit.start()),
        })
    }

    /// Parse one document's extracted text into records, in line order.
    pub fn parse(&self, text: &str) -> Vec<StatementRecord> {
        let mut bounds = self.config.bounds;
        let mut out = Vec::new();

        for (idx, raw_line) in text.lines().enumerate() {
            let line = raw_line.trim_start_matches(PAGE_BREAK);

            if let Some(found) = self.calibrate(line) {
                if found != bounds {
                    debug!(
                        line = idx + 1,
                        debit_start = found.debit_start,
                        credit_start = found.credit_start,
                        "recalibrated columns from header"
                    );
                }
                bounds = found;
            }

            let Some(record) = parse_row(line, bounds) else {
                continue;
            };

            if !record.has_amount() {
                warn!(
                    line = idx + 1,
                    len = line.chars().count(),
                    debit_start = bounds.debit_start,
                    credit_start = bounds.credit_start,
                    text = line,
                    "no debit or credit amount found, columns may be misaligned"
                );
            }

            out.push(record);
        }

        out
    }
}

/// Slice a transaction row into a record, or `None` if `line` has no date pair.
fn parse_row(line: &str, bounds: ColumnBounds) -> Option<StatementRecord> {
    let caps = date_pair_re().captures(line)?;
    let pair_end = char_offset(line, caps.get(0)?.end());

    let operation = char_slice(line, pair_end, bounds.debit_start);
    let debit = char_slice(line, bounds.debit_start, bounds.credit_start + 1);
    let credit = char_tail(line, bounds.credit_start + 2);

    Some(StatementRecord {
        date: caps[1].to_string(),
        value_date: caps[2].to_string(),
        operation: operation.trim().to_string(),
        debit: normalize_amount(&debit),
        credit: normalize_amount(&credit),
    })
}

/// Parse extracted statement text with the default French layout.
pub fn parse_layout_text(text: &str) -> Result<Vec<StatementRecord>> {
    Ok(LayoutParser::new(LayoutConfig::default())?.parse(text))
}
