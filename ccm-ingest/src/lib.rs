//! ccm-ingest: layout-text statement parsing, amount normalization and table export.

pub mod amount;
pub mod config;
pub mod export;
pub mod parsers;
pub mod types;

pub use amount::{normalize_amount, parse_amount};
pub use config::{ColumnBounds, HeaderLabels, LayoutConfig};
pub use export::{OutputFormat, write_csv, write_json, write_records};
pub use parsers::{LayoutParser, parse_layout_text};
pub use types::StatementRecord;
