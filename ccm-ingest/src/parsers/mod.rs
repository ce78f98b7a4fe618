pub mod layout;

pub use layout::{LayoutParser, parse_layout_text};
