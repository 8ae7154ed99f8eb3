//! CSV provider turning grid exports into [`gridlink_core::NodeRecord`]s.

mod errors;
mod layout;
mod parse;
mod source;

pub use errors::CsvProviderError;
pub use layout::{ColumnLayout, CsvOptions};
pub use parse::{RowField, RowIssue};
pub use source::CsvGridSource;

#[cfg(test)]
mod tests;
