//! Invoice entity classification.

pub mod fields;
mod normalizer;

pub use fields::{ClassificationTables, Section, FOOTER_FIELDS, HEADER_FIELDS, LINE_ITEM};
pub use normalizer::{InvoiceNormalizer, ResponseNormalizer};
