//! Entity type tables for the invoice sections.

use std::collections::HashSet;

/// Entity type routed to the line item list.
pub const LINE_ITEM: &str = "line_item";

/// Entity types placed in the header.
pub const HEADER_FIELDS: &[&str] = &[
    "invoice_id",
    "invoice_date",
    "supplier_name",
    "supplier_address",
    "supplier_tax_id",
    "supplier_iban",
    "receiver_name",
    "receiver_address",
    "receiver_tax_id",
    "invoice_type",
];

/// Entity types placed in the footer.
pub const FOOTER_FIELDS: &[&str] = &["net_amount", "total_tax_amount", "vat", "total_amount"];

/// Section an entity lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Header,
    LineItem,
    Footer,
    /// Not in either table; stored in the header.
    Unclassified,
}

/// Header and footer field names used to route entities.
#[derive(Debug, Clone)]
pub struct ClassificationTables {
    header: HashSet<String>,
    footer: HashSet<String>,
}

impl ClassificationTables {
    /// Build tables from explicit field lists.
    pub fn new<H, F, S>(header: H, footer: F) -> Self
    where
        H: IntoIterator<Item = S>,
        F: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            footer: footer.into_iter().map(Into::into).collect(),
        }
    }

    /// Decide the section for an entity type.
    ///
    /// Header wins over the line item literal, which wins over footer.
    pub fn classify(&self, entity_type: &str) -> Section {
        if self.header.contains(entity_type) {
            Section::Header
        } else if entity_type == LINE_ITEM {
            Section::LineItem
        } else if self.footer.contains(entity_type) {
            Section::Footer
        } else {
            Section::Unclassified
        }
    }
}

impl Default for ClassificationTables {
    fn default() -> Self {
        Self::new(
            HEADER_FIELDS.iter().copied(),
            FOOTER_FIELDS.iter().copied(),
        )
    }
}
