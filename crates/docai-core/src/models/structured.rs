//! Normalized three-section invoice record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::document::NamedEntity;

/// Header fields, line items and footer fields of one processed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredResult {
    /// Header fields, plus any entity type not otherwise classified.
    pub header: BTreeMap<String, NamedEntity>,

    /// Line items in document order.
    pub line_items: Vec<NamedEntity>,

    /// Totals and tax fields.
    pub footer: BTreeMap<String, NamedEntity>,

    /// Identifier generated for this run.
    pub transaction_id: Uuid,
}

impl StructuredResult {
    /// Create an empty result with a fresh transaction id.
    pub fn new() -> Self {
        Self {
            header: BTreeMap::new(),
            line_items: Vec::new(),
            footer: BTreeMap::new(),
            transaction_id: Uuid::new_v4(),
        }
    }

    /// Total number of entities across all sections.
    pub fn entity_count(&self) -> usize {
        self.header.len() + self.line_items.len() + self.footer.len()
    }
}

impl Default for StructuredResult {
    fn default() -> Self {
        Self::new()
    }
}
