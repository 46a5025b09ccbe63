//! Classification of processor entities into header, line items and footer.

use tracing::debug;

use crate::models::document::{Entity, NamedEntity};
use crate::models::structured::StructuredResult;

use super::fields::{ClassificationTables, Section};

/// Trait for turning a processed document's entities into a structured record.
pub trait InvoiceNormalizer {
    /// Classify entities in input order.
    fn normalize(&self, entities: &[Entity]) -> StructuredResult;
}

/// Table-driven normalizer.
///
/// Entities sharing a type in the header or footer overwrite each other;
/// the last one in input order is kept.
#[derive(Debug, Clone, Default)]
pub struct ResponseNormalizer {
    tables: ClassificationTables,
}

impl ResponseNormalizer {
    /// Create a normalizer with the default invoice tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use custom classification tables.
    pub fn with_tables(mut self, tables: ClassificationTables) -> Self {
        self.tables = tables;
        self
    }
}

impl InvoiceNormalizer for ResponseNormalizer {
    fn normalize(&self, entities: &[Entity]) -> StructuredResult {
        let mut result = StructuredResult::new();

        for entity in entities {
            let named = NamedEntity::from_entity(entity);
            let section = self.tables.classify(&entity.entity_type);

            match section {
                Section::Header | Section::Unclassified => {
                    if section == Section::Unclassified {
                        debug!("Unclassified entity type '{}' stored in header", entity.entity_type);
                    }
                    result.header.insert(entity.entity_type.clone(), named);
                }
                Section::LineItem => result.line_items.push(named),
                Section::Footer => {
                    result.footer.insert(entity.entity_type.clone(), named);
                }
            }
        }

        debug!(
            "Normalized {} entities: {} header, {} line items, {} footer",
            entities.len(),
            result.header.len(),
            result.line_items.len(),
            result.footer.len()
        );

        result
    }
}
