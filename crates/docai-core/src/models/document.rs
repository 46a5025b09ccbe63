//! Documents sent to and received from the processor.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DocAiError, InputError};
use crate::mime::MimeType;

/// A document ready for submission.
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// File contents.
    pub content: Vec<u8>,

    /// Supported MIME type of the contents.
    pub mime_type: MimeType,
}

impl RawDocument {
    /// Read a file from disk after checking it exists and has a supported type.
    pub fn from_path(path: &Path) -> Result<Self, DocAiError> {
        if !path.exists() {
            return Err(InputError::FileNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        let mime_type = MimeType::from_path(path);
        if !mime_type.is_supported() {
            return Err(InputError::UnsupportedMimeType {
                path: path.to_path_buf(),
            }
            .into());
        }

        let content = fs::read(path)?;
        Ok(Self { content, mime_type })
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// The parts of a processed document the normalizer consumes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    /// Full extracted text.
    pub text: String,

    /// Extracted entities in document order.
    pub entities: Vec<Entity>,
}

/// A typed entity as returned by the processor, possibly with children.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Entity {
    /// Entity type, e.g. `invoice_id` or `line_item/quantity`.
    #[serde(rename = "type")]
    pub entity_type: String,

    /// Text as it appears in the document.
    pub mention_text: String,

    /// Extraction confidence (0.0 - 1.0).
    pub confidence: Option<f32>,

    /// Nested sub-entities.
    pub properties: Vec<Entity>,
}

impl Entity {
    /// Create a leaf entity.
    pub fn new(entity_type: impl Into<String>, mention_text: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            mention_text: mention_text.into(),
            ..Self::default()
        }
    }

    /// Attach a child entity.
    pub fn with_property(mut self, child: Entity) -> Self {
        self.properties.push(child);
        self
    }
}

/// An entity flattened to its value and one level of sub-fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedEntity {
    /// Entity type; the map key carries it in serialized output.
    #[serde(skip)]
    pub entity_type: String,

    /// Plain text value.
    pub value: String,

    /// Sub-fields keyed by the trailing segment of their type.
    pub properties: BTreeMap<String, String>,
}

impl NamedEntity {
    /// Flatten an [`Entity`], keeping only its direct children.
    pub fn from_entity(entity: &Entity) -> Self {
        let properties = entity
            .properties
            .iter()
            .map(|child| (short_type(&child.entity_type).to_string(), child.mention_text.clone()))
            .collect();

        Self {
            entity_type: entity.entity_type.clone(),
            value: entity.mention_text.clone(),
            properties,
        }
    }
}

/// Strip any path prefix from an entity type: `line_item/quantity` -> `quantity`.
pub fn short_type(entity_type: &str) -> &str {
    entity_type
        .rsplit_once('/')
        .map(|(_, tail)| tail)
        .unwrap_or(entity_type)
}
