//! Core library for Document AI invoice processing.
//!
//! This crate provides:
//! - Configuration resolution from the environment and a fallback file
//! - File extension to MIME type classification
//! - A Document AI REST client behind the [`DocumentProcessor`] trait
//! - Normalization of extracted entities into header, line items and footer
//! - Output file naming and JSON writing

pub mod error;
pub mod invoice;
pub mod mime;
pub mod models;
pub mod output;
pub mod processor;

pub use error::{ConfigError, DocAiError, InputError, RemoteCallError, Result};
pub use invoice::{ClassificationTables, InvoiceNormalizer, ResponseNormalizer};
pub use mime::MimeType;
pub use models::{
    ConfigResolver, DocAiConfig, Document, Entity, NamedEntity, ProcessorIdSource, RawDocument,
    StructuredResult,
};
pub use processor::{DocumentAiClient, DocumentProcessor, ProcessedDocument, TokenProvider};
