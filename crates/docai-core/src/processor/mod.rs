//! Remote document processing.

mod auth;
mod client;

pub use auth::TokenProvider;
pub use client::DocumentAiClient;

use std::future::Future;

use crate::error::RemoteCallError;
use crate::models::document::{Document, RawDocument};

/// Result type for remote processing.
pub type Result<T> = std::result::Result<T, RemoteCallError>;

/// A processed document as returned by the service.
#[derive(Debug, Clone)]
pub struct ProcessedDocument {
    /// The `document` object exactly as received.
    pub raw: serde_json::Value,

    /// Text and entities decoded from `raw`.
    pub document: Document,
}

/// Trait for services that turn raw bytes into a structured document.
pub trait DocumentProcessor {
    /// Fully qualified processor resource name.
    fn processor_name(&self) -> &str;

    /// Submit one document and wait for the result.
    fn process(&self, document: &RawDocument) -> impl Future<Output = Result<ProcessedDocument>> + Send;
}
