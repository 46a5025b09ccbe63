//! Data models shared by the drivers.

pub mod config;
pub mod document;
pub mod structured;

pub use config::{ConfigResolver, DocAiConfig, ProcessorIdSource};
pub use document::{Document, Entity, NamedEntity, RawDocument};
pub use structured::StructuredResult;
