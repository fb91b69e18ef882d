//! gradepace-store: snapshot persistence.
//!
//! Implements the `ProgressStore` port for JSON files and memory, decodes
//! current and legacy snapshot documents, and loads `gradepace.toml`.

pub mod config;
pub mod document;
pub mod error;
pub mod json;
pub mod memory;

pub use config::{create_store, load_config, load_config_from, GradepaceConfig};
pub use document::{decode_document, encode_document, Decoded};
pub use error::DocumentError;
pub use json::JsonFileStore;
pub use memory::MemoryStore;
