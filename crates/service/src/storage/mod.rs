//! Storage abstractions for service layer
//!
//! `backend` holds the byte-level handles a document lives in (a file on disk
//! or a buffer in memory); `json_document_store` encodes whole typed documents
//! into them.

pub mod backend;
pub mod json_document_store;

pub use backend::{DocumentStorage, FileStorage, MemoryStorage};
pub use json_document_store::JsonDocumentStore;
