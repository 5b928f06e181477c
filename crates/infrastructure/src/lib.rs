//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_form_document_repository;

pub use in_memory_form_document_repository::InMemoryFormDocumentRepository;
