//! Application services, ports and code generators.

#![forbid(unsafe_code)]

pub mod export;

mod form_builder_service;
mod form_ports;

pub use export::{ExportArtifact, ExportFormat};
pub use form_builder_service::FormBuilderService;
pub use form_ports::{AppliedCommand, FormDocumentRepository};
