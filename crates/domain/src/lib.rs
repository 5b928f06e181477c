//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod catalog;
mod config;
mod document;
mod field;
mod template;

pub use catalog::{FieldCatalog, FieldCategory, FieldDefinition};
pub use config::{ConfigPatch, FieldSpacing, FormConfig, SubmitMethod, SubmitType, Theme};
pub use document::{CommandOutcome, FormCommand, FormDocument};
pub use field::{
    FieldPatch, FieldSeed, FieldType, FormField, SelectOption, ValidationKind, ValidationRule,
    ValidationValue, submission_key_from_label,
};
pub use template::FormTemplate;
