mod catalog;
mod common;
mod document;
mod requests;

pub use catalog::{ExportFormatResponse, FieldDefinitionResponse, FormTemplateResponse};
pub use common::HealthResponse;
pub use document::{FormCommandResponse, FormDocumentResponse, ValidationRuleDto};
pub use requests::{
    AddFieldRequest, LoadTemplateRequest, ReorderFieldsRequest, SelectFieldRequest,
    UpdateConfigRequest, UpdateFieldRequest, UpdateOptionRequest,
};
