use formsmith_application::ExportFormat;
use formsmith_domain::{FieldDefinition, FieldSeed, FormTemplate, ValidationKind};
use serde::Serialize;
use ts_rs::TS;

/// API representation of one palette entry.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/field-definition-response.ts"
)]
pub struct FieldDefinitionResponse {
    pub field_type: String,
    pub label: String,
    pub icon: String,
    pub category: String,
    pub default_label: String,
    pub default_placeholder: Option<String>,
}

impl From<&FieldDefinition> for FieldDefinitionResponse {
    fn from(value: &FieldDefinition) -> Self {
        Self {
            field_type: value.field_type.as_str().to_owned(),
            label: value.label.to_owned(),
            icon: value.icon.to_owned(),
            category: value.category.as_str().to_owned(),
            default_label: value.default_label.to_owned(),
            default_placeholder: value.default_placeholder.map(ToOwned::to_owned),
        }
    }
}

/// API representation of a starter template.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/form-template-response.ts"
)]
pub struct FormTemplateResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub fields: Vec<TemplateFieldResponse>,
}

/// Summary of one field a template creates.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/template-field-response.ts"
)]
pub struct TemplateFieldResponse {
    pub field_type: String,
    pub label: String,
    pub name: String,
    pub required: bool,
}

impl From<&FieldSeed> for TemplateFieldResponse {
    fn from(value: &FieldSeed) -> Self {
        Self {
            field_type: value.field_type.as_str().to_owned(),
            label: value.label.clone(),
            name: value.name.clone(),
            required: value
                .validation
                .iter()
                .any(|rule| rule.kind == ValidationKind::Required),
        }
    }
}

impl From<&FormTemplate> for FormTemplateResponse {
    fn from(value: &FormTemplate) -> Self {
        Self {
            id: value.id().to_owned(),
            name: value.name().to_owned(),
            description: value.description().to_owned(),
            fields: value
                .fields()
                .iter()
                .map(TemplateFieldResponse::from)
                .collect(),
        }
    }
}

/// API representation of a code generation target.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/export-format-response.ts"
)]
pub struct ExportFormatResponse {
    pub id: String,
    pub label: String,
    pub extension: String,
    pub language: String,
    pub file_name: String,
}

impl From<ExportFormat> for ExportFormatResponse {
    fn from(value: ExportFormat) -> Self {
        Self {
            id: value.as_str().to_owned(),
            label: value.label().to_owned(),
            extension: value.extension().to_owned(),
            language: value.language().to_owned(),
            file_name: value.file_name(),
        }
    }
}
