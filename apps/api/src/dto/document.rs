use formsmith_application::AppliedCommand;
use formsmith_domain::{
    FormConfig, FormDocument, FormField, SelectOption, ValidationRule, ValidationValue,
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// API representation of the whole document.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/form-document-response.ts"
)]
pub struct FormDocumentResponse {
    pub fields: Vec<FormFieldResponse>,
    pub config: FormConfigResponse,
    pub selected_field_id: Option<String>,
}

/// Snapshot returned by every mutating endpoint.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/form-command-response.ts"
)]
pub struct FormCommandResponse {
    /// `false` when the command referenced something that does not exist.
    pub changed: bool,
    pub created_field_id: Option<String>,
    pub document: FormDocumentResponse,
}

/// API representation of one field.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/form-field-response.ts"
)]
pub struct FormFieldResponse {
    pub id: String,
    pub field_type: String,
    pub label: String,
    pub name: String,
    pub placeholder: Option<String>,
    pub instructions: Option<String>,
    pub default_value: Option<String>,
    pub validation: Vec<ValidationRuleDto>,
    pub options: Vec<SelectOptionDto>,
    pub accept: Option<String>,
    pub include_address2: bool,
    pub include_country: bool,
}

/// API representation of form settings.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/form-config-response.ts"
)]
pub struct FormConfigResponse {
    pub action: String,
    pub method: String,
    pub submit_type: String,
    pub success_message: String,
    pub theme: String,
    pub submit_button_text: String,
    pub dark_mode: bool,
    pub field_spacing: String,
}

/// Validation rule payload, used both ways.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/validation-rule-dto.ts"
)]
pub struct ValidationRuleDto {
    pub kind: String,
    pub value: Option<ValidationValueDto>,
    pub message: Option<String>,
}

/// Rule argument: a number, a string or a string list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/validation-value-dto.ts"
)]
pub enum ValidationValueDto {
    Number(f64),
    Text(String),
    List(Vec<String>),
}

/// Select or radio option payload, used both ways.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/select-option-dto.ts"
)]
pub struct SelectOptionDto {
    pub label: String,
    pub value: String,
}

impl From<&FormDocument> for FormDocumentResponse {
    fn from(value: &FormDocument) -> Self {
        Self {
            fields: value.fields().iter().map(FormFieldResponse::from).collect(),
            config: FormConfigResponse::from(value.config()),
            selected_field_id: value.selected_field_id().map(|field_id| field_id.to_string()),
        }
    }
}

impl From<AppliedCommand> for FormCommandResponse {
    fn from(value: AppliedCommand) -> Self {
        Self {
            changed: value.outcome.changed,
            created_field_id: value
                .outcome
                .created_field_id
                .map(|field_id| field_id.to_string()),
            document: FormDocumentResponse::from(&value.document),
        }
    }
}

impl From<&FormField> for FormFieldResponse {
    fn from(value: &FormField) -> Self {
        Self {
            id: value.id().to_string(),
            field_type: value.field_type().as_str().to_owned(),
            label: value.label().to_owned(),
            name: value.name().to_owned(),
            placeholder: value.placeholder().map(ToOwned::to_owned),
            instructions: value.instructions().map(ToOwned::to_owned),
            default_value: value.default_value().map(ToOwned::to_owned),
            validation: value.validation().iter().map(ValidationRuleDto::from).collect(),
            options: value.options().iter().map(SelectOptionDto::from).collect(),
            accept: value.accept().map(ToOwned::to_owned),
            include_address2: value.includes_address2(),
            include_country: value.includes_country(),
        }
    }
}

impl From<&FormConfig> for FormConfigResponse {
    fn from(value: &FormConfig) -> Self {
        Self {
            action: value.action.clone(),
            method: value.method.as_str().to_owned(),
            submit_type: value.submit_type.as_str().to_owned(),
            success_message: value.success_message.clone(),
            theme: value.theme.as_str().to_owned(),
            submit_button_text: value.submit_button_text.clone(),
            dark_mode: value.dark_mode,
            field_spacing: value.field_spacing.as_str().to_owned(),
        }
    }
}

impl From<&ValidationRule> for ValidationRuleDto {
    fn from(value: &ValidationRule) -> Self {
        Self {
            kind: value.kind.as_str().to_owned(),
            value: value.value.clone().map(ValidationValueDto::from),
            message: value.message.clone(),
        }
    }
}

impl From<ValidationValue> for ValidationValueDto {
    fn from(value: ValidationValue) -> Self {
        match value {
            ValidationValue::Number(number) => Self::Number(number),
            ValidationValue::Text(text) => Self::Text(text),
            ValidationValue::List(items) => Self::List(items),
        }
    }
}

impl From<ValidationValueDto> for ValidationValue {
    fn from(value: ValidationValueDto) -> Self {
        match value {
            ValidationValueDto::Number(number) => Self::Number(number),
            ValidationValueDto::Text(text) => Self::Text(text),
            ValidationValueDto::List(items) => Self::List(items),
        }
    }
}

impl From<&SelectOption> for SelectOptionDto {
    fn from(value: &SelectOption) -> Self {
        Self {
            label: value.label.clone(),
            value: value.value.clone(),
        }
    }
}

impl From<SelectOptionDto> for SelectOption {
    fn from(value: SelectOptionDto) -> Self {
        Self::new(value.label, value.value)
    }
}
