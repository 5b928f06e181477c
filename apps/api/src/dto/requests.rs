use std::str::FromStr;

use formsmith_core::{AppResult, FieldId};
use formsmith_domain::{
    ConfigPatch, FieldPatch, FieldSpacing, FieldType, SelectOption, SubmitMethod, SubmitType,
    Theme, ValidationKind, ValidationRule,
};
use serde::{Deserialize, Deserializer};
use ts_rs::TS;

use super::document::{SelectOptionDto, ValidationRuleDto};

/// Incoming payload for field creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/add-field-request.ts"
)]
pub struct AddFieldRequest {
    pub field_type: String,
    /// Insertion index. Missing or out-of-range values append.
    #[ts(optional)]
    pub index: Option<usize>,
}

/// Incoming partial field update.
///
/// Absent keys leave the attribute unchanged. For clearable attributes an
/// explicit `null` removes the value.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-field-request.ts"
)]
pub struct UpdateFieldRequest {
    #[ts(optional)]
    pub field_type: Option<String>,
    #[ts(optional)]
    pub label: Option<String>,
    #[ts(optional)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "explicit_null")]
    #[ts(optional)]
    pub placeholder: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit_null")]
    #[ts(optional)]
    pub instructions: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit_null")]
    #[ts(optional)]
    pub default_value: Option<Option<String>>,
    #[ts(optional)]
    pub validation: Option<Vec<ValidationRuleDto>>,
    #[serde(default, deserialize_with = "explicit_null")]
    #[ts(optional)]
    pub options: Option<Option<Vec<SelectOptionDto>>>,
    #[serde(default, deserialize_with = "explicit_null")]
    #[ts(optional)]
    pub accept: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit_null")]
    #[ts(optional)]
    pub include_address2: Option<Option<bool>>,
    #[serde(default, deserialize_with = "explicit_null")]
    #[ts(optional)]
    pub include_country: Option<Option<bool>>,
}

impl UpdateFieldRequest {
    /// Converts the payload into a domain patch, parsing enum strings.
    pub fn into_patch(self) -> AppResult<FieldPatch> {
        let field_type = self
            .field_type
            .as_deref()
            .map(FieldType::from_str)
            .transpose()?;
        let validation = self
            .validation
            .map(|rules| {
                rules
                    .into_iter()
                    .map(ValidationRuleDto::into_rule)
                    .collect::<AppResult<Vec<_>>>()
            })
            .transpose()?;

        Ok(FieldPatch {
            field_type,
            label: self.label,
            name: self.name,
            placeholder: self.placeholder,
            instructions: self.instructions,
            default_value: self.default_value,
            validation,
            options: self.options.map(|options| {
                options.map(|options| options.into_iter().map(SelectOption::from).collect())
            }),
            accept: self.accept,
            include_address2: self.include_address2,
            include_country: self.include_country,
        })
    }
}

impl ValidationRuleDto {
    /// Converts the payload into a domain rule, parsing the kind.
    pub fn into_rule(self) -> AppResult<ValidationRule> {
        let kind = ValidationKind::from_str(self.kind.as_str())?;

        Ok(ValidationRule {
            kind,
            value: self.value.map(Into::into),
            message: self.message,
        })
    }
}

/// Incoming payload for moving one field onto another's position.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/reorder-fields-request.ts"
)]
pub struct ReorderFieldsRequest {
    pub active_id: String,
    pub over_id: String,
}

impl ReorderFieldsRequest {
    /// Parses both field ids.
    pub fn field_ids(&self) -> AppResult<(FieldId, FieldId)> {
        Ok((
            FieldId::parse(self.active_id.as_str())?,
            FieldId::parse(self.over_id.as_str())?,
        ))
    }
}

/// Incoming payload for changing the selection. `null` clears it.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/select-field-request.ts"
)]
pub struct SelectFieldRequest {
    pub field_id: Option<String>,
}

impl SelectFieldRequest {
    /// Parses the selected field id, if any.
    pub fn field_id(&self) -> AppResult<Option<FieldId>> {
        self.field_id.as_deref().map(FieldId::parse).transpose()
    }
}

/// Incoming payload for replacing the document with a template.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/load-template-request.ts"
)]
pub struct LoadTemplateRequest {
    pub template_id: String,
}

/// Incoming partial settings update. Absent keys are left unchanged.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-config-request.ts"
)]
pub struct UpdateConfigRequest {
    #[ts(optional)]
    pub action: Option<String>,
    #[ts(optional)]
    pub method: Option<String>,
    #[ts(optional)]
    pub submit_type: Option<String>,
    #[ts(optional)]
    pub success_message: Option<String>,
    #[ts(optional)]
    pub theme: Option<String>,
    #[ts(optional)]
    pub submit_button_text: Option<String>,
    #[ts(optional)]
    pub dark_mode: Option<bool>,
    #[ts(optional)]
    pub field_spacing: Option<String>,
}

impl UpdateConfigRequest {
    /// Converts the payload into a domain patch, parsing enum strings.
    pub fn into_patch(self) -> AppResult<ConfigPatch> {
        Ok(ConfigPatch {
            action: self.action,
            method: parse_optional::<SubmitMethod>(self.method)?,
            submit_type: parse_optional::<SubmitType>(self.submit_type)?,
            success_message: self.success_message,
            theme: parse_optional::<Theme>(self.theme)?,
            submit_button_text: self.submit_button_text,
            dark_mode: self.dark_mode,
            field_spacing: parse_optional::<FieldSpacing>(self.field_spacing)?,
        })
    }
}

/// Incoming payload for editing one option in place.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-option-request.ts"
)]
pub struct UpdateOptionRequest {
    #[ts(optional)]
    pub label: Option<String>,
    #[ts(optional)]
    pub value: Option<String>,
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent key (`None`).
fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn parse_optional<T>(value: Option<String>) -> AppResult<Option<T>>
where
    T: FromStr<Err = formsmith_core::AppError>,
{
    value.as_deref().map(T::from_str).transpose()
}

#[cfg(test)]
mod tests {
    use formsmith_core::AppError;
    use formsmith_domain::{FieldSpacing, FieldType, SubmitMethod, ValidationKind, ValidationValue};

    use super::{SelectFieldRequest, UpdateConfigRequest, UpdateFieldRequest};
    use crate::dto::ValidationRuleDto;

    fn update_field(json: &str) -> UpdateFieldRequest {
        serde_json::from_str(json).unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn absent_and_null_are_distinguished() {
        let absent = update_field(r#"{"label":"Email"}"#)
            .into_patch()
            .unwrap_or_default();
        assert_eq!(absent.label.as_deref(), Some("Email"));
        assert_eq!(absent.placeholder, None);

        let cleared = update_field(r#"{"placeholder":null,"options":null}"#)
            .into_patch()
            .unwrap_or_default();
        assert_eq!(cleared.placeholder, Some(None));
        assert_eq!(cleared.options, Some(None));

        let set = update_field(r#"{"placeholder":"you@example.com"}"#)
            .into_patch()
            .unwrap_or_default();
        assert_eq!(set.placeholder, Some(Some("you@example.com".to_owned())));
    }

    #[test]
    fn field_type_and_rules_are_parsed() {
        let patch = update_field(
            r#"{"field_type":"email","validation":[{"kind":"minLength","value":3},{"kind":"blocklist","value":["a","b"]}]}"#,
        )
        .into_patch()
        .unwrap_or_default();

        assert_eq!(patch.field_type, Some(FieldType::Email));
        let Some(rules) = patch.validation else {
            panic!("validation must be set");
        };
        assert_eq!(rules[0].kind, ValidationKind::MinLength);
        assert_eq!(rules[0].value, Some(ValidationValue::Number(3.0)));
        assert_eq!(
            rules[1].value,
            Some(ValidationValue::List(vec!["a".to_owned(), "b".to_owned()]))
        );
    }

    #[test]
    fn unknown_enum_strings_are_validation_errors() {
        let result = update_field(r#"{"field_type":"slider"}"#).into_patch();
        assert!(matches!(result, Err(AppError::Validation(_))));

        let result = UpdateConfigRequest {
            theme: Some("neon".to_owned()),
            ..UpdateConfigRequest::default()
        }
        .into_patch();
        assert!(matches!(result, Err(AppError::Validation(_))));

        let rule = ValidationRuleDto {
            kind: "length".to_owned(),
            value: None,
            message: None,
        };
        assert!(matches!(rule.into_rule(), Err(AppError::Validation(_))));
    }

    #[test]
    fn config_patch_parses_wire_names() {
        let patch = UpdateConfigRequest {
            method: Some("GET".to_owned()),
            field_spacing: Some("tight".to_owned()),
            ..UpdateConfigRequest::default()
        }
        .into_patch()
        .unwrap_or_default();

        assert_eq!(patch.method, Some(SubmitMethod::Get));
        assert_eq!(patch.field_spacing, Some(FieldSpacing::Tight));
        assert_eq!(patch.theme, None);
    }

    #[test]
    fn selection_ids_must_be_well_formed() {
        let request = SelectFieldRequest {
            field_id: Some("nope".to_owned()),
        };
        assert!(matches!(request.field_id(), Err(AppError::Validation(_))));

        let request = SelectFieldRequest { field_id: None };
        assert!(matches!(request.field_id(), Ok(None)));
    }
}
