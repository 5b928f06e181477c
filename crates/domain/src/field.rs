use std::str::FromStr;

use formsmith_core::{AppError, FieldId};
use serde::{Deserialize, Serialize};

use crate::catalog::FieldCatalog;

/// Supported form field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Single-line text input.
    Text,
    /// Multi-line text input.
    Textarea,
    /// Numeric input.
    Number,
    /// Dropdown with options.
    Select,
    /// Single checkbox.
    Checkbox,
    /// Radio group with options.
    Radio,
    /// Hidden input with a static value.
    Hidden,
    /// Email address input.
    Email,
    /// Telephone number input.
    Phone,
    /// Date picker input.
    Date,
    /// URL input.
    Url,
    /// File upload input.
    File,
    /// Compound first/last name input.
    Name,
    /// Compound postal address input.
    Address,
    /// Hidden UTM campaign parameters.
    Utm,
}

impl FieldType {
    /// Every field type in catalog order.
    pub const ALL: [Self; 15] = [
        Self::Text,
        Self::Textarea,
        Self::Number,
        Self::Select,
        Self::Checkbox,
        Self::Radio,
        Self::Hidden,
        Self::Email,
        Self::Phone,
        Self::Date,
        Self::Url,
        Self::File,
        Self::Name,
        Self::Address,
        Self::Utm,
    ];

    /// Returns the stable wire value for the field type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Number => "number",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Hidden => "hidden",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Date => "date",
            Self::Url => "url",
            Self::File => "file",
            Self::Name => "name",
            Self::Address => "address",
            Self::Utm => "utm",
        }
    }

    /// Returns whether the type carries a list of select options.
    #[must_use]
    pub fn has_options(&self) -> bool {
        matches!(self, Self::Select | Self::Radio)
    }

    /// Returns whether the type expands into several sub-inputs at generation time.
    #[must_use]
    pub fn is_compound(&self) -> bool {
        matches!(self, Self::Name | Self::Address | Self::Utm)
    }
}

impl FromStr for FieldType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field_type| field_type.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown field type '{value}'")))
    }
}

/// Kinds of validation rules a field can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationKind {
    /// Value must be present.
    Required,
    /// Minimum string length.
    MinLength,
    /// Maximum string length.
    MaxLength,
    /// Minimum numeric value.
    Min,
    /// Maximum numeric value.
    Max,
    /// Regular expression the value must match.
    Pattern,
    /// Values rejected server-side.
    Blocklist,
    /// Email must belong to the given domain.
    CorporateDomain,
    /// Accepted upload media types.
    Accept,
}

impl ValidationKind {
    /// Every validation kind.
    pub const ALL: [Self; 9] = [
        Self::Required,
        Self::MinLength,
        Self::MaxLength,
        Self::Min,
        Self::Max,
        Self::Pattern,
        Self::Blocklist,
        Self::CorporateDomain,
        Self::Accept,
    ];

    /// Returns the stable wire value for the rule kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::MinLength => "minLength",
            Self::MaxLength => "maxLength",
            Self::Min => "min",
            Self::Max => "max",
            Self::Pattern => "pattern",
            Self::Blocklist => "blocklist",
            Self::CorporateDomain => "corporateDomain",
            Self::Accept => "accept",
        }
    }
}

impl FromStr for ValidationKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown validation rule '{value}'")))
    }
}

/// Value attached to a validation rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValidationValue {
    /// Numeric bound.
    Number(f64),
    /// Pattern, domain or media type string.
    Text(String),
    /// Blocklisted values.
    List(Vec<String>),
}

impl ValidationValue {
    /// Renders the value as a single attribute value.
    ///
    /// Lists and non-finite numbers have no scalar form.
    #[must_use]
    pub fn as_scalar(&self) -> Option<String> {
        match self {
            Self::Number(value) if value.is_finite() => Some(value.to_string()),
            Self::Number(_) | Self::List(_) => None,
            Self::Text(value) => Some(value.clone()),
        }
    }

    /// Returns the value as a number when it is numeric or numeric text.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => value.is_finite().then_some(*value),
            Self::Text(value) => value.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            Self::List(_) => None,
        }
    }
}

/// A single validation rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
    /// Rule kind.
    #[serde(rename = "type")]
    pub kind: ValidationKind,
    /// Optional rule value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ValidationValue>,
    /// Optional human-readable failure message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationRule {
    /// Creates a rule without value or message.
    #[must_use]
    pub fn new(kind: ValidationKind) -> Self {
        Self {
            kind,
            value: None,
            message: None,
        }
    }

    /// Returns a `required` rule.
    #[must_use]
    pub fn required() -> Self {
        Self::new(ValidationKind::Required)
    }

    /// Sets the rule value.
    #[must_use]
    pub fn with_value(mut self, value: ValidationValue) -> Self {
        self.value = Some(value);
        self
    }

    /// Sets the failure message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Label/value pair shown by select and radio fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Display text.
    pub label: String,
    /// Submitted value.
    pub value: String,
}

impl SelectOption {
    /// Creates an option.
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Field data without an identity, used by templates and duplication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSeed {
    /// Field type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Visible label.
    pub label: String,
    /// Submission key.
    pub name: String,
    /// Input placeholder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Help text below the input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Initial value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Validation rules.
    #[serde(default)]
    pub validation: Vec<ValidationRule>,
    /// Options for select and radio fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,
    /// Accepted media types for file fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept: Option<String>,
    /// Address: render the second street line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_address2: Option<bool>,
    /// Address: render the country input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_country: Option<bool>,
}

impl FieldSeed {
    /// Creates seed data with only the mandatory attributes set.
    #[must_use]
    pub fn new(field_type: FieldType, label: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            field_type,
            label: label.into(),
            name: name.into(),
            placeholder: None,
            instructions: None,
            default_value: None,
            validation: Vec::new(),
            options: None,
            accept: None,
            include_address2: None,
            include_country: None,
        }
    }

    /// Sets the placeholder.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Appends a validation rule.
    #[must_use]
    pub fn with_rule(mut self, rule: ValidationRule) -> Self {
        self.validation.push(rule);
        self
    }

    /// Sets the option list.
    #[must_use]
    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = Some(options);
        self
    }
}

/// Partial update for a field. `None` leaves an attribute unchanged.
///
/// Clearable attributes are doubly optional: `Some(None)` clears them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldPatch {
    /// New field type, applied verbatim without migrating type-specific data.
    pub field_type: Option<FieldType>,
    /// New label.
    pub label: Option<String>,
    /// New submission key.
    pub name: Option<String>,
    /// New placeholder.
    pub placeholder: Option<Option<String>>,
    /// New help text.
    pub instructions: Option<Option<String>>,
    /// New initial value.
    pub default_value: Option<Option<String>>,
    /// Replacement rule list.
    pub validation: Option<Vec<ValidationRule>>,
    /// Replacement option list.
    pub options: Option<Option<Vec<SelectOption>>>,
    /// New accepted media types.
    pub accept: Option<Option<String>>,
    /// New second-street-line flag.
    pub include_address2: Option<Option<bool>>,
    /// New country flag.
    pub include_country: Option<Option<bool>>,
}

impl FieldPatch {
    /// Returns whether the patch carries no updates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// One form input specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    id: FieldId,
    #[serde(rename = "type")]
    field_type: FieldType,
    label: String,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_value: Option<String>,
    #[serde(default)]
    validation: Vec<ValidationRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<Vec<SelectOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    accept: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    include_address2: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    include_country: Option<bool>,
}

impl FormField {
    /// Builds a field with catalog defaults for `field_type` and a fresh id.
    ///
    /// The submission key is the default label lower-cased with whitespace
    /// runs collapsed to `_`. Select and radio fields get three options, file
    /// fields accept `*/*`, and address fields enable both optional parts.
    #[must_use]
    pub fn with_defaults(field_type: FieldType) -> Self {
        let definition = FieldCatalog::lookup(field_type);
        let label = definition
            .map(|definition| definition.default_label.to_owned())
            .unwrap_or_else(|| field_type.as_str().to_owned());
        let name = definition
            .map(|definition| submission_key_from_label(definition.default_label))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| field_type.as_str().to_owned());

        let mut seed = FieldSeed::new(field_type, label, name);
        seed.placeholder = definition
            .and_then(|definition| definition.default_placeholder)
            .map(ToOwned::to_owned);

        match field_type {
            FieldType::Select | FieldType::Radio => {
                seed.options = Some(
                    (1..=3)
                        .map(|number| {
                            SelectOption::new(format!("Option {number}"), format!("option{number}"))
                        })
                        .collect(),
                );
            }
            FieldType::File => seed.accept = Some("*/*".to_owned()),
            FieldType::Address => {
                seed.include_address2 = Some(true);
                seed.include_country = Some(true);
            }
            _ => {}
        }

        Self::from_seed(FieldId::new(), seed)
    }

    /// Creates a field from seed data and an identity.
    #[must_use]
    pub fn from_seed(id: FieldId, seed: FieldSeed) -> Self {
        Self {
            id,
            field_type: seed.field_type,
            label: seed.label,
            name: seed.name,
            placeholder: seed.placeholder,
            instructions: seed.instructions,
            default_value: seed.default_value,
            validation: seed.validation,
            options: seed.options,
            accept: seed.accept,
            include_address2: seed.include_address2,
            include_country: seed.include_country,
        }
    }

    /// Returns the field data without its identity.
    #[must_use]
    pub fn to_seed(&self) -> FieldSeed {
        FieldSeed {
            field_type: self.field_type,
            label: self.label.clone(),
            name: self.name.clone(),
            placeholder: self.placeholder.clone(),
            instructions: self.instructions.clone(),
            default_value: self.default_value.clone(),
            validation: self.validation.clone(),
            options: self.options.clone(),
            accept: self.accept.clone(),
            include_address2: self.include_address2,
            include_country: self.include_country,
        }
    }

    /// Returns the field identifier.
    #[must_use]
    pub fn id(&self) -> FieldId {
        self.id
    }

    /// Returns the field type.
    #[must_use]
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Returns the visible label.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Returns the submission key.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the placeholder.
    #[must_use]
    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// Returns the help text.
    #[must_use]
    pub fn instructions(&self) -> Option<&str> {
        self.instructions.as_deref()
    }

    /// Returns the initial value.
    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// Returns validation rules in insertion order.
    #[must_use]
    pub fn validation(&self) -> &[ValidationRule] {
        &self.validation
    }

    /// Returns select/radio options, empty when absent.
    #[must_use]
    pub fn options(&self) -> &[SelectOption] {
        self.options.as_deref().unwrap_or_default()
    }

    /// Returns accepted media types for file uploads.
    #[must_use]
    pub fn accept(&self) -> Option<&str> {
        self.accept.as_deref()
    }

    /// Returns whether an address renders its second street line.
    #[must_use]
    pub fn includes_address2(&self) -> bool {
        self.include_address2.unwrap_or(false)
    }

    /// Returns whether an address renders its country input.
    #[must_use]
    pub fn includes_country(&self) -> bool {
        self.include_country.unwrap_or(false)
    }

    /// Returns the first rule of `kind`.
    #[must_use]
    pub fn rule(&self, kind: ValidationKind) -> Option<&ValidationRule> {
        self.validation.iter().find(|rule| rule.kind == kind)
    }

    /// Returns whether the field carries a `required` rule.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.rule(ValidationKind::Required).is_some()
    }

    pub(crate) fn reassign(&mut self, id: FieldId) {
        self.id = id;
    }

    /// Merges a partial update into the field.
    pub fn apply_patch(&mut self, patch: FieldPatch) {
        let FieldPatch {
            field_type,
            label,
            name,
            placeholder,
            instructions,
            default_value,
            validation,
            options,
            accept,
            include_address2,
            include_country,
        } = patch;

        if let Some(field_type) = field_type {
            self.field_type = field_type;
        }
        if let Some(label) = label {
            self.label = label;
        }
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(placeholder) = placeholder {
            self.placeholder = placeholder;
        }
        if let Some(instructions) = instructions {
            self.instructions = instructions;
        }
        if let Some(default_value) = default_value {
            self.default_value = default_value;
        }
        if let Some(validation) = validation {
            self.validation = validation;
        }
        if let Some(options) = options {
            self.options = options;
        }
        if let Some(accept) = accept {
            self.accept = accept;
        }
        if let Some(include_address2) = include_address2 {
            self.include_address2 = include_address2;
        }
        if let Some(include_country) = include_country {
            self.include_country = include_country;
        }
    }

    /// Replaces any rule of the same kind with `rule`.
    pub fn set_rule(&mut self, rule: ValidationRule) {
        self.validation.retain(|existing| existing.kind != rule.kind);
        self.validation.push(rule);
    }

    /// Removes every rule of `kind`. Returns whether a rule was removed.
    pub fn clear_rule(&mut self, kind: ValidationKind) -> bool {
        let before = self.validation.len();
        self.validation.retain(|existing| existing.kind != kind);
        self.validation.len() != before
    }

    /// Adds or removes the `required` rule.
    pub fn set_required(&mut self, required: bool) {
        if required {
            if !self.is_required() {
                self.validation.push(ValidationRule::required());
            }
        } else {
            self.clear_rule(ValidationKind::Required);
        }
    }

    /// Appends `Option N` / `optionN` where N is the new option count.
    pub fn add_option(&mut self) {
        let options = self.options.get_or_insert_with(Vec::new);
        let number = options.len() + 1;
        options.push(SelectOption::new(
            format!("Option {number}"),
            format!("option{number}"),
        ));
    }

    /// Updates the option at `index`. Returns `false` when out of range.
    pub fn update_option(
        &mut self,
        index: usize,
        label: Option<String>,
        value: Option<String>,
    ) -> bool {
        let Some(option) = self
            .options
            .as_mut()
            .and_then(|options| options.get_mut(index))
        else {
            return false;
        };

        if let Some(label) = label {
            option.label = label;
        }
        if let Some(value) = value {
            option.value = value;
        }
        true
    }

    /// Removes the option at `index`. Returns `false` when out of range.
    pub fn remove_option(&mut self, index: usize) -> bool {
        match self.options.as_mut() {
            Some(options) if index < options.len() => {
                options.remove(index);
                true
            }
            _ => false,
        }
    }
}

/// Lower-cases `label` and collapses whitespace runs into a single `_`.
#[must_use]
pub fn submission_key_from_label(label: &str) -> String {
    let mut key = String::with_capacity(label.len());
    let mut in_whitespace = false;
    for character in label.chars() {
        if character.is_whitespace() {
            if !in_whitespace {
                key.push('_');
            }
            in_whitespace = true;
        } else {
            key.extend(character.to_lowercase());
            in_whitespace = false;
        }
    }
    key
}
