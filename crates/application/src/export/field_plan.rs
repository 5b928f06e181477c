use std::collections::HashSet;

use formsmith_domain::{FieldType, FormConfig, FormField, SelectOption, ValidationKind};

use super::escape::regex_literal;
use super::styles::{self, StyleSheet, join_classes};

/// Query parameters captured by `utm` fields, in emission order.
pub(crate) const UTM_PARAMETERS: [&str; 5] = [
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
];

/// Renders the UTM parameter names as a JavaScript array literal.
pub(crate) fn utm_parameter_list() -> String {
    let quoted: Vec<String> = UTM_PARAMETERS
        .iter()
        .map(|parameter| format!("'{parameter}'"))
        .collect();
    format!("[{}]", quoted.join(", "))
}

/// Target-agnostic projection of a whole document.
#[derive(Debug, Clone)]
pub(crate) struct FormPlan {
    pub styles: StyleSheet,
    pub fields: Vec<FieldPlan>,
    pub slots: Vec<StateSlot>,
    pub has_utm: bool,
    pub has_file: bool,
}

impl FormPlan {
    pub(crate) fn build(fields: &[FormField], config: &FormConfig) -> Self {
        let styles = StyleSheet::resolve(config);
        let fields: Vec<FieldPlan> = fields
            .iter()
            .map(|field| FieldPlan::build(field, &styles))
            .collect();
        let slots = StateSlot::collect(&fields);
        let has_utm = fields
            .iter()
            .any(|field| matches!(field.layout, FieldLayout::Utm(_)));
        let has_file = fields
            .iter()
            .flat_map(FieldPlan::controls)
            .any(|control| matches!(control.kind, ControlKind::File(_)));

        Self {
            styles,
            fields,
            slots,
            has_utm,
            has_file,
        }
    }
}

/// Semantics of one field shared by every emitter.
#[derive(Debug, Clone)]
pub(crate) struct FieldPlan {
    /// Field submission key as entered by the user.
    pub name: String,
    pub label: String,
    pub required: bool,
    pub instructions: Option<String>,
    pub layout: FieldLayout,
}

/// Rendering block shape.
#[derive(Debug, Clone)]
pub(crate) enum FieldLayout {
    /// Label above one control.
    Stacked(Control),
    /// Control followed by an inline label.
    Inline(Control),
    /// Fieldset with a legend and one radio per option.
    Choice(Vec<ChoiceOption>),
    /// Bare hidden input.
    Hidden(Control),
    /// First/last name pair in a two-column grid.
    Name(Vec<Control>),
    Address(AddressPlan),
    /// Hidden UTM inputs.
    Utm(Vec<Control>),
}

#[derive(Debug, Clone)]
pub(crate) struct ChoiceOption {
    pub control: Control,
    pub label: String,
}

#[derive(Debug, Clone)]
pub(crate) struct AddressPlan {
    pub street: Control,
    pub street2: Option<Control>,
    /// City, state and ZIP in a six-column grid.
    pub region: Vec<Control>,
    pub country: Option<Control>,
}

/// One native input element.
#[derive(Debug, Clone)]
pub(crate) struct Control {
    pub kind: ControlKind,
    pub dom_id: Option<String>,
    /// Submission key.
    pub key: String,
    pub placeholder: Option<String>,
    pub class: String,
    pub required: bool,
    pub constraints: Vec<Constraint>,
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ControlKind {
    /// `<input>` with the given `type`.
    Input(&'static str),
    Textarea,
    Select(Vec<SelectOption>),
    Checkbox,
    /// Radio input carrying the option value.
    Radio(String),
    /// File input carrying the accepted media types.
    File(String),
    Hidden,
}

/// Native constraint attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Constraint {
    pub attribute: ConstraintAttribute,
    pub value: String,
    pub numeric: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConstraintAttribute {
    MinLength,
    MaxLength,
    Min,
    Max,
    Pattern,
}

impl ConstraintAttribute {
    /// Attribute name in markup and component templates.
    pub(crate) fn markup_name(self) -> &'static str {
        match self {
            Self::MinLength => "minlength",
            Self::MaxLength => "maxlength",
            Self::Min => "min",
            Self::Max => "max",
            Self::Pattern => "pattern",
        }
    }

    /// Attribute name as a JSX prop.
    pub(crate) fn prop_name(self) -> &'static str {
        match self {
            Self::MinLength => "minLength",
            Self::MaxLength => "maxLength",
            Self::Min => "min",
            Self::Max => "max",
            Self::Pattern => "pattern",
        }
    }
}

/// Reactive state slot keyed by submission key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StateSlot {
    pub key: String,
    pub seed: SlotSeed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SlotSeed {
    Text(String),
    /// File slots start empty.
    Null,
}

impl StateSlot {
    /// Collects one slot per distinct submission key, in document order.
    fn collect(fields: &[FieldPlan]) -> Vec<Self> {
        let mut seen = HashSet::new();
        fields
            .iter()
            .flat_map(FieldPlan::controls)
            .filter(|control| seen.insert(control.key.as_str()))
            .map(|control| Self {
                key: control.key.clone(),
                seed: match control.kind {
                    ControlKind::File(_) => SlotSeed::Null,
                    _ => SlotSeed::Text(control.default_value.clone().unwrap_or_default()),
                },
            })
            .collect()
    }
}

impl Control {
    fn new(kind: ControlKind, key: impl Into<String>) -> Self {
        Self {
            kind,
            dom_id: None,
            key: key.into(),
            placeholder: None,
            class: String::new(),
            required: false,
            constraints: Vec::new(),
            default_value: None,
        }
    }

    fn with_id(mut self, dom_id: impl Into<String>) -> Self {
        self.dom_id = Some(dom_id.into());
        self
    }

    fn with_placeholder(mut self, placeholder: Option<&str>) -> Self {
        self.placeholder = placeholder.map(ToOwned::to_owned);
        self
    }

    fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    fn with_constraints(mut self, constraints: Vec<Constraint>) -> Self {
        self.constraints = constraints;
        self
    }

    fn with_default(mut self, default_value: Option<&str>) -> Self {
        self.default_value = default_value.map(ToOwned::to_owned);
        self
    }
}

impl FieldPlan {
    fn build(field: &FormField, styles: &StyleSheet) -> Self {
        let name = field.name();
        let required = field.is_required();
        let layout = match field.field_type() {
            FieldType::Text => FieldLayout::Stacked(text_control(field, "text", styles)),
            FieldType::Email => FieldLayout::Stacked(text_control(field, "email", styles)),
            FieldType::Url => FieldLayout::Stacked(text_control(field, "url", styles)),
            FieldType::Phone => FieldLayout::Stacked(text_control(field, "tel", styles)),
            FieldType::Number => FieldLayout::Stacked(text_control(field, "number", styles)),
            FieldType::Textarea => FieldLayout::Stacked(
                Control::new(ControlKind::Textarea, name)
                    .with_id(name)
                    .with_placeholder(Some(field.placeholder().unwrap_or_default()))
                    .with_class(styles.input.as_str())
                    .with_required(required)
                    .with_constraints(constraints(field))
                    .with_default(field.default_value()),
            ),
            FieldType::Date => FieldLayout::Stacked(
                Control::new(ControlKind::Input("date"), name)
                    .with_id(name)
                    .with_class(styles.input.as_str())
                    .with_required(required)
                    .with_default(field.default_value()),
            ),
            FieldType::Select => FieldLayout::Stacked(
                Control::new(ControlKind::Select(field.options().to_vec()), name)
                    .with_id(name)
                    .with_class(styles.input.as_str())
                    .with_required(required)
                    .with_default(field.default_value()),
            ),
            FieldType::File => FieldLayout::Stacked(
                Control::new(
                    ControlKind::File(field.accept().unwrap_or("*/*").to_owned()),
                    name,
                )
                .with_id(name)
                .with_class(join_classes(&[styles.input.as_str(), styles::FILE_BUTTON]))
                .with_required(required),
            ),
            FieldType::Checkbox => FieldLayout::Inline(
                Control::new(ControlKind::Checkbox, name)
                    .with_id(name)
                    .with_class(styles::CHECKBOX)
                    .with_required(required)
                    .with_default(field.default_value()),
            ),
            FieldType::Radio => FieldLayout::Choice(
                field
                    .options()
                    .iter()
                    .map(|option| ChoiceOption {
                        control: Control::new(ControlKind::Radio(option.value.clone()), name)
                            .with_id(format!("{name}-{}", option.value))
                            .with_class(styles::RADIO)
                            .with_required(required)
                            .with_default(field.default_value()),
                        label: option.label.clone(),
                    })
                    .collect(),
            ),
            FieldType::Hidden => FieldLayout::Hidden(
                Control::new(ControlKind::Hidden, name)
                    .with_default(Some(field.default_value().unwrap_or_default())),
            ),
            FieldType::Name => FieldLayout::Name(vec![
                sub_control(name, "first", "First name", styles.input.as_str(), required),
                sub_control(name, "last", "Last name", styles.input.as_str(), required),
            ]),
            FieldType::Address => FieldLayout::Address(address_plan(field, styles)),
            FieldType::Utm => FieldLayout::Utm(
                UTM_PARAMETERS
                    .iter()
                    .map(|parameter| Control::new(ControlKind::Hidden, *parameter))
                    .collect(),
            ),
        };

        Self {
            name: name.to_owned(),
            label: field.label().to_owned(),
            required,
            instructions: field
                .instructions()
                .filter(|instructions| !instructions.is_empty())
                .map(ToOwned::to_owned),
            layout,
        }
    }

    /// Returns every control in document order.
    pub(crate) fn controls(&self) -> Vec<&Control> {
        match &self.layout {
            FieldLayout::Stacked(control)
            | FieldLayout::Inline(control)
            | FieldLayout::Hidden(control) => vec![control],
            FieldLayout::Choice(options) => options.iter().map(|option| &option.control).collect(),
            FieldLayout::Name(controls) | FieldLayout::Utm(controls) => controls.iter().collect(),
            FieldLayout::Address(address) => std::iter::once(&address.street)
                .chain(address.street2.as_ref())
                .chain(address.region.iter())
                .chain(address.country.as_ref())
                .collect(),
        }
    }

    /// Returns the DOM id the visible label points at.
    pub(crate) fn label_target(&self) -> Option<&str> {
        match &self.layout {
            FieldLayout::Stacked(control) | FieldLayout::Inline(control) => {
                control.dom_id.as_deref()
            }
            FieldLayout::Name(controls) => controls
                .first()
                .and_then(|control| control.dom_id.as_deref()),
            FieldLayout::Address(address) => address.street.dom_id.as_deref(),
            FieldLayout::Choice(_) | FieldLayout::Hidden(_) | FieldLayout::Utm(_) => None,
        }
    }
}

fn text_control(field: &FormField, input_type: &'static str, styles: &StyleSheet) -> Control {
    Control::new(ControlKind::Input(input_type), field.name())
        .with_id(field.name())
        .with_placeholder(Some(field.placeholder().unwrap_or_default()))
        .with_class(styles.input.as_str())
        .with_required(field.is_required())
        .with_constraints(constraints(field))
        .with_default(field.default_value())
}

fn sub_control(name: &str, suffix: &str, placeholder: &str, class: &str, required: bool) -> Control {
    Control::new(ControlKind::Input("text"), format!("{name}_{suffix}"))
        .with_id(format!("{name}-{suffix}"))
        .with_placeholder(Some(placeholder))
        .with_class(class)
        .with_required(required)
}

fn address_plan(field: &FormField, styles: &StyleSheet) -> AddressPlan {
    let name = field.name();
    let required = field.is_required();
    let input = styles.input.as_str();
    let cell = join_classes(&[input, styles::GRID_CELL]);

    AddressPlan {
        street: sub_control(name, "street", "Street address", input, required),
        street2: field.includes_address2().then(|| {
            sub_control(
                name,
                "street2",
                "Apartment, suite, etc. (optional)",
                input,
                false,
            )
        }),
        region: [("city", "City"), ("state", "State"), ("zip", "ZIP")]
            .into_iter()
            .map(|(suffix, placeholder)| {
                sub_control(name, suffix, placeholder, cell.as_str(), required)
            })
            .collect(),
        country: field
            .includes_country()
            .then(|| sub_control(name, "country", "Country", input, required)),
    }
}

fn constraints(field: &FormField) -> Vec<Constraint> {
    let mut constraints: Vec<Constraint> = [
        (ValidationKind::MinLength, ConstraintAttribute::MinLength),
        (ValidationKind::MaxLength, ConstraintAttribute::MaxLength),
        (ValidationKind::Min, ConstraintAttribute::Min),
        (ValidationKind::Max, ConstraintAttribute::Max),
    ]
    .into_iter()
    .filter_map(|(kind, attribute)| {
        let value = field.rule(kind)?.value.as_ref()?;
        match value.as_number() {
            Some(number) => Some(Constraint {
                attribute,
                value: number.to_string(),
                numeric: true,
            }),
            None => value.as_scalar().map(|text| Constraint {
                attribute,
                value: text,
                numeric: false,
            }),
        }
    })
    .collect();

    if let Some(pattern) = combined_pattern(field) {
        constraints.push(Constraint {
            attribute: ConstraintAttribute::Pattern,
            value: pattern,
            numeric: false,
        });
    }

    constraints
}

/// Merges `pattern` and `corporateDomain` into one pattern attribute.
///
/// Blocklists are enforced server-side and never projected.
fn combined_pattern(field: &FormField) -> Option<String> {
    let rule_text = |kind| {
        field
            .rule(kind)
            .and_then(|rule| rule.value.as_ref())
            .and_then(|value| value.as_scalar())
            .filter(|text| !text.is_empty())
    };
    let pattern = rule_text(ValidationKind::Pattern);
    let domain = rule_text(ValidationKind::CorporateDomain)
        .map(|domain| format!(".*{}$", regex_literal(domain.as_str())));

    match (pattern, domain) {
        (Some(pattern), Some(domain)) => Some(format!("(?={domain})(?:{pattern})")),
        (pattern, domain) => pattern.or(domain),
    }
}
