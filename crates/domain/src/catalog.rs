use std::str::FromStr;

use formsmith_core::AppError;
use serde::Serialize;

use crate::field::FieldType;

/// Palette grouping for field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldCategory {
    /// Everyday inputs.
    Basic,
    /// Specialised and compound inputs.
    Advanced,
}

impl FieldCategory {
    /// Returns the stable wire value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Advanced => "advanced",
        }
    }
}

impl FromStr for FieldCategory {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "basic" => Ok(Self::Basic),
            "advanced" => Ok(Self::Advanced),
            _ => Err(AppError::Validation(format!(
                "unknown field category '{value}'"
            ))),
        }
    }
}

/// Catalog entry describing one field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDefinition {
    /// Described field type.
    pub field_type: FieldType,
    /// Palette label.
    pub label: &'static str,
    /// Icon key resolved by the palette.
    pub icon: &'static str,
    /// Palette grouping.
    pub category: FieldCategory,
    /// Label given to newly created fields.
    pub default_label: &'static str,
    /// Placeholder given to newly created fields.
    pub default_placeholder: Option<&'static str>,
}

const fn definition(
    field_type: FieldType,
    label: &'static str,
    icon: &'static str,
    category: FieldCategory,
    default_label: &'static str,
    default_placeholder: Option<&'static str>,
) -> FieldDefinition {
    FieldDefinition {
        field_type,
        label,
        icon,
        category,
        default_label,
        default_placeholder,
    }
}

static FIELD_DEFINITIONS: [FieldDefinition; 15] = [
    definition(
        FieldType::Text,
        "Text",
        "Type",
        FieldCategory::Basic,
        "Text Field",
        Some("Enter text..."),
    ),
    definition(
        FieldType::Textarea,
        "Paragraph",
        "AlignLeft",
        FieldCategory::Basic,
        "Message",
        Some("Enter your message..."),
    ),
    definition(
        FieldType::Number,
        "Number",
        "Hash",
        FieldCategory::Basic,
        "Number",
        Some("0"),
    ),
    definition(
        FieldType::Select,
        "Dropdown",
        "ChevronDown",
        FieldCategory::Basic,
        "Select Option",
        None,
    ),
    definition(
        FieldType::Checkbox,
        "Checkbox",
        "CheckSquare",
        FieldCategory::Basic,
        "I agree to the terms",
        None,
    ),
    definition(
        FieldType::Radio,
        "Multi Choice",
        "Circle",
        FieldCategory::Basic,
        "Choose an option",
        None,
    ),
    definition(
        FieldType::Hidden,
        "Hidden",
        "EyeOff",
        FieldCategory::Basic,
        "Hidden Field",
        None,
    ),
    definition(
        FieldType::Email,
        "Email",
        "Mail",
        FieldCategory::Advanced,
        "Email Address",
        Some("you@example.com"),
    ),
    definition(
        FieldType::Phone,
        "Phone",
        "Phone",
        FieldCategory::Advanced,
        "Phone Number",
        Some("(555) 123-4567"),
    ),
    definition(
        FieldType::Date,
        "Date",
        "Calendar",
        FieldCategory::Advanced,
        "Date",
        None,
    ),
    definition(
        FieldType::Url,
        "URL",
        "Link",
        FieldCategory::Advanced,
        "Website",
        Some("https://example.com"),
    ),
    definition(
        FieldType::File,
        "File Upload",
        "Upload",
        FieldCategory::Advanced,
        "Upload File",
        None,
    ),
    definition(
        FieldType::Name,
        "Name",
        "User",
        FieldCategory::Advanced,
        "Full Name",
        Some("John Doe"),
    ),
    definition(
        FieldType::Address,
        "Address",
        "MapPin",
        FieldCategory::Advanced,
        "Address",
        None,
    ),
    definition(
        FieldType::Utm,
        "UTM Params",
        "Link",
        FieldCategory::Advanced,
        "UTM Parameters",
        None,
    ),
];

/// Read-only lookup over the supported field types.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldCatalog;

impl FieldCatalog {
    /// Returns every catalog entry in palette order.
    #[must_use]
    pub fn all() -> &'static [FieldDefinition] {
        &FIELD_DEFINITIONS
    }

    /// Returns the entry for `field_type`.
    #[must_use]
    pub fn lookup(field_type: FieldType) -> Option<&'static FieldDefinition> {
        FIELD_DEFINITIONS
            .iter()
            .find(|definition| definition.field_type == field_type)
    }

    /// Returns the entries of one palette category.
    pub fn by_category(category: FieldCategory) -> impl Iterator<Item = &'static FieldDefinition> {
        FIELD_DEFINITIONS
            .iter()
            .filter(move |definition| definition.category == category)
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldCatalog, FieldCategory};
    use crate::field::FieldType;

    #[test]
    fn every_field_type_has_exactly_one_entry() {
        for field_type in FieldType::ALL {
            let count = FieldCatalog::all()
                .iter()
                .filter(|definition| definition.field_type == field_type)
                .count();
            assert_eq!(count, 1, "{}", field_type.as_str());
        }
    }

    #[test]
    fn categories_split_basic_and_advanced_types() {
        let basic: Vec<_> = FieldCatalog::by_category(FieldCategory::Basic)
            .map(|definition| definition.field_type)
            .collect();
        assert_eq!(
            basic,
            vec![
                FieldType::Text,
                FieldType::Textarea,
                FieldType::Number,
                FieldType::Select,
                FieldType::Checkbox,
                FieldType::Radio,
                FieldType::Hidden,
            ]
        );
        assert_eq!(FieldCatalog::by_category(FieldCategory::Advanced).count(), 8);
    }

    #[test]
    fn lookup_returns_default_placeholder() {
        let email = FieldCatalog::lookup(FieldType::Email);
        assert_eq!(
            email.and_then(|definition| definition.default_placeholder),
            Some("you@example.com")
        );
    }
}
