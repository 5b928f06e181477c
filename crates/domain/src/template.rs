use std::sync::LazyLock;

use serde::Serialize;

use crate::field::{FieldSeed, FieldType, SelectOption, ValidationRule};

/// Named, read-only set of field definitions used to seed a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormTemplate {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    fields: Vec<FieldSeed>,
}

impl FormTemplate {
    /// Returns every built-in template.
    #[must_use]
    pub fn catalog() -> &'static [FormTemplate] {
        TEMPLATES.as_slice()
    }

    /// Finds a built-in template by id.
    #[must_use]
    pub fn find(id: &str) -> Option<&'static FormTemplate> {
        TEMPLATES.iter().find(|template| template.id == id)
    }

    /// Returns the template id.
    #[must_use]
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Returns field data in display order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSeed] {
        &self.fields
    }
}

fn required(message: &str) -> ValidationRule {
    ValidationRule::required().with_message(message)
}

fn options(pairs: &[(&str, &str)]) -> Vec<SelectOption> {
    pairs
        .iter()
        .map(|(label, value)| SelectOption::new(*label, *value))
        .collect()
}

static TEMPLATES: LazyLock<Vec<FormTemplate>> = LazyLock::new(|| {
    vec![
        FormTemplate {
            id: "blank",
            name: "Blank Form",
            description: "Start from scratch with an empty form",
            fields: Vec::new(),
        },
        FormTemplate {
            id: "contact",
            name: "Contact Form",
            description: "A simple contact form with name, email, and message",
            fields: vec![
                FieldSeed::new(FieldType::Name, "Your Name", "name")
                    .with_placeholder("John Doe")
                    .with_rule(required("Name is required")),
                FieldSeed::new(FieldType::Email, "Email Address", "email")
                    .with_placeholder("you@example.com")
                    .with_rule(required("Email is required")),
                FieldSeed::new(FieldType::Textarea, "Message", "message")
                    .with_placeholder("How can we help you?")
                    .with_rule(required("Message is required")),
            ],
        },
        FormTemplate {
            id: "mailing-list",
            name: "Mailing List",
            description: "Collect email addresses for your newsletter",
            fields: vec![
                FieldSeed::new(FieldType::Text, "First Name", "firstName").with_placeholder("John"),
                FieldSeed::new(FieldType::Email, "Email Address", "email")
                    .with_placeholder("you@example.com")
                    .with_rule(required("Email is required")),
            ],
        },
        FormTemplate {
            id: "survey",
            name: "Survey",
            description: "Gather feedback with multiple choice questions",
            fields: vec![
                FieldSeed::new(FieldType::Radio, "How did you hear about us?", "referral")
                    .with_rule(required("Please select an option"))
                    .with_options(options(&[
                        ("Search Engine", "search"),
                        ("Social Media", "social"),
                        ("Friend or Colleague", "friend"),
                        ("Other", "other"),
                    ])),
                FieldSeed::new(
                    FieldType::Select,
                    "How would you rate your experience?",
                    "rating",
                )
                .with_rule(required("Please select a rating"))
                .with_options(options(&[
                    ("Excellent", "5"),
                    ("Good", "4"),
                    ("Average", "3"),
                    ("Below Average", "2"),
                    ("Poor", "1"),
                ])),
                FieldSeed::new(FieldType::Textarea, "Additional Comments", "comments")
                    .with_placeholder("Share your thoughts..."),
            ],
        },
        FormTemplate {
            id: "registration",
            name: "Registration Form",
            description: "User registration with name, email, and phone",
            fields: vec![
                FieldSeed::new(FieldType::Name, "Full Name", "fullName")
                    .with_rule(required("Name is required")),
                FieldSeed::new(FieldType::Email, "Email Address", "email")
                    .with_placeholder("you@example.com")
                    .with_rule(required("Email is required")),
                FieldSeed::new(FieldType::Phone, "Phone Number", "phone")
                    .with_placeholder("(555) 123-4567"),
                FieldSeed::new(
                    FieldType::Checkbox,
                    "I agree to the terms and conditions",
                    "terms",
                )
                .with_rule(required("You must agree to the terms")),
            ],
        },
        FormTemplate {
            id: "feedback",
            name: "Feedback Form",
            description: "Collect product or service feedback",
            fields: vec![
                FieldSeed::new(FieldType::Email, "Your Email (optional)", "email")
                    .with_placeholder("you@example.com"),
                FieldSeed::new(
                    FieldType::Select,
                    "What are you providing feedback about?",
                    "topic",
                )
                .with_rule(required("Please select a topic"))
                .with_options(options(&[
                    ("Product", "product"),
                    ("Service", "service"),
                    ("Website", "website"),
                    ("Support", "support"),
                    ("Other", "other"),
                ])),
                FieldSeed::new(FieldType::Textarea, "Your Feedback", "feedback")
                    .with_placeholder("Tell us what you think...")
                    .with_rule(required("Please provide your feedback")),
            ],
        },
    ]
});

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::FormTemplate;
    use crate::field::FieldType;

    #[test]
    fn template_ids_are_unique() {
        let ids: HashSet<_> = FormTemplate::catalog()
            .iter()
            .map(FormTemplate::id)
            .collect();
        assert_eq!(ids.len(), FormTemplate::catalog().len());
    }

    #[test]
    fn choice_fields_in_templates_have_options() {
        for template in FormTemplate::catalog() {
            for field in template.fields() {
                if field.field_type.has_options() {
                    assert!(
                        field.options.as_ref().is_some_and(|options| !options.is_empty()),
                        "{}::{}",
                        template.id(),
                        field.name
                    );
                }
            }
        }
    }

    #[test]
    fn find_returns_named_template() {
        let survey = FormTemplate::find("survey");
        assert_eq!(survey.map(FormTemplate::name), Some("Survey"));
        assert_eq!(
            survey.map(|template| template.fields()[1].field_type),
            Some(FieldType::Select)
        );
        assert!(FormTemplate::find("unknown").is_none());
    }
}
