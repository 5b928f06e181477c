use formsmith_domain::{FormConfig, SubmitMethod, SubmitType};

use super::escape::{js_property_access, js_property_key, js_string, jsx as escape};
use super::field_plan::{
    Control, ControlKind, FieldLayout, FieldPlan, FormPlan, SlotSeed, utm_parameter_list,
};
use super::request::{FAILURE_ALERT, FetchRequest, PayloadSource};
use super::source_writer::SourceWriter;
use super::styles::{self, StyleSheet, join_classes};

const STATE: &str = "formData";

/// Emits a function component holding every value in one state object
/// keyed by submission key.
pub(crate) fn render(plan: &FormPlan, config: &FormConfig) -> String {
    let ajax = config.submit_type == SubmitType::Ajax;
    let mut out = SourceWriter::new();

    if plan.has_utm {
        out.line(0, "import { useState, useEffect } from 'react';");
    } else {
        out.line(0, "import { useState } from 'react';");
    }
    out.blank();
    out.line(0, "export default function ContactForm() {");
    write_state(&mut out, plan);
    if ajax {
        out.line(1, "const [isSubmitted, setIsSubmitted] = useState(false);");
        out.line(1, "const [isLoading, setIsLoading] = useState(false);");
    }
    if plan.has_utm {
        write_utm_effect(&mut out);
    }
    if ajax {
        write_submit_handler(&mut out, plan, config);
        out.blank();
        out.line(1, "if (isSubmitted) {");
        out.line(2, "return (");
        out.line(3, format!("<div className=\"{}\">", styles::SUCCESS));
        out.line(4, escape(config.success_message.as_str()));
        out.line(3, "</div>");
        out.line(2, ");");
        out.line(1, "}");
    }

    out.blank();
    out.line(1, "return (");
    let mut form_attributes = Vec::new();
    if ajax {
        form_attributes.push("onSubmit={handleSubmit}".to_owned());
    } else {
        form_attributes.push(attribute("action", config.action.as_str()));
        form_attributes.push(attribute("method", config.method.as_str()));
        if plan.has_file && config.method == SubmitMethod::Post {
            form_attributes.push(attribute("encType", "multipart/form-data"));
        }
    }
    form_attributes.push(attribute("className", plan.styles.form));
    out.line(2, format!("<form {}>", form_attributes.join(" ")));

    for field in &plan.fields {
        write_field(&mut out, 3, field, &plan.styles);
        out.blank();
    }

    out.line(3, "<div>");
    if ajax {
        out.line(4, "<button");
        out.line(5, "type=\"submit\"");
        out.line(5, "disabled={isLoading}");
        out.line(
            5,
            attribute(
                "className",
                join_classes(&[plan.styles.button.as_str(), "disabled:opacity-50"]).as_str(),
            ),
        );
        out.line(4, ">");
        out.line(
            5,
            format!(
                "{{isLoading ? 'Submitting...' : {}}}",
                js_string(config.submit_button_text.as_str())
            ),
        );
    } else {
        out.line(
            4,
            format!(
                "<button type=\"submit\"{}>",
                class_attribute(plan.styles.button.as_str())
            ),
        );
        out.line(5, escape(config.submit_button_text.as_str()));
    }
    out.line(4, "</button>");
    out.line(3, "</div>");
    out.line(2, "</form>");
    out.line(1, ");");
    out.line(0, "}");

    out.finish()
}

fn write_state(out: &mut SourceWriter, plan: &FormPlan) {
    if plan.slots.is_empty() {
        out.line(1, format!("const [{STATE}, setFormData] = useState({{}});"));
        return;
    }

    out.line(1, format!("const [{STATE}, setFormData] = useState({{"));
    for slot in &plan.slots {
        let seed = match &slot.seed {
            SlotSeed::Text(text) => js_string(text.as_str()),
            SlotSeed::Null => "null".to_owned(),
        };
        out.line(2, format!("{}: {seed},", js_property_key(slot.key.as_str())));
    }
    out.line(1, "});");
}

fn write_utm_effect(out: &mut SourceWriter) {
    out.blank();
    out.line(1, "// Populate UTM parameters from URL");
    out.line(1, "useEffect(() => {");
    out.line(2, "const params = new URLSearchParams(window.location.search);");
    out.line(2, "const utmValues = {};");
    out.line(2, format!("{}.forEach((param) => {{", utm_parameter_list()));
    out.line(3, "const value = params.get(param);");
    out.line(3, "if (value) utmValues[param] = value;");
    out.line(2, "});");
    out.line(2, "if (Object.keys(utmValues).length > 0) {");
    out.line(3, "setFormData((prev) => ({ ...prev, ...utmValues }));");
    out.line(2, "}");
    out.line(1, "}, []);");
}

fn write_submit_handler(out: &mut SourceWriter, plan: &FormPlan, config: &FormConfig) {
    let request = FetchRequest::new(
        config.action.as_str(),
        config.method,
        PayloadSource::Object,
        plan.has_file,
    );

    out.blank();
    out.line(1, "const handleSubmit = async (e) => {");
    out.line(2, "e.preventDefault();");
    out.line(2, "setIsLoading(true);");
    out.blank();
    out.line(2, "try {");
    out.lines(3, request.statements(STATE, ";"));
    out.blank();
    out.line(3, "if (response.ok) {");
    out.line(4, "setIsSubmitted(true);");
    out.line(3, "} else {");
    out.line(4, format!("{FAILURE_ALERT};"));
    out.line(3, "}");
    out.line(2, "} catch (error) {");
    out.line(3, format!("{FAILURE_ALERT};"));
    out.line(2, "} finally {");
    out.line(3, "setIsLoading(false);");
    out.line(2, "}");
    out.line(1, "};");
}

fn write_field(out: &mut SourceWriter, depth: usize, field: &FieldPlan, sheet: &StyleSheet) {
    let label_text = format!(
        "{}{}",
        escape(field.label.as_str()),
        required_marker(field.required)
    );
    let write_label = |out: &mut SourceWriter, target: Option<&str>| {
        let target = target
            .map(|target| format!(" {}", attribute("htmlFor", target)))
            .unwrap_or_default();
        out.line(
            depth + 1,
            format!("<label{target}{}>", class_attribute(sheet.label.as_str())),
        );
        out.line(depth + 2, label_text.as_str());
        out.line(depth + 1, "</label>");
    };

    match &field.layout {
        FieldLayout::Stacked(control) => {
            out.line(depth, wrapper(styles::FIELD_WRAPPER));
            write_label(out, field.label_target());
            write_control(out, depth + 1, control);
            write_instructions(out, depth + 1, field, sheet);
            out.line(depth, "</div>");
        }
        FieldLayout::Inline(control) => {
            out.line(depth, wrapper(styles::FIELD_WRAPPER));
            out.line(depth + 1, wrapper(styles::INLINE_ROW));
            write_control(out, depth + 2, control);
            out.line(depth + 2, inline_label(control, label_text.as_str()));
            out.line(depth + 1, "</div>");
            write_instructions(out, depth + 1, field, sheet);
            out.line(depth, "</div>");
        }
        FieldLayout::Choice(options) => {
            out.line(
                depth,
                format!("<fieldset className=\"{}\">", styles::CHOICE_WRAPPER),
            );
            out.line(
                depth + 1,
                format!("<legend{}>", class_attribute(sheet.label.as_str())),
            );
            out.line(depth + 2, label_text.as_str());
            out.line(depth + 1, "</legend>");
            for option in options {
                out.line(depth + 1, wrapper(styles::INLINE_ROW));
                write_control(out, depth + 2, &option.control);
                out.line(
                    depth + 2,
                    inline_label(&option.control, escape(option.label.as_str()).as_str()),
                );
                out.line(depth + 1, "</div>");
            }
            write_instructions(out, depth + 1, field, sheet);
            out.line(depth, "</fieldset>");
        }
        FieldLayout::Hidden(control) => write_control(out, depth, control),
        FieldLayout::Name(controls) => {
            out.line(depth, wrapper(styles::FIELD_WRAPPER));
            write_label(out, field.label_target());
            out.line(
                depth + 1,
                wrapper(format!("grid grid-cols-2 {}", sheet.grid_gap).as_str()),
            );
            for control in controls {
                write_control(out, depth + 2, control);
            }
            out.line(depth + 1, "</div>");
            write_instructions(out, depth + 1, field, sheet);
            out.line(depth, "</div>");
        }
        FieldLayout::Address(address) => {
            out.line(depth, wrapper(styles::ADDRESS_WRAPPER));
            write_label(out, field.label_target());
            write_control(out, depth + 1, &address.street);
            if let Some(street2) = &address.street2 {
                write_control(out, depth + 1, street2);
            }
            out.line(
                depth + 1,
                wrapper(format!("grid grid-cols-6 {}", sheet.grid_gap).as_str()),
            );
            for control in &address.region {
                write_control(out, depth + 2, control);
            }
            out.line(depth + 1, "</div>");
            if let Some(country) = &address.country {
                write_control(out, depth + 1, country);
            }
            write_instructions(out, depth + 1, field, sheet);
            out.line(depth, "</div>");
        }
        FieldLayout::Utm(controls) => {
            out.line(
                depth,
                format!(
                    "{{/* {}: UTM Parameters (auto-populated from URL) */}}",
                    field.name.replace("*/", "* /")
                ),
            );
            for control in controls {
                write_control(out, depth, control);
            }
        }
    }
}

fn write_control(out: &mut SourceWriter, depth: usize, control: &Control) {
    let access = js_property_access(STATE, control.key.as_str());

    if control.kind == ControlKind::Hidden {
        out.line(
            depth,
            format!(
                "<input type=\"hidden\" {} value={{{access}}} />",
                attribute("name", control.key.as_str())
            ),
        );
        return;
    }

    let mut attributes = Vec::new();
    match &control.kind {
        ControlKind::Input(input_type) => attributes.push(attribute("type", input_type)),
        ControlKind::Checkbox => attributes.push(attribute("type", "checkbox")),
        ControlKind::Radio(_) => attributes.push(attribute("type", "radio")),
        ControlKind::File(_) => attributes.push(attribute("type", "file")),
        ControlKind::Textarea | ControlKind::Select(_) | ControlKind::Hidden => {}
    }
    if let Some(dom_id) = &control.dom_id {
        attributes.push(attribute("id", dom_id.as_str()));
    }
    attributes.push(attribute("name", control.key.as_str()));
    match &control.kind {
        ControlKind::Radio(value) => attributes.push(attribute("value", value.as_str())),
        ControlKind::File(accept) => attributes.push(attribute("accept", accept.as_str())),
        _ => {}
    }
    if let Some(placeholder) = &control.placeholder {
        attributes.push(attribute("placeholder", placeholder.as_str()));
    }
    if control.kind == ControlKind::Textarea {
        attributes.push("rows={4}".to_owned());
    }
    if !control.class.is_empty() {
        attributes.push(attribute("className", control.class.as_str()));
    }

    let key = js_property_key(control.key.as_str());
    let update = |value: &str| {
        format!("onChange={{(e) => setFormData((prev) => ({{ ...prev, {key}: {value} }}))}}")
    };
    match &control.kind {
        ControlKind::Checkbox => {
            attributes.push(format!("checked={{!!{access}}}"));
            attributes.push(update("e.target.checked"));
        }
        ControlKind::Radio(value) => {
            attributes.push(format!("checked={{{access} === {}}}", js_string(value)));
            attributes.push(update("e.target.value"));
        }
        ControlKind::File(_) => attributes.push(update("e.target.files?.[0] ?? null")),
        _ => {
            attributes.push(format!("value={{{access}}}"));
            attributes.push(update("e.target.value"));
        }
    }
    if control.required {
        attributes.push("required".to_owned());
    }
    for constraint in &control.constraints {
        let name = constraint.attribute.prop_name();
        if constraint.numeric {
            attributes.push(format!("{name}={{{}}}", constraint.value));
        } else {
            attributes.push(attribute(name, constraint.value.as_str()));
        }
    }

    match &control.kind {
        ControlKind::Select(options) => {
            out.line(depth, "<select");
            out.lines(depth + 1, &attributes);
            out.line(depth, ">");
            out.line(depth + 1, "<option value=\"\">Select an option...</option>");
            for option in options {
                out.line(
                    depth + 1,
                    format!(
                        "<option {}>{}</option>",
                        attribute("value", option.value.as_str()),
                        escape(option.label.as_str())
                    ),
                );
            }
            out.line(depth, "</select>");
        }
        ControlKind::Textarea => {
            out.line(depth, "<textarea");
            out.lines(depth + 1, &attributes);
            out.line(depth, "/>");
        }
        _ => {
            out.line(depth, "<input");
            out.lines(depth + 1, &attributes);
            out.line(depth, "/>");
        }
    }
}

fn write_instructions(out: &mut SourceWriter, depth: usize, field: &FieldPlan, sheet: &StyleSheet) {
    if let Some(instructions) = &field.instructions {
        out.line(
            depth,
            format!(
                "<p{}>{}</p>",
                class_attribute(sheet.instructions.as_str()),
                escape(instructions.as_str())
            ),
        );
    }
}

fn inline_label(control: &Control, text: &str) -> String {
    let target = control
        .dom_id
        .as_deref()
        .map(|dom_id| format!(" {}", attribute("htmlFor", dom_id)))
        .unwrap_or_default();
    format!(
        "<label{target} className=\"{}\">{text}</label>",
        styles::INLINE_LABEL
    )
}

fn required_marker(required: bool) -> String {
    if required {
        format!(
            "{{\" \"}}<span className=\"{}\">*</span>",
            styles::REQUIRED_MARKER
        )
    } else {
        String::new()
    }
}

fn wrapper(class: &str) -> String {
    format!("<div className=\"{class}\">")
}

fn attribute(name: &str, value: &str) -> String {
    format!("{name}=\"{}\"", escape(value))
}

fn class_attribute(class: &str) -> String {
    if class.is_empty() {
        String::new()
    } else {
        format!(" {}", attribute("className", class))
    }
}

#[cfg(test)]
mod tests {
    use formsmith_core::FieldId;
    use formsmith_domain::{
        FieldSeed, FieldType, FormConfig, FormField, SelectOption, SubmitType, ValidationKind,
        ValidationRule, ValidationValue,
    };

    use super::render;
    use crate::export::field_plan::FormPlan;

    fn render_fields(seeds: Vec<FieldSeed>, config: &FormConfig) -> String {
        let fields: Vec<FormField> = seeds
            .into_iter()
            .map(|seed| FormField::from_seed(FieldId::new(), seed))
            .collect();
        render(&FormPlan::build(&fields, config), config)
    }

    #[test]
    fn state_is_keyed_by_submission_key() {
        let seeds = vec![
            FieldSeed::new(FieldType::Text, "Email", "email"),
            FieldSeed::new(FieldType::Text, "First name", "first-name"),
            FieldSeed::new(FieldType::File, "Resume", "resume"),
        ];
        let output = render_fields(seeds, &FormConfig::default());

        assert!(output.contains("    email: \"\",\n"));
        assert!(output.contains("    \"first-name\": \"\",\n"));
        assert!(output.contains("    resume: null,\n"));
        assert!(output.contains("value={formData[\"first-name\"]}"));
        assert!(output.contains("({ ...prev, \"first-name\": e.target.value })"));
    }

    #[test]
    fn required_marker_uses_jsx_spacing() {
        let seed = FieldSeed::new(FieldType::Email, "Email", "email")
            .with_rule(ValidationRule::required());
        let output = render_fields(vec![seed], &FormConfig::default());

        assert!(output.contains("Email{\" \"}<span className=\"text-red-500\">*</span>"));
        assert!(output.contains("\n          required\n"));
    }

    #[test]
    fn numeric_constraints_use_expressions() {
        let seed = FieldSeed::new(FieldType::Text, "Code", "code").with_rule(
            ValidationRule::new(ValidationKind::MinLength).with_value(ValidationValue::Number(4.0)),
        );
        let output = render_fields(vec![seed], &FormConfig::default());

        assert!(output.contains("minLength={4}"));
    }

    #[test]
    fn radio_and_checkbox_bind_checked_state() {
        let seeds = vec![
            FieldSeed::new(FieldType::Radio, "Plan", "plan")
                .with_options(vec![SelectOption::new("Pro", "pro")]),
            FieldSeed::new(FieldType::Checkbox, "Agree", "agree"),
        ];
        let output = render_fields(seeds, &FormConfig::default());

        assert!(output.contains("checked={formData.plan === \"pro\"}"));
        assert!(output.contains("checked={!!formData.agree}"));
        assert!(output.contains("agree: e.target.checked"));
    }

    #[test]
    fn ajax_component_tracks_loading_and_success() {
        let config = FormConfig {
            submit_type: SubmitType::Ajax,
            success_message: "Thanks {friend}!".to_owned(),
            ..FormConfig::default()
        };
        let output = render_fields(vec![FieldSeed::new(FieldType::Text, "Name", "name")], &config);

        assert!(output.contains("const [isLoading, setIsLoading] = useState(false);"));
        assert!(output.contains("disabled={isLoading}"));
        assert!(output.contains("{isLoading ? 'Submitting...' : \"Submit\"}"));
        assert!(output.contains("Thanks &#123;friend&#125;!"));
        assert!(output.contains("body: JSON.stringify(formData),"));
        assert!(output.contains("setIsLoading(false);"));
    }

    #[test]
    fn text_and_braces_in_labels_are_escaped() {
        let seed = FieldSeed::new(FieldType::Text, "Price {USD} <net>", "price");
        let output = render_fields(vec![seed], &FormConfig::default());

        assert!(output.contains("Price &#123;USD&#125; &lt;net&gt;"));
    }
}
