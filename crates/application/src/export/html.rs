use formsmith_domain::{FormConfig, SubmitMethod, SubmitType};

use super::escape::html as escape;
use super::field_plan::{
    Control, ControlKind, FieldLayout, FieldPlan, FormPlan, utm_parameter_list,
};
use super::request::{FAILURE_ALERT, FetchRequest, PayloadSource};
use super::source_writer::SourceWriter;
use super::styles::{self, StyleSheet};

const FORM_ID: &str = "contact-form";
const SUCCESS_ID: &str = "success-message";

/// Emits a self-contained markup fragment with native form semantics.
pub(crate) fn render(plan: &FormPlan, config: &FormConfig) -> String {
    let ajax = config.submit_type == SubmitType::Ajax;
    let mut out = SourceWriter::new();

    let mut form_attributes = Vec::new();
    if ajax {
        form_attributes.push(attribute("id", FORM_ID));
    } else {
        form_attributes.push(attribute("action", config.action.as_str()));
        form_attributes.push(attribute("method", config.method.as_str()));
        if plan.has_file && config.method == SubmitMethod::Post {
            form_attributes.push(attribute("enctype", "multipart/form-data"));
        }
    }
    form_attributes.push(attribute("class", plan.styles.form));
    out.line(0, format!("<form {}>", form_attributes.join(" ")));

    for field in &plan.fields {
        write_field(&mut out, 1, field, &plan.styles);
        out.blank();
    }

    out.line(1, "<div>");
    out.line(
        2,
        format!(
            "<button type=\"submit\"{}>{}</button>",
            class_attribute(plan.styles.button.as_str()),
            escape(config.submit_button_text.as_str())
        ),
    );
    out.line(1, "</div>");
    out.line(0, "</form>");

    if ajax {
        write_ajax(&mut out, plan, config);
    }
    if plan.has_utm {
        write_utm_script(&mut out);
    }

    out.finish()
}

fn write_ajax(out: &mut SourceWriter, plan: &FormPlan, config: &FormConfig) {
    let request = FetchRequest::new(
        config.action.as_str(),
        config.method,
        PayloadSource::FormElement,
        plan.has_file,
    );

    out.blank();
    out.line(
        0,
        format!(
            "<div id=\"{SUCCESS_ID}\" class=\"hidden {}\">",
            styles::SUCCESS
        ),
    );
    out.line(1, escape(config.success_message.as_str()));
    out.line(0, "</div>");
    out.blank();
    out.line(0, "<script>");
    out.line(
        1,
        format!(
            "document.getElementById('{FORM_ID}').addEventListener('submit', async (event) => {{"
        ),
    );
    out.line(2, "event.preventDefault();");
    out.line(2, "const form = event.target;");
    out.line(2, "const button = form.querySelector('button[type=\"submit\"]');");
    out.line(2, "const formData = new FormData(form);");
    out.line(2, "button.disabled = true;");
    out.blank();
    out.line(2, "try {");
    out.lines(3, request.statements("formData", ";"));
    out.blank();
    out.line(3, "if (response.ok) {");
    out.line(4, "form.style.display = 'none';");
    out.line(
        4,
        format!("document.getElementById('{SUCCESS_ID}').classList.remove('hidden');"),
    );
    out.line(3, "} else {");
    out.line(4, format!("{FAILURE_ALERT};"));
    out.line(3, "}");
    out.line(2, "} catch (error) {");
    out.line(3, format!("{FAILURE_ALERT};"));
    out.line(2, "} finally {");
    out.line(3, "button.disabled = false;");
    out.line(2, "}");
    out.line(1, "});");
    out.line(0, "</script>");
}

fn write_utm_script(out: &mut SourceWriter) {
    out.blank();
    out.line(0, "<script>");
    out.line(1, "(function () {");
    out.line(2, "const params = new URLSearchParams(window.location.search);");
    out.line(
        2,
        format!("{}.forEach(function (param) {{", utm_parameter_list()),
    );
    out.line(3, "const value = params.get(param);");
    out.line(3, "if (!value) return;");
    out.line(
        3,
        "document.querySelectorAll('input[name=\"' + param + '\"]').forEach(function (input) {",
    );
    out.line(4, "input.value = value;");
    out.line(3, "});");
    out.line(2, "});");
    out.line(1, "})();");
    out.line(0, "</script>");
}

fn write_field(out: &mut SourceWriter, depth: usize, field: &FieldPlan, sheet: &StyleSheet) {
    let label_text = format!("{}{}", escape(field.label.as_str()), required_marker(field.required));
    let label = |target: Option<&str>| {
        let target = target
            .map(|target| format!(" {}", attribute("for", target)))
            .unwrap_or_default();
        format!(
            "<label{target}{}>{label_text}</label>",
            class_attribute(sheet.label.as_str())
        )
    };

    match &field.layout {
        FieldLayout::Stacked(control) => {
            out.line(depth, wrapper(styles::FIELD_WRAPPER));
            out.line(depth + 1, label(field.label_target()));
            write_control(out, depth + 1, control);
            write_instructions(out, depth + 1, field, sheet);
            out.line(depth, "</div>");
        }
        FieldLayout::Inline(control) => {
            out.line(depth, wrapper(styles::FIELD_WRAPPER));
            out.line(depth + 1, wrapper(styles::INLINE_ROW));
            write_control(out, depth + 2, control);
            out.line(
                depth + 2,
                inline_label(control, label_text.as_str()),
            );
            out.line(depth + 1, "</div>");
            write_instructions(out, depth + 1, field, sheet);
            out.line(depth, "</div>");
        }
        FieldLayout::Choice(options) => {
            out.line(
                depth,
                format!("<fieldset class=\"{}\">", styles::CHOICE_WRAPPER),
            );
            out.line(
                depth + 1,
                format!(
                    "<legend{}>{label_text}</legend>",
                    class_attribute(sheet.label.as_str())
                ),
            );
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
            out.line(depth + 1, label(field.label_target()));
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
            out.line(depth + 1, label(field.label_target()));
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
                    "<!-- {}: UTM Parameters (auto-populated from URL) -->",
                    comment_text(field.name.as_str())
                ),
            );
            for control in controls {
                write_control(out, depth, control);
            }
        }
    }
}

fn write_control(out: &mut SourceWriter, depth: usize, control: &Control) {
    let mut attributes = Vec::new();
    let input_type = match &control.kind {
        ControlKind::Input(input_type) => Some(*input_type),
        ControlKind::Checkbox => Some("checkbox"),
        ControlKind::Radio(_) => Some("radio"),
        ControlKind::File(_) => Some("file"),
        ControlKind::Hidden => Some("hidden"),
        ControlKind::Textarea | ControlKind::Select(_) => None,
    };
    if let Some(input_type) = input_type {
        attributes.push(attribute("type", input_type));
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
        attributes.push("rows=\"4\"".to_owned());
    }
    if !control.class.is_empty() {
        attributes.push(attribute("class", control.class.as_str()));
    }
    match (&control.kind, control.default_value.as_deref()) {
        (ControlKind::Input(_) | ControlKind::Hidden, Some(default_value)) => {
            attributes.push(attribute("value", default_value));
        }
        (ControlKind::Radio(value), Some(default_value)) if value == default_value => {
            attributes.push("checked".to_owned());
        }
        _ => {}
    }
    if control.required {
        attributes.push("required".to_owned());
    }
    for constraint in &control.constraints {
        attributes.push(attribute(
            constraint.attribute.markup_name(),
            constraint.value.as_str(),
        ));
    }

    let attributes = attributes.join(" ");
    match &control.kind {
        ControlKind::Textarea => out.line(
            depth,
            format!(
                "<textarea {attributes}>{}</textarea>",
                escape(control.default_value.as_deref().unwrap_or_default())
            ),
        ),
        ControlKind::Select(options) => {
            out.line(depth, format!("<select {attributes}>"));
            out.line(depth + 1, "<option value=\"\">Select an option...</option>");
            for option in options {
                let selected = if control.default_value.as_deref() == Some(option.value.as_str()) {
                    " selected"
                } else {
                    ""
                };
                out.line(
                    depth + 1,
                    format!(
                        "<option {}{selected}>{}</option>",
                        attribute("value", option.value.as_str()),
                        escape(option.label.as_str())
                    ),
                );
            }
            out.line(depth, "</select>");
        }
        _ => out.line(depth, format!("<input {attributes} />")),
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
        .map(|dom_id| format!(" {}", attribute("for", dom_id)))
        .unwrap_or_default();
    format!(
        "<label{target} class=\"{}\">{text}</label>",
        styles::INLINE_LABEL
    )
}

fn required_marker(required: bool) -> String {
    if required {
        format!("<span class=\"{} ml-1\">*</span>", styles::REQUIRED_MARKER)
    } else {
        String::new()
    }
}

fn wrapper(class: &str) -> String {
    format!("<div class=\"{class}\">")
}

fn attribute(name: &str, value: &str) -> String {
    format!("{name}=\"{}\"", escape(value))
}

fn class_attribute(class: &str) -> String {
    if class.is_empty() {
        String::new()
    } else {
        format!(" {}", attribute("class", class))
    }
}

/// Markup comments may not contain `--`.
fn comment_text(value: &str) -> String {
    escape(value).replace("--", "- -")
}
