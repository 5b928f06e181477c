use formsmith_domain::{FormConfig, SubmitMethod, SubmitType};

use super::escape::{html, js_property_key, js_string, vue as escape};
use super::field_plan::{
    Control, ControlKind, FieldLayout, FieldPlan, FormPlan, SlotSeed, UTM_PARAMETERS,
};
use super::request::{FAILURE_ALERT, FetchRequest, PayloadSource};
use super::source_writer::SourceWriter;
use super::state_slots::SlotNames;
use super::styles::{self, StyleSheet, join_classes};

/// Emits a single-file component with one `ref` per state slot.
pub(crate) fn render(plan: &FormPlan, config: &FormConfig) -> String {
    let ajax = config.submit_type == SubmitType::Ajax;
    let names = SlotNames::allocate(&plan.slots);
    let mut out = SourceWriter::new();

    out.line(0, "<script setup>");
    if plan.has_utm {
        out.line(0, "import { ref, onMounted } from 'vue'");
    } else {
        out.line(0, "import { ref } from 'vue'");
    }
    out.blank();
    for slot in &plan.slots {
        let seed = match &slot.seed {
            SlotSeed::Text(text) => js_string(text.as_str()),
            SlotSeed::Null => "null".to_owned(),
        };
        out.line(
            0,
            format!("const {} = ref({seed})", names.name(slot.key.as_str())),
        );
    }
    if ajax {
        out.line(0, "const isSubmitted = ref(false)");
        out.line(0, "const isLoading = ref(false)");
    }
    if plan.has_utm {
        write_utm_hook(&mut out, &names);
    }
    if ajax {
        write_submit_handler(&mut out, plan, config, &names);
    }
    out.line(0, "</script>");
    out.blank();

    out.line(0, "<template>");
    let mut form_attributes = Vec::new();
    if ajax {
        out.line(
            1,
            format!("<div v-if=\"isSubmitted\" class=\"{}\">", styles::SUCCESS),
        );
        out.line(2, escape(config.success_message.as_str()));
        out.line(1, "</div>");
        out.blank();
        form_attributes.push("v-else".to_owned());
        form_attributes.push("@submit.prevent=\"handleSubmit\"".to_owned());
    } else {
        form_attributes.push(attribute("action", config.action.as_str()));
        form_attributes.push(attribute("method", config.method.as_str()));
        if plan.has_file && config.method == SubmitMethod::Post {
            form_attributes.push(attribute("enctype", "multipart/form-data"));
        }
    }
    form_attributes.push(attribute("class", plan.styles.form));
    out.line(1, format!("<form {}>", form_attributes.join(" ")));

    for field in &plan.fields {
        write_field(&mut out, 2, field, &plan.styles, &names);
        out.blank();
    }

    out.line(2, "<div>");
    if ajax {
        out.line(3, "<button");
        out.line(4, "type=\"submit\"");
        out.line(4, ":disabled=\"isLoading\"");
        out.line(
            4,
            attribute(
                "class",
                join_classes(&[plan.styles.button.as_str(), "disabled:opacity-50"]).as_str(),
            ),
        );
        out.line(3, ">");
        out.line(
            4,
            format!(
                "{{{{ isLoading ? 'Submitting...' : {} }}}}",
                js_string(config.submit_button_text.as_str())
            ),
        );
    } else {
        out.line(
            3,
            format!(
                "<button type=\"submit\"{}>",
                class_attribute(plan.styles.button.as_str())
            ),
        );
        out.line(4, escape(config.submit_button_text.as_str()));
    }
    out.line(3, "</button>");
    out.line(2, "</div>");
    out.line(1, "</form>");
    out.line(0, "</template>");

    out.finish()
}

fn write_utm_hook(out: &mut SourceWriter, names: &SlotNames) {
    out.blank();
    out.line(0, "onMounted(() => {");
    out.line(1, "const params = new URLSearchParams(window.location.search)");
    out.line(1, "const utmRefs = {");
    for parameter in UTM_PARAMETERS {
        out.line(2, format!("{parameter}: {},", names.name(parameter)));
    }
    out.line(1, "}");
    out.line(1, "Object.entries(utmRefs).forEach(([param, target]) => {");
    out.line(2, "const value = params.get(param)");
    out.line(2, "if (value) target.value = value");
    out.line(1, "})");
    out.line(0, "})");
}

fn write_submit_handler(
    out: &mut SourceWriter,
    plan: &FormPlan,
    config: &FormConfig,
    names: &SlotNames,
) {
    let request = FetchRequest::new(
        config.action.as_str(),
        config.method,
        PayloadSource::Object,
        plan.has_file,
    );

    out.blank();
    out.line(0, "const handleSubmit = async () => {");
    out.line(1, "isLoading.value = true");
    out.blank();
    out.line(1, "try {");
    if plan.slots.is_empty() {
        out.line(2, "const payload = {}");
    } else {
        out.line(2, "const payload = {");
        for slot in &plan.slots {
            out.line(
                3,
                format!(
                    "{}: {}.value,",
                    js_property_key(slot.key.as_str()),
                    names.name(slot.key.as_str())
                ),
            );
        }
        out.line(2, "}");
    }
    out.blank();
    out.lines(2, request.statements("payload", ""));
    out.blank();
    out.line(2, "if (response.ok) {");
    out.line(3, "isSubmitted.value = true");
    out.line(2, "} else {");
    out.line(3, FAILURE_ALERT);
    out.line(2, "}");
    out.line(1, "} catch (error) {");
    out.line(2, FAILURE_ALERT);
    out.line(1, "} finally {");
    out.line(2, "isLoading.value = false");
    out.line(1, "}");
    out.line(0, "}");
}

fn write_field(
    out: &mut SourceWriter,
    depth: usize,
    field: &FieldPlan,
    sheet: &StyleSheet,
    names: &SlotNames,
) {
    let label_text = format!(
        "{}{}",
        escape(field.label.as_str()),
        required_marker(field.required)
    );
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
            write_control(out, depth + 1, control, names);
            write_instructions(out, depth + 1, field, sheet);
            out.line(depth, "</div>");
        }
        FieldLayout::Inline(control) => {
            out.line(depth, wrapper(styles::FIELD_WRAPPER));
            out.line(depth + 1, wrapper(styles::INLINE_ROW));
            write_control(out, depth + 2, control, names);
            out.line(depth + 2, inline_label(control, label_text.as_str()));
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
                write_control(out, depth + 2, &option.control, names);
                out.line(
                    depth + 2,
                    inline_label(&option.control, escape(option.label.as_str()).as_str()),
                );
                out.line(depth + 1, "</div>");
            }
            write_instructions(out, depth + 1, field, sheet);
            out.line(depth, "</fieldset>");
        }
        FieldLayout::Hidden(control) => write_control(out, depth, control, names),
        FieldLayout::Name(controls) => {
            out.line(depth, wrapper(styles::FIELD_WRAPPER));
            out.line(depth + 1, label(field.label_target()));
            out.line(
                depth + 1,
                wrapper(format!("grid grid-cols-2 {}", sheet.grid_gap).as_str()),
            );
            for control in controls {
                write_control(out, depth + 2, control, names);
            }
            out.line(depth + 1, "</div>");
            write_instructions(out, depth + 1, field, sheet);
            out.line(depth, "</div>");
        }
        FieldLayout::Address(address) => {
            out.line(depth, wrapper(styles::ADDRESS_WRAPPER));
            out.line(depth + 1, label(field.label_target()));
            write_control(out, depth + 1, &address.street, names);
            if let Some(street2) = &address.street2 {
                write_control(out, depth + 1, street2, names);
            }
            out.line(
                depth + 1,
                wrapper(format!("grid grid-cols-6 {}", sheet.grid_gap).as_str()),
            );
            for control in &address.region {
                write_control(out, depth + 2, control, names);
            }
            out.line(depth + 1, "</div>");
            if let Some(country) = &address.country {
                write_control(out, depth + 1, country, names);
            }
            write_instructions(out, depth + 1, field, sheet);
            out.line(depth, "</div>");
        }
        FieldLayout::Utm(controls) => {
            out.line(
                depth,
                format!(
                    "<!-- {}: UTM Parameters (auto-populated from URL) -->",
                    html(field.name.as_str()).replace("--", "- -")
                ),
            );
            for control in controls {
                write_control(out, depth, control, names);
            }
        }
    }
}

fn write_control(out: &mut SourceWriter, depth: usize, control: &Control, names: &SlotNames) {
    let variable = names.name(control.key.as_str());

    if control.kind == ControlKind::Hidden {
        out.line(
            depth,
            format!(
                "<input type=\"hidden\" {} :value=\"{variable}\" />",
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
        attributes.push("rows=\"4\"".to_owned());
    }
    if !control.class.is_empty() {
        attributes.push(attribute("class", control.class.as_str()));
    }
    if matches!(control.kind, ControlKind::File(_)) {
        attributes.push(format!(
            "@change=\"(event) => {variable} = event.target.files?.[0] ?? null\""
        ));
    } else {
        attributes.push(format!("v-model=\"{variable}\""));
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
            out.line(depth, "></textarea>");
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
    format!("{name}=\"{}\"", html(value))
}

fn class_attribute(class: &str) -> String {
    if class.is_empty() {
        String::new()
    } else {
        format!(" {}", attribute("class", class))
    }
}
