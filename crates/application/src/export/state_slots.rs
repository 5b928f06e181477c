use std::collections::{HashMap, HashSet};

use super::field_plan::StateSlot;

/// Words a generated script variable may not take: JavaScript reserved
/// words, globals the generated code calls, and names it declares itself.
const RESERVED: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false", "finally",
    "for", "function", "if", "implements", "import", "in", "instanceof", "interface", "let",
    "new", "null", "package", "private", "protected", "public", "return", "static", "super",
    "switch", "this", "throw", "true", "try", "typeof", "undefined", "var", "void", "while",
    "with", "yield", "Infinity", "NaN",
    "alert", "document", "fetch", "window", "FormData", "JSON", "Object", "URLSearchParams",
    "body", "error", "event", "formData", "handleSubmit", "isLoading", "isSubmitted", "key",
    "onMounted", "param", "params", "payload", "query", "ref", "response", "target",
    "utmRefs", "value",
    "_cache", "_ctx",
];

/// Script variable names for state slots, unique per component.
#[derive(Debug, Clone, Default)]
pub(crate) struct SlotNames {
    names: HashMap<String, String>,
}

impl SlotNames {
    /// Assigns one identifier per distinct submission key, in slot order.
    pub(crate) fn allocate(slots: &[StateSlot]) -> Self {
        let mut taken = HashSet::new();
        let mut names = HashMap::new();

        for slot in slots {
            if names.contains_key(&slot.key) {
                continue;
            }

            let base = identifier_for(slot.key.as_str());
            let mut candidate = base.clone();
            let mut counter = 2;
            while taken.contains(&candidate) {
                candidate = format!("{base}_{counter}");
                counter += 1;
            }

            taken.insert(candidate.clone());
            names.insert(slot.key.clone(), candidate);
        }

        Self { names }
    }

    /// Returns the variable bound to `key`.
    pub(crate) fn name(&self, key: &str) -> String {
        self.names
            .get(key)
            .cloned()
            .unwrap_or_else(|| identifier_for(key))
    }
}

/// Transliterates a submission key into a plain identifier.
fn identifier_for(key: &str) -> String {
    let mut identifier: String = key
        .chars()
        .map(|character| {
            if character.is_ascii_alphanumeric() || character == '_' {
                character
            } else {
                '_'
            }
        })
        .collect();

    if identifier.is_empty() || identifier.starts_with(|character: char| character.is_ascii_digit())
    {
        identifier.insert(0, '_');
    }
    if RESERVED.contains(&identifier.as_str()) {
        identifier.push('_');
    }

    identifier
}

#[cfg(test)]
mod tests {
    use super::SlotNames;
    use crate::export::field_plan::{SlotSeed, StateSlot};

    fn slots(keys: &[&str]) -> Vec<StateSlot> {
        keys.iter()
            .map(|key| StateSlot {
                key: (*key).to_owned(),
                seed: SlotSeed::Text(String::new()),
            })
            .collect()
    }

    #[test]
    fn plain_keys_are_used_verbatim() {
        let names = SlotNames::allocate(&slots(&["email", "utm_source"]));
        assert_eq!(names.name("email"), "email");
        assert_eq!(names.name("utm_source"), "utm_source");
    }

    #[test]
    fn invalid_characters_and_leading_digits_are_rewritten() {
        let names = SlotNames::allocate(&slots(&["first-name", "2nd choice", ""]));
        assert_eq!(names.name("first-name"), "first_name");
        assert_eq!(names.name("2nd choice"), "_2nd_choice");
        assert_eq!(names.name(""), "_");
    }

    #[test]
    fn reserved_and_generated_names_get_a_suffix() {
        let names = SlotNames::allocate(&slots(&["class", "isLoading", "formData"]));
        assert_eq!(names.name("class"), "class_");
        assert_eq!(names.name("isLoading"), "isLoading_");
        assert_eq!(names.name("formData"), "formData_");
    }

    #[test]
    fn colliding_identifiers_are_numbered() {
        let names = SlotNames::allocate(&slots(&["a-b", "a_b", "a b"]));
        assert_eq!(names.name("a-b"), "a_b");
        assert_eq!(names.name("a_b"), "a_b_2");
        assert_eq!(names.name("a b"), "a_b_3");
    }
}
