//! Escaping for the three output syntaxes.

/// Escapes markup text and double- or single-quoted attribute values.
pub(crate) fn html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for character in value.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(character),
        }
    }
    escaped
}

/// Escapes JSX text and string attributes. Braces would open an expression.
pub(crate) fn jsx(value: &str) -> String {
    html(value).replace('{', "&#123;").replace('}', "&#125;")
}

/// Escapes Vue template text. Opening braces would start an interpolation.
pub(crate) fn vue(value: &str) -> String {
    html(value).replace('{', "&#123;")
}

/// Encodes a JavaScript string literal that is safe inside inline scripts,
/// JSX expressions and Vue interpolations.
pub(crate) fn js_string(value: &str) -> String {
    let encoded = serde_json::Value::String(value.to_owned()).to_string();
    let mut escaped = String::with_capacity(encoded.len());
    for character in encoded.chars() {
        match character {
            '<' => escaped.push_str("\\u003c"),
            '>' => escaped.push_str("\\u003e"),
            '&' => escaped.push_str("\\u0026"),
            '{' => escaped.push_str("\\u007b"),
            '}' => escaped.push_str("\\u007d"),
            '\u{2028}' => escaped.push_str("\\u2028"),
            '\u{2029}' => escaped.push_str("\\u2029"),
            _ => escaped.push(character),
        }
    }
    escaped
}

/// Returns whether `value` can be used as a bare JavaScript identifier or
/// property name.
pub(crate) fn is_js_identifier(value: &str) -> bool {
    let mut characters = value.chars();
    let Some(first) = characters.next() else {
        return false;
    };

    (first.is_ascii_alphabetic() || first == '_' || first == '$')
        && characters.all(|character| {
            character.is_ascii_alphanumeric() || character == '_' || character == '$'
        })
}

/// Renders an object-literal key.
pub(crate) fn js_property_key(key: &str) -> String {
    if is_js_identifier(key) {
        key.to_owned()
    } else {
        js_string(key)
    }
}

/// Renders a property read on `object`.
pub(crate) fn js_property_access(object: &str, key: &str) -> String {
    if is_js_identifier(key) {
        format!("{object}.{key}")
    } else {
        format!("{object}[{}]", js_string(key))
    }
}

/// Escapes a literal so it matches verbatim inside a regular expression.
pub(crate) fn regex_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for character in value.chars() {
        if matches!(
            character,
            '\\' | '^' | '$' | '.' | '|' | '?' | '*' | '+' | '(' | ')' | '[' | ']' | '{' | '}' | '/'
        ) {
            escaped.push('\\');
        }
        escaped.push(character);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::{html, is_js_identifier, js_property_access, js_string, jsx, regex_literal, vue};

    #[test]
    fn html_escapes_markup_and_quotes() {
        assert_eq!(
            html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn jsx_and_vue_neutralise_braces() {
        assert_eq!(jsx("{value}"), "&#123;value&#125;");
        assert_eq!(vue("{{ value }}"), "&#123;&#123; value }}");
    }

    #[test]
    fn js_strings_cannot_close_a_script_element() {
        let literal = js_string("</script><script>alert(1)</script>");
        assert!(!literal.contains("</"));
        assert!(literal.starts_with('"') && literal.ends_with('"'));
    }

    #[test]
    fn js_strings_escape_quotes_and_newlines() {
        assert_eq!(js_string("it's \"ok\"\n"), r#""it's \"ok\"\n""#);
    }

    #[test]
    fn identifiers_follow_javascript_syntax() {
        assert!(is_js_identifier("email_address"));
        assert!(is_js_identifier("$value"));
        assert!(!is_js_identifier("first-name"));
        assert!(!is_js_identifier("1st"));
        assert!(!is_js_identifier(""));
    }

    #[test]
    fn property_access_falls_back_to_brackets() {
        assert_eq!(js_property_access("formData", "email"), "formData.email");
        assert_eq!(
            js_property_access("formData", "first name"),
            "formData[\"first name\"]"
        );
    }

    #[test]
    fn regex_literal_escapes_metacharacters() {
        assert_eq!(regex_literal("acme.com"), "acme\\.com");
        assert_eq!(regex_literal("a+b(c)"), "a\\+b\\(c\\)");
        assert_eq!(regex_literal("my-company"), "my-company");
    }
}
