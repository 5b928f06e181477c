use formsmith_domain::SubmitMethod;

use super::escape::js_string;

/// Generic notice shown by generated code when a submission fails.
pub(crate) const FAILURE_ALERT: &str = "alert('Something went wrong. Please try again.')";

/// Shape of the value the generated handler submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PayloadSource {
    /// A `FormData` built from the form element.
    FormElement,
    /// A plain object keyed by submission key.
    Object,
}

/// Asynchronous submission issued by generated ajax handlers.
#[derive(Debug, Clone)]
pub(crate) struct FetchRequest<'a> {
    action: &'a str,
    method: SubmitMethod,
    source: PayloadSource,
    multipart: bool,
}

impl<'a> FetchRequest<'a> {
    pub(crate) fn new(
        action: &'a str,
        method: SubmitMethod,
        source: PayloadSource,
        has_file: bool,
    ) -> Self {
        Self {
            action,
            method,
            source,
            multipart: has_file,
        }
    }

    /// Returns statements that submit `payload` and bind `response`, each
    /// closed with `end`.
    ///
    /// GET requests carry the payload as a query string. POST requests send
    /// form elements as-is, objects with files as multipart and other
    /// objects as JSON.
    pub(crate) fn statements(&self, payload: &str, end: &str) -> Vec<String> {
        let mut statements = Vec::new();

        match (self.method, self.source) {
            (SubmitMethod::Get, PayloadSource::FormElement) => {
                statements.push(format!(
                    "const query = new URLSearchParams({payload}).toString(){end}"
                ));
                statements.push(self.get_call(end));
            }
            (SubmitMethod::Get, PayloadSource::Object) => {
                statements.push(format!("const query = new URLSearchParams(){end}"));
                statements.extend(append_entries(payload, "query", end));
                statements.push(self.get_call(end));
            }
            (SubmitMethod::Post, PayloadSource::FormElement) => {
                statements.extend(self.post_call(&format!("body: {payload},"), None, end));
            }
            (SubmitMethod::Post, PayloadSource::Object) if self.multipart => {
                statements.push(format!("const body = new FormData(){end}"));
                statements.extend(append_entries(payload, "body", end));
                statements.extend(self.post_call("body,", None, end));
            }
            (SubmitMethod::Post, PayloadSource::Object) => {
                statements.extend(self.post_call(
                    &format!("body: JSON.stringify({payload}),"),
                    Some("headers: { 'Content-Type': 'application/json' },"),
                    end,
                ));
            }
        }

        statements
    }

    fn get_call(&self, end: &str) -> String {
        let separator = if self.action.contains('?') { '&' } else { '?' };
        let url = js_string(format!("{}{separator}", self.action).as_str());
        format!("const response = await fetch({url} + query, {{ method: 'GET' }}){end}")
    }

    fn post_call(&self, body: &str, headers: Option<&str>, end: &str) -> Vec<String> {
        let mut lines = vec![
            format!("const response = await fetch({}, {{", js_string(self.action)),
            format!("  method: '{}',", self.method.as_str()),
        ];
        if let Some(headers) = headers {
            lines.push(format!("  {headers}"));
        }
        lines.push(format!("  {body}"));
        lines.push(format!("}}){end}"));
        lines
    }
}

fn append_entries(payload: &str, target: &str, end: &str) -> [String; 3] {
    [
        format!("Object.entries({payload}).forEach(([key, value]) => {{"),
        format!("  if (value !== null && value !== undefined) {target}.append(key, value){end}"),
        format!("}}){end}"),
    ]
}

#[cfg(test)]
mod tests {
    use formsmith_domain::SubmitMethod;

    use super::{FetchRequest, PayloadSource};

    #[test]
    fn post_objects_are_sent_as_json() {
        let request = FetchRequest::new("/submit", SubmitMethod::Post, PayloadSource::Object, false);
        let code = request.statements("formData", ";").join("\n");

        assert!(code.contains("fetch(\"/submit\", {"));
        assert!(code.contains("method: 'POST',"));
        assert!(code.contains("'Content-Type': 'application/json'"));
        assert!(code.contains("body: JSON.stringify(formData),"));
    }

    #[test]
    fn post_objects_with_files_are_multipart() {
        let request = FetchRequest::new("/submit", SubmitMethod::Post, PayloadSource::Object, true);
        let code = request.statements("payload", "").join("\n");

        assert!(code.contains("const body = new FormData()"));
        assert!(code.contains("body.append(key, value)"));
        assert!(!code.contains("JSON.stringify"));
        assert!(!code.contains(';'));
    }

    #[test]
    fn get_requests_append_a_query_string() {
        let request = FetchRequest::new(
            "/submit?source=web",
            SubmitMethod::Get,
            PayloadSource::FormElement,
            false,
        );
        let code = request.statements("formData", ";").join("\n");

        assert!(code.contains("new URLSearchParams(formData).toString();"));
        assert!(code.contains("fetch(\"/submit?source=web&\" + query, { method: 'GET' });"));
        assert!(!code.contains("body"));
    }

    #[test]
    fn form_elements_post_their_form_data() {
        let request =
            FetchRequest::new("/api/leads", SubmitMethod::Post, PayloadSource::FormElement, true);
        let code = request.statements("formData", ";").join("\n");

        assert!(code.contains("body: formData,"));
        assert!(!code.contains("Content-Type"));
    }
}
