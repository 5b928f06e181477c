use std::str::FromStr;

use formsmith_core::AppError;
use formsmith_domain::{FormConfig, FormField};

use self::field_plan::FormPlan;

mod escape;
mod field_plan;
mod html;
mod react;
mod request;
mod source_writer;
mod state_slots;
mod styles;
mod vue;


/// Supported code generation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Static markup with native form semantics.
    Html,
    /// Function component with hook state.
    React,
    /// Single-file component with reactive refs.
    Vue,
}

impl ExportFormat {
    /// Every export target in display order.
    pub const ALL: [Self; 3] = [Self::Html, Self::React, Self::Vue];

    /// Returns the stable identifier used in routes.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::React => "react",
            Self::Vue => "vue",
        }
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Html => "HTML",
            Self::React => "React",
            Self::Vue => "Vue",
        }
    }

    /// Returns the download file extension.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::React => "jsx",
            Self::Vue => "vue",
        }
    }

    /// Returns the syntax-highlighting language key.
    #[must_use]
    pub fn language(&self) -> &'static str {
        match self {
            Self::Html | Self::Vue => "html",
            Self::React => "jsx",
        }
    }

    /// Returns the suggested download name, `form.<ext>`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("form.{}", self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == value)
            .ok_or_else(|| AppError::NotFound(format!("export format '{value}'")))
    }
}

/// Generated source text for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    format: ExportFormat,
    file_name: String,
    field_count: usize,
    content: String,
}

impl ExportArtifact {
    /// Returns the target the content was generated for.
    #[must_use]
    pub fn format(&self) -> ExportFormat {
        self.format
    }

    /// Returns the suggested download name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.file_name.as_str()
    }

    /// Returns how many document fields the content was generated from.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.field_count
    }

    /// Returns the generated source text.
    #[must_use]
    pub fn content(&self) -> &str {
        self.content.as_str()
    }

    /// Consumes the artifact and returns its source text.
    #[must_use]
    pub fn into_content(self) -> String {
        self.content
    }
}

/// Generates source text for `format`. Never fails for any document.
#[must_use]
pub fn generate(format: ExportFormat, fields: &[FormField], config: &FormConfig) -> ExportArtifact {
    let plan = FormPlan::build(fields, config);
    let content = match format {
        ExportFormat::Html => html::render(&plan, config),
        ExportFormat::React => react::render(&plan, config),
        ExportFormat::Vue => vue::render(&plan, config),
    };

    ExportArtifact {
        format,
        file_name: format.file_name(),
        field_count: fields.len(),
        content,
    }
}

/// Generates static markup.
#[must_use]
pub fn generate_html(fields: &[FormField], config: &FormConfig) -> String {
    generate(ExportFormat::Html, fields, config).into_content()
}

/// Generates a React function component.
#[must_use]
pub fn generate_react(fields: &[FormField], config: &FormConfig) -> String {
    generate(ExportFormat::React, fields, config).into_content()
}

/// Generates a Vue single-file component.
#[must_use]
pub fn generate_vue(fields: &[FormField], config: &FormConfig) -> String {
    generate(ExportFormat::Vue, fields, config).into_content()
}
