use std::str::FromStr;

use formsmith_core::AppError;
use serde::{Deserialize, Serialize};

/// HTTP method used by the generated form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmitMethod {
    /// Query-string submission.
    #[serde(rename = "GET")]
    Get,
    /// Request-body submission.
    #[default]
    #[serde(rename = "POST")]
    Post,
}

impl SubmitMethod {
    /// Returns the stable wire value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl FromStr for SubmitMethod {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            _ => Err(AppError::Validation(format!(
                "unknown submit method '{value}'"
            ))),
        }
    }
}

/// Submission mode of the generated form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitType {
    /// Native browser submission.
    #[default]
    Standard,
    /// Intercepted asynchronous submission.
    Ajax,
}

impl SubmitType {
    /// Returns the stable wire value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Ajax => "ajax",
        }
    }
}

impl FromStr for SubmitType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "standard" => Ok(Self::Standard),
            "ajax" => Ok(Self::Ajax),
            _ => Err(AppError::Validation(format!(
                "unknown submit type '{value}'"
            ))),
        }
    }
}

/// Input styling preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    /// Browser defaults.
    Default,
    /// Rounded inputs with a focus ring.
    #[default]
    Simple,
    /// Bottom border only.
    Underline,
    /// Filled background.
    Solid,
}

impl Theme {
    /// Every theme.
    pub const ALL: [Self; 4] = [Self::Default, Self::Simple, Self::Underline, Self::Solid];

    /// Returns the stable wire value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Simple => "simple",
            Self::Underline => "underline",
            Self::Solid => "solid",
        }
    }
}

impl FromStr for Theme {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|theme| theme.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown theme '{value}'")))
    }
}

/// Vertical rhythm between fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSpacing {
    /// Compact spacing.
    Tight,
    /// Regular spacing.
    #[default]
    Default,
    /// Airy spacing.
    Wide,
}

impl FieldSpacing {
    /// Every spacing preset.
    pub const ALL: [Self; 3] = [Self::Tight, Self::Default, Self::Wide];

    /// Returns the stable wire value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tight => "tight",
            Self::Default => "default",
            Self::Wide => "wide",
        }
    }
}

impl FromStr for FieldSpacing {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|spacing| spacing.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown field spacing '{value}'")))
    }
}

/// Form-wide settings. Exactly one exists per document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormConfig {
    /// Submission endpoint.
    pub action: String,
    /// Submission method.
    pub method: SubmitMethod,
    /// Submission mode.
    pub submit_type: SubmitType,
    /// Text shown after a successful ajax submission.
    pub success_message: String,
    /// Input styling preset.
    pub theme: Theme,
    /// Submit control text.
    pub submit_button_text: String,
    /// Keep dark-mode style fragments in generated output.
    pub dark_mode: bool,
    /// Vertical rhythm between fields.
    pub field_spacing: FieldSpacing,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            action: "/submit".to_owned(),
            method: SubmitMethod::Post,
            submit_type: SubmitType::Standard,
            success_message: "Thank you! Your submission has been received.".to_owned(),
            theme: Theme::Simple,
            submit_button_text: "Submit".to_owned(),
            dark_mode: true,
            field_spacing: FieldSpacing::Default,
        }
    }
}

impl FormConfig {
    /// Shallow-merges the present values of `patch`.
    pub fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(action) = patch.action {
            self.action = action;
        }
        if let Some(method) = patch.method {
            self.method = method;
        }
        if let Some(submit_type) = patch.submit_type {
            self.submit_type = submit_type;
        }
        if let Some(success_message) = patch.success_message {
            self.success_message = success_message;
        }
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
        if let Some(submit_button_text) = patch.submit_button_text {
            self.submit_button_text = submit_button_text;
        }
        if let Some(dark_mode) = patch.dark_mode {
            self.dark_mode = dark_mode;
        }
        if let Some(field_spacing) = patch.field_spacing {
            self.field_spacing = field_spacing;
        }
    }
}

/// Partial update for [`FormConfig`]. `None` leaves a setting unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigPatch {
    /// New submission endpoint.
    pub action: Option<String>,
    /// New submission method.
    pub method: Option<SubmitMethod>,
    /// New submission mode.
    pub submit_type: Option<SubmitType>,
    /// New success text.
    pub success_message: Option<String>,
    /// New theme.
    pub theme: Option<Theme>,
    /// New submit control text.
    pub submit_button_text: Option<String>,
    /// New dark-mode flag.
    pub dark_mode: Option<bool>,
    /// New spacing preset.
    pub field_spacing: Option<FieldSpacing>,
}

#[cfg(test)]
mod tests {
    use super::{ConfigPatch, FieldSpacing, FormConfig, SubmitMethod, SubmitType, Theme};

    #[test]
    fn default_config_matches_builder_defaults() {
        let config = FormConfig::default();

        assert_eq!(config.action, "/submit");
        assert_eq!(config.method, SubmitMethod::Post);
        assert_eq!(config.submit_type, SubmitType::Standard);
        assert_eq!(config.theme, Theme::Simple);
        assert_eq!(config.submit_button_text, "Submit");
        assert!(config.dark_mode);
        assert_eq!(config.field_spacing, FieldSpacing::Default);
    }

    #[test]
    fn patch_merges_only_present_settings() {
        let mut config = FormConfig::default();
        config.apply_patch(ConfigPatch {
            submit_type: Some(SubmitType::Ajax),
            dark_mode: Some(false),
            ..ConfigPatch::default()
        });

        assert_eq!(config.submit_type, SubmitType::Ajax);
        assert!(!config.dark_mode);
        assert_eq!(config.action, "/submit");
        assert_eq!(config.theme, Theme::Simple);
    }

    #[test]
    fn enums_parse_wire_names() {
        assert_eq!("GET".parse::<SubmitMethod>().ok(), Some(SubmitMethod::Get));
        assert!("get".parse::<SubmitMethod>().is_err());
        assert_eq!("underline".parse::<Theme>().ok(), Some(Theme::Underline));
        assert_eq!("wide".parse::<FieldSpacing>().ok(), Some(FieldSpacing::Wide));
        assert!("fast".parse::<SubmitType>().is_err());
    }
}
