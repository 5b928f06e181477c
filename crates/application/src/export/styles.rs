use formsmith_domain::{FieldSpacing, FormConfig, Theme};

const SIMPLE_INPUT: &str = "mt-1 block w-full rounded-md border-gray-300 shadow-sm focus:border-indigo-300 focus:ring focus:ring-indigo-200 focus:ring-opacity-50 dark:bg-gray-700 dark:border-gray-600 dark:text-white";
const UNDERLINE_INPUT: &str = "mt-1 block w-full border-0 border-b-2 border-gray-200 focus:ring-0 focus:border-indigo-500 bg-transparent dark:border-gray-600 dark:focus:border-indigo-400 dark:text-white";
const SOLID_INPUT: &str = "mt-1 block w-full rounded-md bg-gray-100 border-transparent focus:border-gray-500 focus:bg-white focus:ring-0 dark:bg-gray-800 dark:focus:bg-gray-700 dark:focus:border-gray-400 dark:text-white";

const LABEL: &str = "block text-sm font-medium text-gray-700 dark:text-gray-200";
const INSTRUCTIONS: &str = "mt-1 text-sm text-gray-500 dark:text-gray-400";
const BUTTON: &str = "inline-flex justify-center rounded-md border border-transparent bg-indigo-600 py-2 px-4 text-sm font-medium text-white shadow-sm hover:bg-indigo-700 focus:outline-none focus:ring-2 focus:ring-indigo-500 focus:ring-offset-2 dark:focus:ring-offset-gray-900";

pub(crate) const CHECKBOX: &str = "rounded border-gray-300 text-indigo-600 focus:ring-indigo-500";
pub(crate) const RADIO: &str = "border-gray-300 text-indigo-600 focus:ring-indigo-500";
pub(crate) const INLINE_LABEL: &str = "text-sm text-gray-700";
pub(crate) const FILE_BUTTON: &str = "file:mr-4 file:py-2 file:px-4 file:rounded-md file:border-0 file:text-sm file:font-medium file:bg-indigo-600 file:text-white hover:file:bg-indigo-700";
pub(crate) const SUCCESS: &str = "p-4 bg-green-100 text-green-800 rounded-md";
pub(crate) const REQUIRED_MARKER: &str = "text-red-500";
pub(crate) const INLINE_ROW: &str = "flex items-center gap-2";
pub(crate) const FIELD_WRAPPER: &str = "space-y-1";
pub(crate) const ADDRESS_WRAPPER: &str = "space-y-3";
pub(crate) const CHOICE_WRAPPER: &str = "space-y-2";
pub(crate) const GRID_CELL: &str = "col-span-2";

/// Class strings resolved for one export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StyleSheet {
    pub input: String,
    pub label: String,
    pub instructions: String,
    pub button: String,
    pub form: &'static str,
    pub grid_gap: &'static str,
}

impl StyleSheet {
    pub(crate) fn resolve(config: &FormConfig) -> Self {
        let select = |classes: &str| strip_dark_classes(classes, config.dark_mode);
        let (form, grid_gap) = match config.field_spacing {
            FieldSpacing::Tight => ("space-y-4", "gap-2"),
            FieldSpacing::Default => ("space-y-6", "gap-4"),
            FieldSpacing::Wide => ("space-y-8", "gap-6"),
        };

        Self {
            input: select(theme_input_classes(config.theme)),
            label: select(LABEL),
            instructions: select(INSTRUCTIONS),
            button: select(BUTTON),
            form,
            grid_gap,
        }
    }
}

fn theme_input_classes(theme: Theme) -> &'static str {
    match theme {
        Theme::Default => "",
        Theme::Simple => SIMPLE_INPUT,
        Theme::Underline => UNDERLINE_INPUT,
        Theme::Solid => SOLID_INPUT,
    }
}

/// Drops every `dark:` class unless dark mode is kept.
pub(crate) fn strip_dark_classes(classes: &str, dark_mode: bool) -> String {
    if dark_mode {
        return classes.to_owned();
    }

    classes
        .split_whitespace()
        .filter(|class| !class.starts_with("dark:"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Joins class fragments, skipping empty ones.
pub(crate) fn join_classes(fragments: &[&str]) -> String {
    fragments
        .iter()
        .map(|fragment| fragment.trim())
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use formsmith_domain::{FieldSpacing, FormConfig, Theme};

    use super::{StyleSheet, join_classes, strip_dark_classes};

    #[test]
    fn light_mode_strips_dark_classes() {
        let stripped = strip_dark_classes("mt-1 dark:bg-gray-700 block dark:text-white", false);
        assert_eq!(stripped, "mt-1 block");
    }

    #[test]
    fn dark_mode_keeps_classes_verbatim() {
        let kept = strip_dark_classes("mt-1 dark:bg-gray-700", true);
        assert_eq!(kept, "mt-1 dark:bg-gray-700");
    }

    #[test]
    fn default_theme_has_no_input_classes() {
        let config = FormConfig {
            theme: Theme::Default,
            ..FormConfig::default()
        };
        assert_eq!(StyleSheet::resolve(&config).input, "");
    }

    #[test]
    fn light_stylesheet_contains_no_dark_fragment() {
        for theme in Theme::ALL {
            let config = FormConfig {
                theme,
                dark_mode: false,
                ..FormConfig::default()
            };
            let sheet = StyleSheet::resolve(&config);
            for classes in [&sheet.input, &sheet.label, &sheet.instructions, &sheet.button] {
                assert!(!classes.contains("dark:"), "{}", theme.as_str());
            }
        }
    }

    #[test]
    fn spacing_maps_to_form_and_grid_classes() {
        let config = FormConfig {
            field_spacing: FieldSpacing::Wide,
            ..FormConfig::default()
        };
        let sheet = StyleSheet::resolve(&config);
        assert_eq!(sheet.form, "space-y-8");
        assert_eq!(sheet.grid_gap, "gap-6");
    }

    #[test]
    fn join_skips_empty_fragments() {
        assert_eq!(join_classes(&["", "file:mr-4"]), "file:mr-4");
        assert_eq!(join_classes(&["a b", "col-span-2"]), "a b col-span-2");
    }
}
