use formsmith_core::FieldId;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigPatch, FormConfig};
use crate::field::{FieldPatch, FieldType, FormField, ValidationKind, ValidationRule};
use crate::template::FormTemplate;

#[cfg(test)]
mod tests;

/// The form being edited: ordered fields, settings and the current selection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FormDocument {
    fields: Vec<FormField>,
    config: FormConfig,
    selected_field_id: Option<FieldId>,
}

/// Mutation Engine command. Every variant is total: unknown ids are no-ops.
#[derive(Debug, Clone, PartialEq)]
pub enum FormCommand {
    /// Inserts a default field of `field_type` at `index`, or appends.
    AddField {
        /// Type of the new field.
        field_type: FieldType,
        /// Insertion index; out-of-range values append.
        index: Option<usize>,
    },
    /// Merges a partial update into a field.
    UpdateField {
        /// Target field.
        field_id: FieldId,
        /// Update to merge.
        patch: FieldPatch,
    },
    /// Deletes a field.
    RemoveField {
        /// Target field.
        field_id: FieldId,
    },
    /// Clones a field right after itself.
    DuplicateField {
        /// Target field.
        field_id: FieldId,
    },
    /// Moves `active_id` to the index `over_id` occupies.
    ReorderFields {
        /// Field being moved.
        active_id: FieldId,
        /// Field whose position is taken.
        over_id: FieldId,
    },
    /// Sets or clears the selection.
    SelectField {
        /// Selected field, if any.
        field_id: Option<FieldId>,
    },
    /// Shallow-merges form settings.
    UpdateConfig {
        /// Update to merge.
        patch: ConfigPatch,
    },
    /// Replaces every field with fresh copies of a template's fields.
    LoadTemplate {
        /// Template id.
        template_id: String,
    },
    /// Restores the empty default document.
    Reset,
    /// Sets a validation rule, replacing any rule of the same kind.
    SetValidationRule {
        /// Target field.
        field_id: FieldId,
        /// Rule to set.
        rule: ValidationRule,
    },
    /// Removes every validation rule of one kind.
    ClearValidationRule {
        /// Target field.
        field_id: FieldId,
        /// Rule kind to remove.
        kind: ValidationKind,
    },
    /// Appends a numbered option.
    AddOption {
        /// Target field.
        field_id: FieldId,
    },
    /// Edits one option in place.
    UpdateOption {
        /// Target field.
        field_id: FieldId,
        /// Option index.
        index: usize,
        /// New label.
        label: Option<String>,
        /// New value.
        value: Option<String>,
    },
    /// Removes one option.
    RemoveOption {
        /// Target field.
        field_id: FieldId,
        /// Option index.
        index: usize,
    },
}

impl FormCommand {
    /// Returns a stable command name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddField { .. } => "add_field",
            Self::UpdateField { .. } => "update_field",
            Self::RemoveField { .. } => "remove_field",
            Self::DuplicateField { .. } => "duplicate_field",
            Self::ReorderFields { .. } => "reorder_fields",
            Self::SelectField { .. } => "select_field",
            Self::UpdateConfig { .. } => "update_config",
            Self::LoadTemplate { .. } => "load_template",
            Self::Reset => "reset",
            Self::SetValidationRule { .. } => "set_validation_rule",
            Self::ClearValidationRule { .. } => "clear_validation_rule",
            Self::AddOption { .. } => "add_option",
            Self::UpdateOption { .. } => "update_option",
            Self::RemoveOption { .. } => "remove_option",
        }
    }
}

/// Result of applying a [`FormCommand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Whether the document changed.
    pub changed: bool,
    /// Field created by the command, if any.
    pub created_field_id: Option<FieldId>,
}

impl CommandOutcome {
    fn from_changed(changed: bool) -> Self {
        Self {
            changed,
            created_field_id: None,
        }
    }

    fn created(field_id: Option<FieldId>) -> Self {
        Self {
            changed: field_id.is_some(),
            created_field_id: field_id,
        }
    }
}

impl FormDocument {
    /// Creates an empty document with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns fields in display order.
    #[must_use]
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Returns form settings.
    #[must_use]
    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Returns the selected field id.
    #[must_use]
    pub fn selected_field_id(&self) -> Option<FieldId> {
        self.selected_field_id
    }

    /// Returns the selected field when the selection references one.
    #[must_use]
    pub fn selected_field(&self) -> Option<&FormField> {
        self.selected_field_id.and_then(|field_id| self.field(field_id))
    }

    /// Returns a field by id.
    #[must_use]
    pub fn field(&self, field_id: FieldId) -> Option<&FormField> {
        self.fields.iter().find(|field| field.id() == field_id)
    }

    /// Returns the index of a field by id.
    #[must_use]
    pub fn position(&self, field_id: FieldId) -> Option<usize> {
        self.fields.iter().position(|field| field.id() == field_id)
    }

    /// Applies one command.
    pub fn apply(&mut self, command: FormCommand) -> CommandOutcome {
        match command {
            FormCommand::AddField { field_type, index } => {
                CommandOutcome::created(Some(self.add_field(field_type, index)))
            }
            FormCommand::UpdateField { field_id, patch } => {
                CommandOutcome::from_changed(self.update_field(field_id, patch))
            }
            FormCommand::RemoveField { field_id } => {
                CommandOutcome::from_changed(self.remove_field(field_id))
            }
            FormCommand::DuplicateField { field_id } => {
                CommandOutcome::created(self.duplicate_field(field_id))
            }
            FormCommand::ReorderFields { active_id, over_id } => {
                CommandOutcome::from_changed(self.reorder_fields(active_id, over_id))
            }
            FormCommand::SelectField { field_id } => {
                self.select_field(field_id);
                CommandOutcome::from_changed(true)
            }
            FormCommand::UpdateConfig { patch } => {
                self.update_config(patch);
                CommandOutcome::from_changed(true)
            }
            FormCommand::LoadTemplate { template_id } => {
                CommandOutcome::from_changed(self.load_template(template_id.as_str()))
            }
            FormCommand::Reset => {
                self.reset();
                CommandOutcome::from_changed(true)
            }
            FormCommand::SetValidationRule { field_id, rule } => {
                CommandOutcome::from_changed(self.with_field(field_id, |field| {
                    field.set_rule(rule);
                    true
                }))
            }
            FormCommand::ClearValidationRule { field_id, kind } => CommandOutcome::from_changed(
                self.with_field(field_id, |field| field.clear_rule(kind)),
            ),
            FormCommand::AddOption { field_id } => {
                CommandOutcome::from_changed(self.with_field(field_id, |field| {
                    field.add_option();
                    true
                }))
            }
            FormCommand::UpdateOption {
                field_id,
                index,
                label,
                value,
            } => CommandOutcome::from_changed(
                self.with_field(field_id, |field| field.update_option(index, label, value)),
            ),
            FormCommand::RemoveOption { field_id, index } => CommandOutcome::from_changed(
                self.with_field(field_id, |field| field.remove_option(index)),
            ),
        }
    }

    /// Inserts a default field and selects it. Returns the new field id.
    pub fn add_field(&mut self, field_type: FieldType, index: Option<usize>) -> FieldId {
        let field = FormField::with_defaults(field_type);
        let field_id = field.id();

        match index {
            Some(index) if index <= self.fields.len() => self.fields.insert(index, field),
            _ => self.fields.push(field),
        }
        self.selected_field_id = Some(field_id);

        field_id
    }

    /// Merges `patch` into the matching field. Returns `false` when absent.
    pub fn update_field(&mut self, field_id: FieldId, patch: FieldPatch) -> bool {
        self.with_field(field_id, |field| {
            field.apply_patch(patch);
            true
        })
    }

    /// Deletes the matching field and clears the selection if it pointed there.
    pub fn remove_field(&mut self, field_id: FieldId) -> bool {
        let Some(index) = self.position(field_id) else {
            return false;
        };

        self.fields.remove(index);
        if self.selected_field_id == Some(field_id) {
            self.selected_field_id = None;
        }
        true
    }

    /// Clones the matching field right after it with a fresh id, `_copy`
    /// name suffix and ` (Copy)` label suffix, then selects the clone.
    pub fn duplicate_field(&mut self, field_id: FieldId) -> Option<FieldId> {
        let index = self.position(field_id)?;

        let original = &self.fields[index];
        let patch = FieldPatch {
            name: Some(format!("{}_copy", original.name())),
            label: Some(format!("{} (Copy)", original.label())),
            ..FieldPatch::default()
        };
        let mut duplicate = original.clone();
        let duplicate_id = FieldId::new();
        duplicate.reassign(duplicate_id);
        duplicate.apply_patch(patch);

        self.fields.insert(index + 1, duplicate);
        self.selected_field_id = Some(duplicate_id);
        Some(duplicate_id)
    }

    /// Moves `active_id` to the index `over_id` held before the move.
    pub fn reorder_fields(&mut self, active_id: FieldId, over_id: FieldId) -> bool {
        if active_id == over_id {
            return false;
        }
        let (Some(old_index), Some(new_index)) = (self.position(active_id), self.position(over_id))
        else {
            return false;
        };

        let field = self.fields.remove(old_index);
        self.fields.insert(new_index, field);
        true
    }

    /// Sets the selection without checking that the id exists.
    pub fn select_field(&mut self, field_id: Option<FieldId>) {
        self.selected_field_id = field_id;
    }

    /// Shallow-merges form settings.
    pub fn update_config(&mut self, patch: ConfigPatch) {
        self.config.apply_patch(patch);
    }

    /// Replaces all fields with fresh copies of a template's fields and
    /// clears the selection. Returns `false` for unknown templates.
    pub fn load_template(&mut self, template_id: &str) -> bool {
        let Some(template) = FormTemplate::find(template_id) else {
            return false;
        };

        self.fields = template
            .fields()
            .iter()
            .cloned()
            .map(|seed| FormField::from_seed(FieldId::new(), seed))
            .collect();
        self.selected_field_id = None;
        true
    }

    /// Restores the empty document with default settings.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn with_field(&mut self, field_id: FieldId, update: impl FnOnce(&mut FormField) -> bool) -> bool {
        self.fields
            .iter_mut()
            .find(|field| field.id() == field_id)
            .is_some_and(update)
    }
}
