//! Form builder application service.
//!
//! Exposes every Mutation Engine operation over a [`FormDocumentRepository`]
//! together with the read-only catalogs and the code generators.

use std::sync::Arc;

use formsmith_core::{AppResult, FieldId};
use formsmith_domain::{
    ConfigPatch, FieldCatalog, FieldDefinition, FieldPatch, FieldType, FormCommand, FormDocument,
    FormTemplate, ValidationKind, ValidationRule,
};

use crate::export::{ExportArtifact, ExportFormat, generate};
use crate::form_ports::{AppliedCommand, FormDocumentRepository};


/// Application service for editing and exporting a form.
#[derive(Clone)]
pub struct FormBuilderService {
    repository: Arc<dyn FormDocumentRepository>,
}

impl FormBuilderService {
    /// Creates a new form builder service.
    #[must_use]
    pub fn new(repository: Arc<dyn FormDocumentRepository>) -> Self {
        Self { repository }
    }

    /// Returns the field types offered by the builder palette.
    #[must_use]
    pub fn field_catalog(&self) -> &'static [FieldDefinition] {
        FieldCatalog::all()
    }

    /// Returns the starter templates.
    #[must_use]
    pub fn templates(&self) -> &'static [FormTemplate] {
        FormTemplate::catalog()
    }

    /// Returns the supported export targets.
    #[must_use]
    pub fn export_formats(&self) -> &'static [ExportFormat] {
        &ExportFormat::ALL
    }

    /// Returns a snapshot of the current document.
    pub async fn document(&self) -> AppResult<FormDocument> {
        self.repository.load().await
    }

    /// Generates source code for the current document.
    pub async fn export(&self, format: ExportFormat) -> AppResult<ExportArtifact> {
        let document = self.repository.load().await?;
        Ok(generate(format, document.fields(), document.config()))
    }

    /// Inserts a default field of `field_type` and selects it.
    pub async fn add_field(
        &self,
        field_type: FieldType,
        index: Option<usize>,
    ) -> AppResult<AppliedCommand> {
        self.apply(FormCommand::AddField { field_type, index }).await
    }

    /// Merges a partial update into a field.
    pub async fn update_field(
        &self,
        field_id: FieldId,
        patch: FieldPatch,
    ) -> AppResult<AppliedCommand> {
        self.apply(FormCommand::UpdateField { field_id, patch }).await
    }

    /// Deletes a field.
    pub async fn remove_field(&self, field_id: FieldId) -> AppResult<AppliedCommand> {
        self.apply(FormCommand::RemoveField { field_id }).await
    }

    /// Clones a field right after itself and selects the clone.
    pub async fn duplicate_field(&self, field_id: FieldId) -> AppResult<AppliedCommand> {
        self.apply(FormCommand::DuplicateField { field_id }).await
    }

    /// Moves `active_id` to the position held by `over_id`.
    pub async fn reorder_fields(
        &self,
        active_id: FieldId,
        over_id: FieldId,
    ) -> AppResult<AppliedCommand> {
        self.apply(FormCommand::ReorderFields { active_id, over_id }).await
    }

    /// Sets or clears the selection.
    pub async fn select_field(&self, field_id: Option<FieldId>) -> AppResult<AppliedCommand> {
        self.apply(FormCommand::SelectField { field_id }).await
    }

    /// Shallow-merges form settings.
    pub async fn update_config(&self, patch: ConfigPatch) -> AppResult<AppliedCommand> {
        self.apply(FormCommand::UpdateConfig { patch }).await
    }

    /// Replaces every field with a template's fields.
    pub async fn load_template(&self, template_id: &str) -> AppResult<AppliedCommand> {
        self.apply(FormCommand::LoadTemplate {
            template_id: template_id.to_owned(),
        })
        .await
    }

    /// Restores the empty default document.
    pub async fn reset(&self) -> AppResult<AppliedCommand> {
        self.apply(FormCommand::Reset).await
    }

    /// Sets a validation rule, replacing any rule of the same kind.
    pub async fn set_validation_rule(
        &self,
        field_id: FieldId,
        rule: ValidationRule,
    ) -> AppResult<AppliedCommand> {
        self.apply(FormCommand::SetValidationRule { field_id, rule }).await
    }

    /// Removes every validation rule of `kind`.
    pub async fn clear_validation_rule(
        &self,
        field_id: FieldId,
        kind: ValidationKind,
    ) -> AppResult<AppliedCommand> {
        self.apply(FormCommand::ClearValidationRule { field_id, kind }).await
    }

    /// Appends a numbered option to a select or radio field.
    pub async fn add_option(&self, field_id: FieldId) -> AppResult<AppliedCommand> {
        self.apply(FormCommand::AddOption { field_id }).await
    }

    /// Edits one option in place.
    pub async fn update_option(
        &self,
        field_id: FieldId,
        index: usize,
        label: Option<String>,
        value: Option<String>,
    ) -> AppResult<AppliedCommand> {
        self.apply(FormCommand::UpdateOption {
            field_id,
            index,
            label,
            value,
        })
        .await
    }

    /// Removes one option.
    pub async fn remove_option(&self, field_id: FieldId, index: usize) -> AppResult<AppliedCommand> {
        self.apply(FormCommand::RemoveOption { field_id, index }).await
    }

    async fn apply(&self, command: FormCommand) -> AppResult<AppliedCommand> {
        self.repository.apply(command).await
    }
}
