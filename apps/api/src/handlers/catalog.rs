use axum::Json;
use axum::extract::State;

use crate::dto::{ExportFormatResponse, FieldDefinitionResponse, FormTemplateResponse};
use crate::state::AppState;

pub async fn list_field_catalog_handler(
    State(state): State<AppState>,
) -> Json<Vec<FieldDefinitionResponse>> {
    Json(
        state
            .form_builder_service
            .field_catalog()
            .iter()
            .map(FieldDefinitionResponse::from)
            .collect(),
    )
}

pub async fn list_templates_handler(
    State(state): State<AppState>,
) -> Json<Vec<FormTemplateResponse>> {
    Json(
        state
            .form_builder_service
            .templates()
            .iter()
            .map(FormTemplateResponse::from)
            .collect(),
    )
}

pub async fn list_export_formats_handler(
    State(state): State<AppState>,
) -> Json<Vec<ExportFormatResponse>> {
    Json(
        state
            .form_builder_service
            .export_formats()
            .iter()
            .copied()
            .map(ExportFormatResponse::from)
            .collect(),
    )
}
