use axum::Json;
use axum::extract::State;

use crate::dto::{
    FormCommandResponse, FormDocumentResponse, LoadTemplateRequest, SelectFieldRequest,
    UpdateConfigRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

use super::command_response;

pub async fn get_document_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<FormDocumentResponse>> {
    let document = state.form_builder_service.document().await?;

    Ok(Json(FormDocumentResponse::from(&document)))
}

pub async fn reset_document_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<FormCommandResponse>> {
    let applied = state.form_builder_service.reset().await?;

    Ok(command_response("reset", applied))
}

pub async fn load_template_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoadTemplateRequest>,
) -> ApiResult<Json<FormCommandResponse>> {
    let applied = state
        .form_builder_service
        .load_template(payload.template_id.as_str())
        .await?;

    Ok(command_response("load_template", applied))
}

pub async fn update_config_handler(
    State(state): State<AppState>,
    Json(payload): Json<UpdateConfigRequest>,
) -> ApiResult<Json<FormCommandResponse>> {
    let patch = payload.into_patch()?;
    let applied = state.form_builder_service.update_config(patch).await?;

    Ok(command_response("update_config", applied))
}

pub async fn select_field_handler(
    State(state): State<AppState>,
    Json(payload): Json<SelectFieldRequest>,
) -> ApiResult<Json<FormCommandResponse>> {
    let field_id = payload.field_id()?;
    let applied = state.form_builder_service.select_field(field_id).await?;

    Ok(command_response("select_field", applied))
}
