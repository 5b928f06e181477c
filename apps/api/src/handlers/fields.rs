use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use formsmith_domain::{FieldType, ValidationKind};

use crate::dto::{
    AddFieldRequest, FormCommandResponse, ReorderFieldsRequest, UpdateFieldRequest,
    UpdateOptionRequest, ValidationRuleDto,
};
use crate::error::ApiResult;
use crate::state::AppState;

use super::{command_response, parse_field_id};

pub async fn add_field_handler(
    State(state): State<AppState>,
    Json(payload): Json<AddFieldRequest>,
) -> ApiResult<(StatusCode, Json<FormCommandResponse>)> {
    let field_type = FieldType::from_str(payload.field_type.as_str())?;
    let applied = state
        .form_builder_service
        .add_field(field_type, payload.index)
        .await?;

    Ok((StatusCode::CREATED, command_response("add_field", applied)))
}

pub async fn reorder_fields_handler(
    State(state): State<AppState>,
    Json(payload): Json<ReorderFieldsRequest>,
) -> ApiResult<Json<FormCommandResponse>> {
    let (active_id, over_id) = payload.field_ids()?;
    let applied = state
        .form_builder_service
        .reorder_fields(active_id, over_id)
        .await?;

    Ok(command_response("reorder_fields", applied))
}

pub async fn update_field_handler(
    State(state): State<AppState>,
    Path(field_id): Path<String>,
    Json(payload): Json<UpdateFieldRequest>,
) -> ApiResult<Json<FormCommandResponse>> {
    let field_id = parse_field_id(field_id.as_str())?;
    let patch = payload.into_patch()?;
    let applied = state
        .form_builder_service
        .update_field(field_id, patch)
        .await?;

    Ok(command_response("update_field", applied))
}

pub async fn remove_field_handler(
    State(state): State<AppState>,
    Path(field_id): Path<String>,
) -> ApiResult<Json<FormCommandResponse>> {
    let field_id = parse_field_id(field_id.as_str())?;
    let applied = state.form_builder_service.remove_field(field_id).await?;

    Ok(command_response("remove_field", applied))
}

pub async fn duplicate_field_handler(
    State(state): State<AppState>,
    Path(field_id): Path<String>,
) -> ApiResult<Json<FormCommandResponse>> {
    let field_id = parse_field_id(field_id.as_str())?;
    let applied = state.form_builder_service.duplicate_field(field_id).await?;

    Ok(command_response("duplicate_field", applied))
}

pub async fn set_validation_rule_handler(
    State(state): State<AppState>,
    Path(field_id): Path<String>,
    Json(payload): Json<ValidationRuleDto>,
) -> ApiResult<Json<FormCommandResponse>> {
    let field_id = parse_field_id(field_id.as_str())?;
    let rule = payload.into_rule()?;
    let applied = state
        .form_builder_service
        .set_validation_rule(field_id, rule)
        .await?;

    Ok(command_response("set_validation_rule", applied))
}

pub async fn clear_validation_rule_handler(
    State(state): State<AppState>,
    Path((field_id, kind)): Path<(String, String)>,
) -> ApiResult<Json<FormCommandResponse>> {
    let field_id = parse_field_id(field_id.as_str())?;
    let kind = ValidationKind::from_str(kind.as_str())?;
    let applied = state
        .form_builder_service
        .clear_validation_rule(field_id, kind)
        .await?;

    Ok(command_response("clear_validation_rule", applied))
}

pub async fn add_option_handler(
    State(state): State<AppState>,
    Path(field_id): Path<String>,
) -> ApiResult<Json<FormCommandResponse>> {
    let field_id = parse_field_id(field_id.as_str())?;
    let applied = state.form_builder_service.add_option(field_id).await?;

    Ok(command_response("add_option", applied))
}

pub async fn update_option_handler(
    State(state): State<AppState>,
    Path((field_id, index)): Path<(String, usize)>,
    Json(payload): Json<UpdateOptionRequest>,
) -> ApiResult<Json<FormCommandResponse>> {
    let field_id = parse_field_id(field_id.as_str())?;
    let applied = state
        .form_builder_service
        .update_option(field_id, index, payload.label, payload.value)
        .await?;

    Ok(command_response("update_option", applied))
}

pub async fn remove_option_handler(
    State(state): State<AppState>,
    Path((field_id, index)): Path<(String, usize)>,
) -> ApiResult<Json<FormCommandResponse>> {
    let field_id = parse_field_id(field_id.as_str())?;
    let applied = state
        .form_builder_service
        .remove_option(field_id, index)
        .await?;

    Ok(command_response("remove_option", applied))
}
