use std::sync::Arc;

use axum::Json;
use axum::body::to_bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::IntoResponse;
use formsmith_application::FormBuilderService;
use formsmith_core::{AppError, FieldId};
use formsmith_infrastructure::InMemoryFormDocumentRepository;

use super::catalog::{
    list_export_formats_handler, list_field_catalog_handler, list_templates_handler,
};
use super::document::{
    get_document_handler, load_template_handler, reset_document_handler, select_field_handler,
    update_config_handler,
};
use super::export::export_document_handler;
use super::fields::{
    add_field_handler, add_option_handler, clear_validation_rule_handler,
    duplicate_field_handler, remove_field_handler, remove_option_handler,
    reorder_fields_handler, set_validation_rule_handler, update_field_handler,
    update_option_handler,
};
use super::health::health_handler;
use crate::dto::{
    AddFieldRequest, FormCommandResponse, LoadTemplateRequest, ReorderFieldsRequest,
    SelectFieldRequest, UpdateConfigRequest, UpdateFieldRequest, UpdateOptionRequest,
    ValidationRuleDto,
};
use crate::state::AppState;

fn test_state() -> AppState {
    AppState {
        form_builder_service: FormBuilderService::new(Arc::new(
            InMemoryFormDocumentRepository::new(),
        )),
    }
}

async fn add_field(state: &AppState, field_type: &str) -> String {
    let result = add_field_handler(
        State(state.clone()),
        Json(AddFieldRequest {
            field_type: field_type.to_owned(),
            index: None,
        }),
    )
    .await;
    let Ok((status, Json(response))) = result else {
        panic!("add_field_handler failed");
    };
    assert_eq!(status, StatusCode::CREATED);
    let Some(field_id) = response.created_field_id else {
        panic!("created field id missing");
    };
    field_id
}

fn unwrap_command(
    result: Result<Json<FormCommandResponse>, crate::error::ApiError>,
) -> FormCommandResponse {
    let Ok(Json(response)) = result else {
        panic!("handler returned an error");
    };
    response
}

#[tokio::test]
async fn health_reports_ok() {
    let Json(response) = health_handler().await;
    assert_eq!(response.status, "ok");
}

#[tokio::test]
async fn catalogs_list_static_content() {
    let state = test_state();

    let Json(fields) = list_field_catalog_handler(State(state.clone())).await;
    assert_eq!(fields.len(), 15);
    assert_eq!(fields[0].field_type, "text");

    let Json(templates) = list_templates_handler(State(state.clone())).await;
    assert!(templates.iter().any(|template| template.id == "contact"));

    let Json(formats) = list_export_formats_handler(State(state)).await;
    let names: Vec<&str> = formats.iter().map(|format| format.file_name.as_str()).collect();
    assert_eq!(names, vec!["form.html", "form.jsx", "form.vue"]);
}

#[tokio::test]
async fn add_update_and_remove_field() {
    let state = test_state();
    let field_id = add_field(&state, "email").await;

    let response = unwrap_command(
        update_field_handler(
            State(state.clone()),
            Path(field_id.clone()),
            Json(UpdateFieldRequest {
                label: Some("Work Email".to_owned()),
                placeholder: Some(None),
                ..UpdateFieldRequest::default()
            }),
        )
        .await,
    );
    assert!(response.changed);
    assert_eq!(response.document.fields[0].label, "Work Email");
    assert_eq!(response.document.fields[0].placeholder, None);

    let response = unwrap_command(
        remove_field_handler(State(state.clone()), Path(field_id)).await,
    );
    assert!(response.changed);
    assert!(response.document.fields.is_empty());
    assert_eq!(response.document.selected_field_id, None);
}

#[tokio::test]
async fn unknown_field_ids_are_no_ops() {
    let state = test_state();
    add_field(&state, "text").await;

    let response = unwrap_command(
        duplicate_field_handler(State(state.clone()), Path(FieldId::new().to_string())).await,
    );
    assert!(!response.changed);
    assert_eq!(response.document.fields.len(), 1);
}

#[tokio::test]
async fn malformed_input_is_rejected() {
    let state = test_state();

    let result = remove_field_handler(State(state.clone()), Path("not-an-id".to_owned())).await;
    assert!(matches!(result, Err(ref error) if matches!(error.0, AppError::Validation(_))));

    let result = add_field_handler(
        State(state.clone()),
        Json(AddFieldRequest {
            field_type: "slider".to_owned(),
            index: None,
        }),
    )
    .await;
    let Err(error) = result else {
        panic!("unknown field type must be rejected");
    };
    assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);

    let field_id = add_field(&state, "text").await;
    let result = clear_validation_rule_handler(
        State(state),
        Path((field_id, "length".to_owned())),
    )
    .await;
    assert!(matches!(result, Err(ref error) if matches!(error.0, AppError::Validation(_))));
}

#[tokio::test]
async fn duplicate_and_reorder() {
    let state = test_state();
    let first = add_field(&state, "text").await;
    let second = add_field(&state, "email").await;

    let response = unwrap_command(
        duplicate_field_handler(State(state.clone()), Path(first.clone())).await,
    );
    let Some(copy) = response.created_field_id else {
        panic!("duplicate must create a field");
    };
    assert_eq!(response.document.fields[1].id, copy);
    assert_eq!(response.document.selected_field_id, Some(copy.clone()));

    let response = unwrap_command(
        reorder_fields_handler(
            State(state),
            Json(ReorderFieldsRequest {
                active_id: second.clone(),
                over_id: first.clone(),
            }),
        )
        .await,
    );
    let order: Vec<String> = response
        .document
        .fields
        .iter()
        .map(|field| field.id.clone())
        .collect();
    assert_eq!(order, vec![second, first, copy]);
}

#[tokio::test]
async fn validation_rules_and_options() {
    let state = test_state();
    let field_id = add_field(&state, "radio").await;

    let response = unwrap_command(
        set_validation_rule_handler(
            State(state.clone()),
            Path(field_id.clone()),
            Json(ValidationRuleDto {
                kind: "required".to_owned(),
                value: None,
                message: None,
            }),
        )
        .await,
    );
    assert_eq!(response.document.fields[0].validation[0].kind, "required");

    let response = unwrap_command(
        clear_validation_rule_handler(
            State(state.clone()),
            Path((field_id.clone(), "required".to_owned())),
        )
        .await,
    );
    assert!(response.document.fields[0].validation.is_empty());

    let response =
        unwrap_command(add_option_handler(State(state.clone()), Path(field_id.clone())).await);
    assert_eq!(response.document.fields[0].options.len(), 4);
    assert_eq!(response.document.fields[0].options[3].value, "option4");

    let response = unwrap_command(
        update_option_handler(
            State(state.clone()),
            Path((field_id.clone(), 0)),
            Json(UpdateOptionRequest {
                label: Some("Yes".to_owned()),
                value: Some("yes".to_owned()),
            }),
        )
        .await,
    );
    assert_eq!(response.document.fields[0].options[0].label, "Yes");

    let response =
        unwrap_command(remove_option_handler(State(state.clone()), Path((field_id.clone(), 9))).await);
    assert!(!response.changed);

    let response = unwrap_command(remove_option_handler(State(state), Path((field_id, 1))).await);
    assert_eq!(response.document.fields[0].options.len(), 3);
}

#[tokio::test]
async fn document_level_commands() {
    let state = test_state();

    let response = unwrap_command(
        load_template_handler(
            State(state.clone()),
            Json(LoadTemplateRequest {
                template_id: "contact".to_owned(),
            }),
        )
        .await,
    );
    assert!(response.changed);
    assert_eq!(response.document.fields.len(), 3);
    let first_id = response.document.fields[0].id.clone();

    let response = unwrap_command(
        select_field_handler(
            State(state.clone()),
            Json(SelectFieldRequest {
                field_id: Some(first_id.clone()),
            }),
        )
        .await,
    );
    assert_eq!(response.document.selected_field_id, Some(first_id));

    let response = unwrap_command(
        update_config_handler(
            State(state.clone()),
            Json(UpdateConfigRequest {
                submit_type: Some("ajax".to_owned()),
                theme: Some("underline".to_owned()),
                ..UpdateConfigRequest::default()
            }),
        )
        .await,
    );
    assert_eq!(response.document.config.submit_type, "ajax");
    assert_eq!(response.document.config.theme, "underline");
    assert_eq!(response.document.config.action, "/submit");

    let response = unwrap_command(reset_document_handler(State(state.clone())).await);
    assert!(response.document.fields.is_empty());

    let Ok(Json(document)) = get_document_handler(State(state)).await else {
        panic!("get_document_handler failed");
    };
    assert_eq!(document.config.theme, "simple");
}

#[tokio::test]
async fn export_returns_a_plain_text_attachment() {
    let state = test_state();
    add_field(&state, "email").await;

    let result = export_document_handler(State(state), Path("react".to_owned())).await;
    let Ok(response) = result else {
        panic!("export failed");
    };

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("text/plain; charset=utf-8")
    );
    assert_eq!(
        response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok()),
        Some("attachment; filename=\"form.jsx\"")
    );

    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap_or_default();
    let content = String::from_utf8(body.to_vec()).unwrap_or_default();
    assert!(content.contains("export default function ContactForm()"));
    assert!(content.contains("name=\"email_address\""));
}

#[tokio::test]
async fn unknown_export_format_is_not_found() {
    let result = export_document_handler(State(test_state()), Path("svelte".to_owned())).await;
    let Err(error) = result else {
        panic!("unknown format must fail");
    };

    assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
}
