use axum::Router;
use axum::routing::{delete, get, post, put};
use formsmith_core::AppError;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

mod cors;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let cors_layer = cors::build_cors_layer(frontend_url)?;

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route(
            "/api/catalog/fields",
            get(handlers::catalog::list_field_catalog_handler),
        )
        .route(
            "/api/templates",
            get(handlers::catalog::list_templates_handler),
        )
        .route(
            "/api/export/formats",
            get(handlers::catalog::list_export_formats_handler),
        )
        .route(
            "/api/document",
            get(handlers::document::get_document_handler),
        )
        .route(
            "/api/document/reset",
            post(handlers::document::reset_document_handler),
        )
        .route(
            "/api/document/template",
            post(handlers::document::load_template_handler),
        )
        .route(
            "/api/document/config",
            put(handlers::document::update_config_handler),
        )
        .route(
            "/api/document/selection",
            put(handlers::document::select_field_handler),
        )
        .route(
            "/api/document/fields",
            post(handlers::fields::add_field_handler),
        )
        .route(
            "/api/document/fields/reorder",
            post(handlers::fields::reorder_fields_handler),
        )
        .route(
            "/api/document/fields/{field_id}",
            delete(handlers::fields::remove_field_handler)
                .patch(handlers::fields::update_field_handler),
        )
        .route(
            "/api/document/fields/{field_id}/duplicate",
            post(handlers::fields::duplicate_field_handler),
        )
        .route(
            "/api/document/fields/{field_id}/validation",
            put(handlers::fields::set_validation_rule_handler),
        )
        .route(
            "/api/document/fields/{field_id}/validation/{kind}",
            delete(handlers::fields::clear_validation_rule_handler),
        )
        .route(
            "/api/document/fields/{field_id}/options",
            post(handlers::fields::add_option_handler),
        )
        .route(
            "/api/document/fields/{field_id}/options/{index}",
            delete(handlers::fields::remove_option_handler)
                .patch(handlers::fields::update_option_handler),
        )
        .route(
            "/api/document/export/{format}",
            get(handlers::export::export_document_handler),
        )
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state))
}
