use std::str::FromStr;

use axum::extract::{Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use formsmith_application::ExportFormat;
use tracing::info;

use crate::error::ApiResult;
use crate::state::AppState;

/// Returns generated source as a downloadable plain-text attachment.
pub async fn export_document_handler(
    State(state): State<AppState>,
    Path(format): Path<String>,
) -> ApiResult<Response> {
    let format = ExportFormat::from_str(format.as_str())?;
    let artifact = state.form_builder_service.export(format).await?;

    info!(
        format = format.as_str(),
        field_count = artifact.field_count(),
        bytes = artifact.content().len(),
        "exported form"
    );

    let disposition = format!("attachment; filename=\"{}\"", artifact.file_name());
    Ok((
        [
            (CONTENT_TYPE, "text/plain; charset=utf-8".to_owned()),
            (CONTENT_DISPOSITION, disposition),
        ],
        artifact.into_content(),
    )
        .into_response())
}
