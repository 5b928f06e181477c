use axum::Json;
use formsmith_application::AppliedCommand;
use formsmith_core::FieldId;
use tracing::warn;

use crate::dto::FormCommandResponse;
use crate::error::ApiResult;

pub mod catalog;
pub mod document;
pub mod export;
pub mod fields;
pub mod health;

#[cfg(test)]
mod tests;

fn parse_field_id(value: &str) -> ApiResult<FieldId> {
    Ok(FieldId::parse(value)?)
}

/// Wraps an applied command, noting commands that referenced nothing.
fn command_response(operation: &'static str, applied: AppliedCommand) -> Json<FormCommandResponse> {
    if !applied.outcome.changed {
        warn!(operation, "form command left the document unchanged");
    }

    Json(FormCommandResponse::from(applied))
}
