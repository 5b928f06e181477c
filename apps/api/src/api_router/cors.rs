use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use formsmith_core::AppError;
use tower_http::cors::CorsLayer;

pub(super) fn build_cors_layer(frontend_url: &str) -> Result<CorsLayer, AppError> {
    Ok(CorsLayer::new()
        .allow_origin(
            HeaderValue::from_str(frontend_url)
                .map_err(|error| AppError::Validation(format!("invalid FRONTEND_URL: {error}")))?,
        )
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .expose_headers([CONTENT_DISPOSITION]))
}

#[cfg(test)]
mod tests {
    use formsmith_core::AppError;

    use super::build_cors_layer;

    #[test]
    fn rejects_origins_that_are_not_header_values() {
        assert!(build_cors_layer("http://localhost:3000").is_ok());
        assert!(matches!(
            build_cors_layer("http://bad\norigin"),
            Err(AppError::Validation(_))
        ));
    }
}
