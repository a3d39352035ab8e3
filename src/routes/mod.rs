// Route exports
pub mod form;
pub mod predict;

use actix_web::{error, http::StatusCode, web, HttpResponse};

pub use predict::AppState;

use crate::models::ErrorResponse;

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl error::ResponseError for ErrorResponse {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    ErrorResponse {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Register every route plus the payload error handlers
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
        .app_data(web::FormConfig::default().error_handler(form::handle_form_payload_error))
        .service(
            web::scope("/api/v1")
                .configure(predict::configure),
        )
        .configure(form::configure);
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{body::to_bytes, test::TestRequest};

    #[actix_web::test]
    async fn test_json_payload_error_body() {
        let req = TestRequest::post().uri("/api/v1/predict").to_http_request();
        let err = handle_json_payload_error(error::JsonPayloadError::ContentType, &req);

        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let bytes = to_bytes(resp.into_body()).await.unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error, "invalid_json");
        assert_eq!(body.status_code, 400);
        assert!(body.message.starts_with("Invalid JSON"));
    }

    #[test]
    fn test_error_response_status() {
        let unprocessable = ErrorResponse {
            error: "unknown_category".to_string(),
            message: "Unknown category".to_string(),
            status_code: 422,
        };
        assert_eq!(
            error::ResponseError::status_code(&unprocessable),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(unprocessable.to_string(), "unknown_category: Unknown category");

        let bogus = ErrorResponse {
            status_code: 42,
            ..unprocessable
        };
        assert_eq!(error::ResponseError::status_code(&bogus), StatusCode::BAD_REQUEST);
    }
}
