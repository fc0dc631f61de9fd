/**
 * Error Conversion
 *
 * Maps `BackendError` onto HTTP responses so handlers can return it
 * directly. Error responses are JSON:
 *
 * ```json
 * {
 *   "error": "pin not found",
 *   "status": 404
 * }
 * ```
 */

use axum::{
    body::Body,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("internal error: {}", message);
        }

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap_or_else(
                |_| format!(r#"{{"error":"{}","status":{}}}"#, message, status.as_u16()),
            )))
            .unwrap_or_else(|_| {
                Response::builder()
                    .status(StatusCode::INTERNAL_SERVER_ERROR)
                    .body(Body::from("Internal Server Error"))
                    .unwrap()
            })
    }
}
