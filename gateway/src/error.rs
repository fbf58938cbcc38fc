//! 转码错误 → HTTP 响应

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use expense_errors::AppError;
use tracing::{error, warn};

/// gateway 返回给 HTTP 调用方的错误
///
/// 响应体为 `application/problem+json`。
#[derive(Debug)]
pub struct GatewayError(pub AppError);

impl From<tonic::Status> for GatewayError {
    fn from(status: tonic::Status) -> Self {
        Self(AppError::from_status(&status))
    }
}

impl From<JsonRejection> for GatewayError {
    fn from(rejection: JsonRejection) -> Self {
        Self(AppError::validation(rejection.body_text()))
    }
}

impl From<AppError> for GatewayError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let problem = self.0.to_problem_details();
        let status =
            StatusCode::from_u16(problem.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        } else {
            warn!(error = %self.0, "Request rejected");
        }

        (
            status,
            [(header::CONTENT_TYPE, "application/problem+json")],
            Json(problem),
        )
            .into_response()
    }
}
