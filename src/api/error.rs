use crate::application::ServiceError;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub enum ApiError {
    /// アプリケーション層のエラー
    Service(ServiceError),
    /// Authorizationヘッダーがない、またはトークンが無効
    Unauthenticated,
    /// ボディ・パス・クエリを解釈できない
    InvalidRequest { status: StatusCode, message: String },
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError::Service(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = match self {
            ApiError::Unauthenticated => {
                let body = Json(ErrorResponse::new(
                    "UNAUTHENTICATED",
                    "A valid bearer token is required",
                ));
                return (StatusCode::UNAUTHORIZED, body).into_response();
            }
            ApiError::InvalidRequest { status, message } => {
                let body = Json(ErrorResponse::new("INVALID_REQUEST", message));
                return (status, body).into_response();
            }
            ApiError::Service(err) => err,
        };

        let (status, error_type) = match &err {
            // 404 Not Found - リクエストされたリソースが存在しない
            ServiceError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),

            // 422 Unprocessable Entity - 値が許容範囲外
            ServiceError::InvalidArgument(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_ARGUMENT")
            }

            // 401 / 403 - 認証・認可
            ServiceError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
            ServiceError::Unauthorized => (StatusCode::FORBIDDEN, "UNAUTHORIZED"),

            // 409 Conflict - 現在の状態と矛盾する
            ServiceError::DuplicateEmail => (StatusCode::CONFLICT, "DUPLICATE_EMAIL"),
            ServiceError::InvalidState(_) => (StatusCode::CONFLICT, "INVALID_STATE"),
            ServiceError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),

            // 500 Internal Server Error - システム障害
            // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            ServiceError::Repository(e) => {
                tracing::error!("Repository error: {}", e);
                return internal_error();
            }
            ServiceError::PasswordHash(e) => {
                tracing::error!("Password hasher error: {}", e);
                return internal_error();
            }
        };

        let body = Json(ErrorResponse::new(error_type, err.to_string()));
        (status, body).into_response()
    }
}

fn internal_error() -> Response {
    let body = Json(ErrorResponse::new(
        "INTERNAL_ERROR",
        "An unexpected error occurred",
    ));
    (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
}
