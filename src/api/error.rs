use crate::application::library::{ErrorKind, LibraryError};
use crate::domain::ParseIdError;
use axum::{
    Json,
    extract::rejection::JsonRejection,
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
    Library(LibraryError),
    /// パスやクエリの識別子が固定長16進テキストでない
    InvalidId {
        field: &'static str,
        source: ParseIdError,
    },
    /// リクエストボディが不正なJSON、または必須項目や型が合わない
    InvalidBody(JsonRejection),
    /// 取得系で対象が存在しない
    NotFound(&'static str),
}

impl ApiError {
    pub fn invalid_id(field: &'static str) -> impl FnOnce(ParseIdError) -> Self {
        move |source| ApiError::InvalidId { field, source }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection)
    }
}

impl From<LibraryError> for ApiError {
    fn from(err: LibraryError) -> Self {
        ApiError::Library(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            // 400 Bad Request - 識別子の形式が不正
            ApiError::InvalidId { field, source } => (
                StatusCode::BAD_REQUEST,
                "INVALID_ID",
                format!("invalid {}: {}", field, source),
            ),

            // 400 Bad Request - ボディの形式が不正
            ApiError::InvalidBody(rejection) => (
                StatusCode::BAD_REQUEST,
                "INVALID_BODY",
                rejection.body_text(),
            ),

            // 404 Not Found - リクエストされたリソースが存在しない
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", message.to_string())
            }

            ApiError::Library(err) => match err.kind() {
                // 400 Bad Request - 重複・参照先なし・前提条件違反
                ErrorKind::Conflict => (StatusCode::BAD_REQUEST, "CONFLICT", err.to_string()),
                ErrorKind::Precondition => (
                    StatusCode::BAD_REQUEST,
                    "PRECONDITION_FAILED",
                    err.to_string(),
                ),

                // 404 Not Found
                ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string()),

                // 500 Internal Server Error - システム障害
                // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
                // 503 Service Unavailable - 死活監視の失敗
                ErrorKind::Unavailable => {
                    tracing::error!(error = ?err, "health check failed");
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "SERVICE_UNAVAILABLE",
                        err.to_string(),
                    )
                }

                ErrorKind::Storage => {
                    tracing::error!(error = ?err, "storage error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "STORAGE_ERROR",
                        "An unexpected error occurred".to_string(),
                    )
                }
            },
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}
