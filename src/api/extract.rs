use axum::extract::FromRequest;

use super::error::ApiError;

/// JSONボディの抽出器
///
/// `axum::Json`と同じだが、ボディの読み取りやデシリアライズに失敗した場合は
/// 422ではなく`ApiError::InvalidBody`（400）として返す。
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);
