//! 入力の抽出
//!
//! axum 標準の抽出器をラップし、拒否時も `ApiError` の JSON 形式で応答する。

use axum::extract::{FromRequest, FromRequestParts};

use super::error::ApiError;

/// JSON ボディ
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// パスパラメータ
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// クエリ文字列
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
