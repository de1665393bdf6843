//! # API エラー定義
//!
//! ユースケースが返すエラーと、HTTP レスポンス（RFC 9457 Problem Details）への
//! 変換を定義する。
//!
//! | バリアント | HTTP ステータス |
//! |-----------|----------------|
//! | `BadRequest` | 400 |
//! | `Unauthorized` | 401 |
//! | `NotFound` | 404 |
//! | `Infra` / `Catalog` / `Internal` | 500 |
//!
//! 500 系はクライアントに詳細を返さず、原因を `tracing::error!` で記録する。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pokecatch_domain::DomainError;
use pokecatch_infra::InfraError;
use pokecatch_shared::ErrorResponse;
use thiserror::Error;

use crate::client::PokeApiError;

/// API で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),

    #[error("認証エラー: {0}")]
    Unauthorized(String),

    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    #[error("インフラエラー: {0}")]
    Infra(#[from] InfraError),

    /// PokeAPI の想定外の失敗（404 以外）
    #[error("PokeAPI エラー: {0}")]
    Catalog(#[source] PokeApiError),

    #[error("内部エラー: {0}")]
    Internal(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => Self::BadRequest(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match &self {
            ApiError::BadRequest(detail) => ErrorResponse::bad_request(detail.clone()),
            ApiError::Unauthorized(detail) => ErrorResponse::unauthorized(detail.clone()),
            ApiError::NotFound(detail) => ErrorResponse::not_found(detail.clone()),
            ApiError::Infra(e) => {
                tracing::error!(
                    error.category = "infrastructure",
                    error.kind = "infra",
                    span_trace = %e.span_trace(),
                    "インフラエラー: {}",
                    e
                );
                ErrorResponse::internal_error()
            }
            ApiError::Catalog(e) => {
                tracing::error!(
                    error.category = "external_service",
                    error.kind = "pokeapi",
                    "PokeAPI エラー: {}",
                    e
                );
                ErrorResponse::internal_error()
            }
            ApiError::Internal(msg) => {
                tracing::error!(
                    error.category = "internal",
                    error.kind = "internal",
                    "内部エラー: {}",
                    msg
                );
                ErrorResponse::internal_error()
            }
        };

        let status =
            StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[rstest]
    #[case(ApiError::BadRequest("x".into()), StatusCode::BAD_REQUEST)]
    #[case(ApiError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED)]
    #[case(ApiError::NotFound("x".into()), StatusCode::NOT_FOUND)]
    #[case(ApiError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR)]
    #[case(ApiError::Infra(InfraError::unexpected("x")), StatusCode::INTERNAL_SERVER_ERROR)]
    #[case(
        ApiError::Catalog(PokeApiError::Network("timeout".into())),
        StatusCode::INTERNAL_SERVER_ERROR
    )]
    #[tokio::test]
    async fn test_エラー種別ごとのステータスコード(
        #[case] error: ApiError,
        #[case] expected: StatusCode,
    ) {
        let response = error.into_response();

        assert_eq!(response.status(), expected);
        let json = body_json(response).await;
        assert_eq!(json["status"], expected.as_u16());
    }

    #[tokio::test]
    async fn test_404のdetailにメッセージが入る() {
        let response = ApiError::NotFound("Pokémon not found!".into()).into_response();

        let json = body_json(response).await;

        assert_eq!(json["title"], "Not Found");
        assert_eq!(json["detail"], "Pokémon not found!");
    }

    #[tokio::test]
    async fn test_500のdetailに内部情報を含めない() {
        let response = ApiError::Internal("connection refused at 10.0.0.5".into()).into_response();

        let json = body_json(response).await;

        assert_eq!(json["detail"], "Internal Server Error");
    }

    #[tokio::test]
    async fn test_検証エラーは400でメッセージをそのまま返す() {
        let error = ApiError::from(DomainError::Validation("Email is required".into()));

        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["detail"], "Email is required");
    }
}
