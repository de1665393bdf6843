//! # Bearer 認証ミドルウェア
//!
//! `Authorization: Bearer <token>` を検証し、成功したら
//! [`AuthenticatedUser`] をリクエスト拡張に格納してハンドラへ渡す。
//! トークンが無い・不正・期限切れの場合はハンドラを呼ばずに 401 を返す。
//!
//! ## 使い方
//!
//! ```rust,ignore
//! use axum::middleware::from_fn_with_state;
//!
//! Router::new()
//!     .route("/poke/captured", get(list_captured))
//!     .layer(from_fn_with_state(auth_state, require_bearer))
//! ```

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};
use pokecatch_domain::user::UserId;

use crate::{error::ApiError, handler::AuthState};

/// 認証済みユーザー
///
/// ハンドラでは `Extension<AuthenticatedUser>` で受け取る。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// `Authorization` ヘッダーから Bearer トークンを取り出す
///
/// スキーム名の大文字小文字は区別しない。
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Bearer 認証ミドルウェア
pub async fn require_bearer(
    State(state): State<Arc<AuthState>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(request.headers()).map(str::to_owned) else {
        return ApiError::Unauthorized("Missing bearer token".to_string()).into_response();
    };

    let user_id = match state.usecase.authorize(&token).await {
        Ok(user_id) => user_id,
        Err(e) => return e.into_response(),
    };

    tracing::Span::current().record("user_id", tracing::field::display(&user_id));
    request
        .extensions_mut()
        .insert(AuthenticatedUser { user_id });

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::{
        Extension,
        Router,
        http::{HeaderValue, Method, StatusCode},
        middleware::from_fn_with_state,
        routing::get,
    };
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tower::ServiceExt;

    use super::*;
    use crate::usecase::{AuthUseCase, LoginOutput, RegisterInput, RegisterOutcome};

    const VALID_TOKEN: &str = "valid-token";

    /// `VALID_TOKEN` のみ受け付けるスタブ
    struct StubAuthUseCase {
        user_id: UserId,
    }

    #[async_trait]
    impl AuthUseCase for StubAuthUseCase {
        async fn register(&self, _input: RegisterInput) -> Result<RegisterOutcome, ApiError> {
            unimplemented!()
        }

        async fn login(&self, _email: &str, _password: &str) -> Result<LoginOutput, ApiError> {
            unimplemented!()
        }

        async fn authorize(&self, token: &str) -> Result<UserId, ApiError> {
            if token == VALID_TOKEN {
                Ok(self.user_id)
            } else {
                Err(ApiError::Unauthorized("Invalid or expired token".to_string()))
            }
        }
    }

    async fn whoami(Extension(user): Extension<AuthenticatedUser>) -> String {
        user.user_id.to_string()
    }

    fn create_test_app(user_id: UserId) -> Router {
        let state = Arc::new(AuthState {
            usecase: Arc::new(StubAuthUseCase { user_id }),
        });

        Router::new()
            .route("/protected", get(whoami))
            .layer(from_fn_with_state(state, require_bearer))
    }

    fn request_with(authorization: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(Method::GET).uri("/protected");
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[rstest]
    #[case("Bearer valid-token")]
    #[case("bearer valid-token")]
    #[case("Bearer   valid-token  ")]
    fn test_bearer_tokenを取り出せる(#[case] value: &str) {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());

        assert_eq!(bearer_token(&headers), Some("valid-token"));
    }

    #[rstest]
    #[case("valid-token")]
    #[case("Basic dXNlcjpwYXNz")]
    #[case("Bearer ")]
    #[case("Bearer")]
    fn test_bearer以外のヘッダーはnone(#[case] value: &str) {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());

        assert_eq!(bearer_token(&headers), None);
    }

    #[tokio::test]
    async fn test_有効なトークンでハンドラに認証済みユーザーが渡る() {
        // Given
        let user_id = UserId::new();
        let sut = create_test_app(user_id);

        // When
        let response = sut
            .oneshot(request_with(Some("Bearer valid-token")))
            .await
            .unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(body, user_id.to_string());
    }

    #[rstest]
    #[case(None)]
    #[case(Some("Bearer forged-token"))]
    #[case(Some("Token valid-token"))]
    #[tokio::test]
    async fn test_トークンが無いか不正なら401(#[case] authorization: Option<&str>) {
        let sut = create_test_app(UserId::new());

        let response = sut.oneshot(request_with(authorization)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], 401);
    }
}
