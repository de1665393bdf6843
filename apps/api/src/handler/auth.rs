//! # 認証ハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /register` - ユーザー登録
//! - `POST /login` - ログイン（アクセストークン発行）

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use pokecatch_domain::password::PlainPassword;
use pokecatch_shared::MessageResponse;
use serde::{Deserialize, Serialize};

use crate::{
    error::ApiError,
    usecase::{AuthUseCase, RegisterInput, RegisterOutcome},
};

/// 認証ハンドラの共有状態
///
/// Bearer 認証ミドルウェアもこの State を使う。
pub struct AuthState {
    pub usecase: Arc<dyn AuthUseCase>,
}

// --- リクエスト/レスポンス型 ---

/// ユーザー登録リクエスト
///
/// 欠けたフィールドは空文字として扱い、ユースケースで 400 にする。
#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email:    String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name:     Option<String>,
}

/// ログインリクエスト
#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email:    String,
    #[serde(default)]
    pub password: String,
}

/// ログインレスポンス
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token:   String,
}

// --- ハンドラ ---

/// POST /register
///
/// 登録済みのメールアドレスでもエラーにはせず、200 でその旨を返す。
pub async fn register(
    State(state): State<Arc<AuthState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = req.email.clone();
    let outcome = state
        .usecase
        .register(RegisterInput {
            email:    req.email,
            password: PlainPassword::new(req.password),
            name:     req.name,
        })
        .await?;

    let message = match outcome {
        RegisterOutcome::Created(_) => format!("{email} created successfully"),
        RegisterOutcome::AlreadyExists => "Email already exists".to_string(),
    };

    Ok(Json(MessageResponse::new(message)))
}

/// POST /login
pub async fn login(
    State(state): State<Arc<AuthState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let output = state.usecase.login(&req.email, &req.password).await?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token:   output.token,
    }))
}
