//! # ユーザーハンドラ
//!
//! - `GET /users` - 登録ユーザーの一覧（パスワードハッシュは含めない）

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use pokecatch_domain::user::{User, UserId};
use pokecatch_shared::ApiResponse;
use serde::Serialize;

use crate::{error::ApiError, usecase::UserUseCase};

/// ユーザーハンドラの共有状態
pub struct UserState {
    pub usecase: Arc<dyn UserUseCase>,
}

/// ユーザー一覧の1要素
#[derive(Debug, Serialize)]
pub struct UserData {
    pub id:    UserId,
    pub name:  Option<String>,
    pub email: String,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id:    *user.id(),
            name:  user.name().map(str::to_string),
            email: user.email().as_str().to_string(),
        }
    }
}

/// GET /users
pub async fn list_users(
    State(state): State<Arc<UserState>>,
) -> Result<impl IntoResponse, ApiError> {
    let users = state.usecase.list_users().await?;
    let data: Vec<UserData> = users.iter().map(UserData::from).collect();

    Ok(Json(ApiResponse::new(data)))
}
