//! # ポケモンハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /poke/catch` - 捕獲（要認証）
//! - `GET /poke/captured` - 捕獲一覧（要認証）
//! - `DELETE /poke/release/{name}` - 解放（要認証）
//! - `GET /pokeinfo/{name}` - PokeAPI の詳細を中継
//!
//! 認証済みユーザーは [`crate::middleware::require_bearer`] が
//! リクエスト拡張に格納した [`AuthenticatedUser`] から受け取る。

use std::sync::Arc;

use axum::{
    Extension,
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use pokecatch_domain::{
    pokemon::{CapturedPokemon, CaughtPokemonId, PokemonId},
    user::UserId,
};
use pokecatch_shared::{ApiResponse, MessageResponse};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, middleware::AuthenticatedUser, usecase::PokemonUseCase};

/// ポケモンハンドラの共有状態
pub struct PokemonState {
    pub usecase: Arc<dyn PokemonUseCase>,
}

// --- リクエスト/レスポンス型 ---

/// 捕獲リクエスト
#[derive(Debug, Deserialize)]
pub struct CatchRequest {
    #[serde(default)]
    pub name: String,
}

/// 図鑑エントリ
#[derive(Debug, Serialize)]
pub struct PokemonData {
    pub id:   PokemonId,
    pub name: String,
}

/// 捕獲記録
#[derive(Debug, Serialize)]
pub struct CaughtPokemonData {
    pub id:         CaughtPokemonId,
    pub user_id:    UserId,
    pub pokemon_id: PokemonId,
    pub caught_at:  DateTime<Utc>,
    pub pokemon:    PokemonData,
}

impl From<&CapturedPokemon> for CaughtPokemonData {
    fn from(captured: &CapturedPokemon) -> Self {
        Self {
            id:         *captured.caught.id(),
            user_id:    *captured.caught.user_id(),
            pokemon_id: *captured.caught.pokemon_id(),
            caught_at:  captured.caught.caught_at(),
            pokemon:    PokemonData {
                id:   *captured.pokemon.id(),
                name: captured.pokemon.name().as_str().to_string(),
            },
        }
    }
}

/// 捕獲レスポンス
#[derive(Debug, Serialize)]
pub struct CatchResponse {
    pub message: String,
    pub data:    CaughtPokemonData,
}

// --- ハンドラ ---

/// POST /poke/catch
pub async fn catch(
    State(state): State<Arc<PokemonState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(req): Json<CatchRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let captured = state.usecase.catch(user.user_id, &req.name).await?;

    Ok(Json(CatchResponse {
        message: "The Pokémon is captured successfully".to_string(),
        data:    CaughtPokemonData::from(&captured),
    }))
}

/// GET /poke/captured
pub async fn list_captured(
    State(state): State<Arc<PokemonState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<impl IntoResponse, ApiError> {
    let captured = state.usecase.list_captured(user.user_id).await?;
    let data: Vec<CaughtPokemonData> = captured.iter().map(CaughtPokemonData::from).collect();

    Ok(Json(ApiResponse::new(data)))
}

/// DELETE /poke/release/{name}
pub async fn release(
    State(state): State<Arc<PokemonState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let released = state.usecase.release(user.user_id, &name).await?;
    tracing::debug!(released, "捕獲記録を解放しました");

    Ok(Json(MessageResponse::new(
        "Pokémon released from the captured list",
    )))
}

/// GET /pokeinfo/{name}
pub async fn lookup_info(
    State(state): State<Arc<PokemonState>>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let document = state.usecase.lookup_info(&name).await?;

    Ok(Json(ApiResponse::new(document)))
}
