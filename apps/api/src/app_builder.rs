//! # アプリケーション構築
//!
//! ユースケースから State を組み立て、ルーターを構築する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post},
};
use pokecatch_shared::{canonical_log::CanonicalLogLineLayer, observability::make_request_span};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handler::{
        AuthState,
        PokemonState,
        ReadinessState,
        UserState,
        catch,
        health_check,
        list_captured,
        list_users,
        login,
        lookup_info,
        readiness_check,
        register,
        release,
    },
    middleware::require_bearer,
    usecase::{AuthUseCase, PokemonUseCase, UserUseCase},
};

/// ルーターが必要とするユースケース一式
pub struct AppDependencies {
    pub auth_usecase:    Arc<dyn AuthUseCase>,
    pub user_usecase:    Arc<dyn UserUseCase>,
    pub pokemon_usecase: Arc<dyn PokemonUseCase>,
    pub readiness_state: Arc<ReadinessState>,
}

/// ルーターを構築する
///
/// `/poke/*` は Bearer 認証ミドルウェアを通過したリクエストのみハンドラに届く。
pub fn build_app(deps: AppDependencies) -> Router {
    let auth_state = Arc::new(AuthState {
        usecase: deps.auth_usecase,
    });
    let user_state = Arc::new(UserState {
        usecase: deps.user_usecase,
    });
    let pokemon_state = Arc::new(PokemonState {
        usecase: deps.pokemon_usecase,
    });

    // レイヤー順序: 下に書いたものが外側
    // 1. CorsLayer（最外）: プリフライトは認証より先に応答する
    // 2. TraceLayer: リクエストスパンを作成（user_id は認証後に記録）
    // 3. CanonicalLogLineLayer: リクエスト完了時に1行サマリログを出力
    Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(deps.readiness_state),
        )
        .merge(
            Router::new()
                .route("/users", get(list_users))
                .with_state(user_state),
        )
        .merge(
            Router::new()
                .route("/pokeinfo/{name}", get(lookup_info))
                .with_state(pokemon_state.clone()),
        )
        .merge(
            Router::new()
                .route("/poke/catch", post(catch))
                .route("/poke/captured", get(list_captured))
                .route("/poke/release/{name}", delete(release))
                .layer(from_fn_with_state(auth_state.clone(), require_bearer))
                .with_state(pokemon_state),
        )
        .route("/register", post(register))
        .route("/login", post(login))
        .with_state(auth_state)
        .layer(CanonicalLogLineLayer::new())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
