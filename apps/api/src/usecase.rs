//! # ユースケース層
//!
//! ## 設計方針
//!
//! - **トレイトベースの設計**: ハンドラのテストでスタブに差し替えられるようにする
//! - **依存性注入**: リポジトリ・ハッシュ・トークン・PokeAPI クライアント・Clock を外部から注入
//! - **薄いハンドラ**: ハンドラは入出力の変換のみ、判断はユースケースに集約

pub mod auth;
pub mod pokemon;
pub mod user;

use async_trait::async_trait;
pub use auth::{AuthUseCaseImpl, LoginOutput, RegisterInput, RegisterOutcome};
use pokecatch_domain::{
    pokemon::CapturedPokemon,
    user::{User, UserId},
};
pub use pokemon::PokemonUseCaseImpl;
pub use user::UserUseCaseImpl;

use crate::error::ApiError;

/// 認証ユースケース
#[async_trait]
pub trait AuthUseCase: Send + Sync {
    /// ユーザーを登録する
    ///
    /// メールアドレスが登録済みの場合はエラーではなく
    /// [`RegisterOutcome::AlreadyExists`] を返す。
    async fn register(&self, input: RegisterInput) -> Result<RegisterOutcome, ApiError>;

    /// パスワードを検証し、アクセストークンを発行する
    async fn login(&self, email: &str, password: &str) -> Result<LoginOutput, ApiError>;

    /// Bearer トークンを検証し、ユーザー ID を返す
    async fn authorize(&self, token: &str) -> Result<UserId, ApiError>;
}

/// ユーザー一覧ユースケース
#[async_trait]
pub trait UserUseCase: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, ApiError>;
}

/// 捕獲・解放ユースケース
#[async_trait]
pub trait PokemonUseCase: Send + Sync {
    /// ポケモンを捕獲する
    async fn catch(&self, user_id: UserId, name: &str) -> Result<CapturedPokemon, ApiError>;

    /// 捕獲一覧を捕獲日時順に取得する
    async fn list_captured(&self, user_id: UserId) -> Result<Vec<CapturedPokemon>, ApiError>;

    /// 指定した名前の捕獲記録をすべて解放し、解放件数を返す
    async fn release(&self, user_id: UserId, name: &str) -> Result<u64, ApiError>;

    /// PokeAPI からポケモンの詳細を取得する
    async fn lookup_info(&self, name: &str) -> Result<serde_json::Value, ApiError>;
}
