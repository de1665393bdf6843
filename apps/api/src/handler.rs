//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置し、親モジュールで re-export する
//! - ハンドラは入出力の変換のみを行い、判断は usecase 層に委譲する
//!
//! ## ハンドラ一覧
//!
//! - `auth`: 登録・ログイン
//! - `user`: ユーザー一覧
//! - `pokemon`: 捕獲・一覧・解放・PokeAPI 参照
//! - `health`: ヘルスチェック

pub mod auth;
pub mod health;
pub mod pokemon;
pub mod user;

pub use auth::{AuthState, login, register};
pub use health::{ReadinessState, health_check, readiness_check};
pub use pokemon::{PokemonState, catch, list_captured, lookup_info, release};
pub use user::{UserState, list_users};
