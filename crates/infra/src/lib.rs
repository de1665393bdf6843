//! # PokeCatch インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL への接続プール管理とマイグレーション
//! - **リポジトリ実装**: ユーザー・図鑑エントリ・捕獲記録の永続化
//! - **パスワードハッシュ**: Argon2id によるハッシュ化と検証
//! - **トークン**: HS256 JWT の発行と検証
//!
//! ## 依存関係
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL データベース接続管理
//! - [`error`] - インフラ層エラー定義
//! - [`jwt`] - アクセストークン
//! - [`password`] - パスワードハッシュ
//! - [`repository`] - リポジトリ実装
//! - `mock` - インメモリモック（`test-utils` feature）

pub mod db;
pub mod error;
pub mod jwt;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod password;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
pub use jwt::{Claims, JwtTokenManager, TokenManager};
pub use password::{Argon2PasswordHasher, PasswordChecker, PasswordHasher};
