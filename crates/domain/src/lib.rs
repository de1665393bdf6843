//! # PokeCatch ドメイン層
//!
//! ユーザー、ポケモン図鑑エントリ、捕獲記録のドメインモデルを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、外部 API）に一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメインエラー
//! - [`clock`] - 時刻プロバイダ
//! - [`password`] - パスワード関連の値オブジェクト
//! - [`user`] - ユーザーエンティティ
//! - [`pokemon`] - ポケモンと捕獲記録
//!
//! ## 使用例
//!
//! ```rust
//! use pokecatch_domain::{DomainError, pokemon::PokemonName};
//!
//! let name = PokemonName::new("pikachu").unwrap();
//! assert_eq!(name.as_str(), "pikachu");
//!
//! let err = PokemonName::new("   ").unwrap_err();
//! assert!(matches!(err, DomainError::Validation(_)));
//! ```

#[macro_use]
mod macros;

pub mod clock;
pub mod error;
pub mod password;
pub mod pokemon;
pub mod user;

pub use error::DomainError;
