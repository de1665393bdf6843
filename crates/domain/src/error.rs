//! # ドメイン層エラー定義
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 入力値の検証失敗 |
//!
//! 存在しないエンティティや重複はドメイン層では判定せず、
//! ユースケースがリポジトリの結果から決める。
//!
//! ```rust
//! use pokecatch_domain::DomainError;
//!
//! let error = DomainError::Validation("Email is required".to_string());
//! assert_eq!(error.to_string(), "バリデーションエラー: Email is required");
//! ```

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// API 層でこのエラーを受け取り、HTTP レスポンスに変換する。
#[derive(Debug, Error)]
pub enum DomainError {
    /// 入力値がルールに違反している
    #[error("バリデーションエラー: {0}")]
    Validation(String),
}
