//! # ユーザー
//!
//! ユーザーエンティティとそれに関連する値オブジェクトを定義する。
//!
//! ## 設計方針
//!
//! - **Newtype パターン**: UserId は UUID をラップし、型安全性を確保
//! - **不変性**: ユーザーは登録後に更新・削除されない
//! - **バリデーション**: 値オブジェクトの生成時に検証ロジックを実行
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use pokecatch_domain::{
//!     password::PasswordHash,
//!     user::{Email, User, UserId},
//! };
//!
//! let user = User::new(
//!     UserId::new(),
//!     Email::new("ash@example.com")?,
//!     Some("Ash".to_string()),
//!     PasswordHash::new("$argon2id$v=19$..."),
//! );
//!
//! assert_eq!(user.email().as_str(), "ash@example.com");
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

use crate::{DomainError, password::PasswordHash};

define_uuid_id! {
    /// ユーザー ID（UUID v7）
    ///
    /// トークンの `sub` クレームにはこの値の文字列表現が入る。
    pub struct UserId;
}

/// メールアドレスの最大長
const EMAIL_MAX_LENGTH: usize = 255;

/// メールアドレス（値オブジェクト）
///
/// `local@domain` 形式かつ 255 文字以内であることを生成時に検証する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// # エラー
    ///
    /// 空文字列、`@` を含まない、ローカル部/ドメイン部が空、長さ超過の場合は
    /// `DomainError::Validation` を返す。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスは必須です".to_string(),
            ));
        }

        let Some((local, domain)) = value.split_once('@') else {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        };

        if local.is_empty() || domain.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        }

        if value.len() > EMAIL_MAX_LENGTH {
            return Err(DomainError::Validation(format!(
                "メールアドレスは{EMAIL_MAX_LENGTH}文字以内である必要があります"
            )));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ユーザーエンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id:            UserId,
    email:         Email,
    name:          Option<String>,
    password_hash: PasswordHash,
}

impl User {
    pub fn new(
        id: UserId,
        email: Email,
        name: Option<String>,
        password_hash: PasswordHash,
    ) -> Self {
        Self {
            id,
            email,
            name,
            password_hash,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }
}
