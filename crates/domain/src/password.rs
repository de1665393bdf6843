//! # パスワード
//!
//! 平文は登録・ログインのリクエストからハッシュ化・検証に渡るまでの間だけ存在し、
//! 永続化されるのは Argon2id の PHC 文字列（[`PasswordHash`]）のみ。

use std::fmt;

/// 平文パスワード
///
/// 中身は [`PlainPassword::expose`] でのみ取り出せる。Debug 出力はマスクする。
#[derive(Clone)]
pub struct PlainPassword(String);

impl PlainPassword {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// ハッシュ化・検証に渡すための平文
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for PlainPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PlainPassword(***)")
    }
}

/// `users.password_hash` 列の値
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// ログイン時のパスワード照合結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordVerifyResult {
    Match,
    Mismatch,
}

impl PasswordVerifyResult {
    pub fn is_match(self) -> bool {
        self == Self::Match
    }

    pub fn is_mismatch(self) -> bool {
        self == Self::Mismatch
    }
}

impl From<bool> for PasswordVerifyResult {
    fn from(matched: bool) -> Self {
        match matched {
            true => Self::Match,
            false => Self::Mismatch,
        }
    }
}
