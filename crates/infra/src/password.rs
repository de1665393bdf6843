//! # パスワードハッシュ
//!
//! Argon2id によるパスワードのハッシュ化と検証を提供する。
//! コストパラメータ（メモリ量・反復回数）は設定から注入する。
//!
//! どちらも CPU を占有する処理のため、非同期コンテキストからは
//! `tokio::task::spawn_blocking` 経由で呼び出すこと。

use argon2::{
    Algorithm,
    Argon2,
    Params,
    PasswordHasher as _,
    PasswordVerifier as _,
    Version,
    password_hash::{PasswordHash as Argon2PasswordHash, SaltString, rand_core::OsRng},
};
use pokecatch_domain::password::{PasswordHash, PasswordVerifyResult, PlainPassword};

use crate::InfraError;

/// パスワードのハッシュ化を担当するトレイト
pub trait PasswordHasher: Send + Sync {
    /// ランダムなソルトでハッシュ化し、PHC 文字列を返す
    fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, InfraError>;
}

/// パスワード検証を担当するトレイト
pub trait PasswordChecker: Send + Sync {
    /// # Errors
    ///
    /// - 不正なハッシュ形式の場合
    fn verify(
        &self,
        password: &PlainPassword,
        hash: &PasswordHash,
    ) -> Result<PasswordVerifyResult, InfraError>;
}

/// Argon2id 実装
///
/// 並列度は 1 で固定する。検証時はハッシュ文字列に埋め込まれた
/// パラメータが使われるため、コスト変更後も既存ハッシュを検証できる。
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// # Errors
    ///
    /// Argon2 が受け付けないパラメータの場合（例: メモリ量が 8 KiB 未満）
    pub fn new(memory_kib: u32, iterations: u32) -> Result<Self, InfraError> {
        let params = Params::new(memory_kib, iterations, 1, None)
            .map_err(|e| InfraError::unexpected(format!("Argon2 パラメータが不正です: {e}")))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, InfraError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.expose().as_bytes(), &salt)
            .map_err(|e| InfraError::unexpected(format!("ハッシュ化に失敗しました: {e}")))?;

        Ok(PasswordHash::new(hash.to_string()))
    }
}

impl PasswordChecker for Argon2PasswordHasher {
    fn verify(
        &self,
        password: &PlainPassword,
        hash: &PasswordHash,
    ) -> Result<PasswordVerifyResult, InfraError> {
        let parsed = Argon2PasswordHash::new(hash.as_str())
            .map_err(|e| InfraError::unexpected(format!("不正なハッシュ形式: {e}")))?;

        let matched = self
            .argon2
            .verify_password(password.expose().as_bytes(), &parsed)
            .is_ok();

        Ok(PasswordVerifyResult::from(matched))
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    // テストでは最小コストを使う
    #[fixture]
    fn sut() -> Argon2PasswordHasher {
        Argon2PasswordHasher::new(8, 1).unwrap()
    }

    #[rstest]
    fn test_ハッシュ化したパスワードを検証できる(sut: Argon2PasswordHasher) {
        let password = PlainPassword::new("pikachu-i-choose-you");

        let hash = sut.hash(&password).unwrap();

        assert!(hash.as_str().starts_with("$argon2id$"));
        assert!(sut.verify(&password, &hash).unwrap().is_match());
    }

    #[rstest]
    fn test_異なるパスワードは不一致になる(sut: Argon2PasswordHasher) {
        let hash = sut.hash(&PlainPassword::new("correct")).unwrap();

        let result = sut.verify(&PlainPassword::new("wrong"), &hash).unwrap();

        assert!(result.is_mismatch());
    }

    #[rstest]
    fn test_同じパスワードでもソルトによりハッシュが異なる(sut: Argon2PasswordHasher) {
        let password = PlainPassword::new("same");

        let first = sut.hash(&password).unwrap();
        let second = sut.hash(&password).unwrap();

        assert_ne!(first, second);
    }

    #[rstest]
    fn test_不正なハッシュ形式はエラー(sut: Argon2PasswordHasher) {
        let result = sut.verify(
            &PlainPassword::new("password123"),
            &PasswordHash::new("not-a-valid-hash"),
        );

        assert!(result.is_err());
    }

    #[rstest]
    fn test_別コストで作ったハッシュも検証できる(sut: Argon2PasswordHasher) {
        let other = Argon2PasswordHasher::new(16, 2).unwrap();
        let password = PlainPassword::new("cost-changed");
        let hash = other.hash(&password).unwrap();

        assert!(sut.verify(&password, &hash).unwrap().is_match());
    }

    #[test]
    fn test_不正なパラメータはエラー() {
        assert!(Argon2PasswordHasher::new(0, 1).is_err());
        assert!(Argon2PasswordHasher::new(8, 0).is_err());
    }
}
