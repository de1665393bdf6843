//! # 認証ユースケース
//!
//! 登録・ログイン・トークン検証を実装する。
//!
//! パスワードのハッシュ化と検証は CPU を占有するため
//! `spawn_blocking` でブロッキングスレッドプールに逃がす。
//! サーバー側のセッション状態は持たない。

use std::sync::Arc;

use async_trait::async_trait;
use pokecatch_domain::{
    clock::Clock,
    password::PlainPassword,
    user::{Email, User, UserId},
};
use pokecatch_infra::{
    InfraError,
    PasswordChecker,
    PasswordHasher,
    TokenManager,
    repository::UserRepository,
};

use super::AuthUseCase;
use crate::error::ApiError;

/// ユーザー登録の入力
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub email:    String,
    pub password: PlainPassword,
    pub name:     Option<String>,
}

/// ユーザー登録の結果
///
/// 重複登録は失敗ではなく、区別された結果として返す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    Created(User),
    AlreadyExists,
}

/// ログイン成功時の出力
#[derive(Debug, Clone)]
pub struct LoginOutput {
    pub token: String,
}

/// 認証ユースケースの実装
pub struct AuthUseCaseImpl {
    user_repository:  Arc<dyn UserRepository>,
    password_hasher:  Arc<dyn PasswordHasher>,
    password_checker: Arc<dyn PasswordChecker>,
    token_manager:    Arc<dyn TokenManager>,
    clock:            Arc<dyn Clock>,
}

impl AuthUseCaseImpl {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        password_checker: Arc<dyn PasswordChecker>,
        token_manager: Arc<dyn TokenManager>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            password_checker,
            token_manager,
            clock,
        }
    }
}

/// CPU を占有する処理をブロッキングスレッドプールで実行する
async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, InfraError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(format!("ブロッキングタスクが失敗しました: {e}")))?
        .map_err(ApiError::from)
}

#[async_trait]
impl AuthUseCase for AuthUseCaseImpl {
    #[tracing::instrument(skip_all)]
    async fn register(&self, input: RegisterInput) -> Result<RegisterOutcome, ApiError> {
        if input.email.is_empty() || input.password.is_empty() {
            return Err(ApiError::BadRequest(
                "Email and password are required".to_string(),
            ));
        }
        let email = Email::new(input.email)?;

        let hasher = self.password_hasher.clone();
        let password = input.password;
        let password_hash = run_blocking(move || hasher.hash(&password)).await?;

        let user = User::new(UserId::new(), email, input.name, password_hash);
        match self.user_repository.insert(&user).await {
            Ok(()) => {
                tracing::info!(user_id = %user.id(), "ユーザーを登録しました");
                Ok(RegisterOutcome::Created(user))
            }
            Err(e) if e.is_conflict() => Ok(RegisterOutcome::AlreadyExists),
            Err(e) => Err(e.into()),
        }
    }

    #[tracing::instrument(skip_all)]
    async fn login(&self, email: &str, password: &str) -> Result<LoginOutput, ApiError> {
        let not_found = || ApiError::NotFound("User not found".to_string());

        // 形式不正なメールアドレスのユーザーは存在しえない
        let email = Email::new(email).map_err(|_| not_found())?;
        let user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or_else(not_found)?;

        let checker = self.password_checker.clone();
        let password = PlainPassword::new(password);
        let hash = user.password_hash().clone();
        let verified = run_blocking(move || checker.verify(&password, &hash)).await?;

        if verified.is_mismatch() {
            return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
        }

        let token = self.token_manager.issue(user.id(), self.clock.now())?;
        tracing::info!(user_id = %user.id(), "ログインしました");

        Ok(LoginOutput { token })
    }

    async fn authorize(&self, token: &str) -> Result<UserId, ApiError> {
        self.token_manager
            .verify(token)
            .and_then(|claims| claims.user_id())
            .map_err(|e| {
                tracing::debug!(error = %e, "トークン検証に失敗しました");
                ApiError::Unauthorized("Invalid or expired token".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use pokecatch_domain::{clock::ManualClock, password::PasswordHash};
    use pokecatch_infra::{Argon2PasswordHasher, JwtTokenManager, mock::MockUserRepository};
    use pretty_assertions::assert_eq;

    use super::*;

    const SECRET: &str = "test-secret";

    struct Fixture {
        sut:   AuthUseCaseImpl,
        users: MockUserRepository,
        jwt:   Arc<JwtTokenManager>,
    }

    fn fixture() -> Fixture {
        let users = MockUserRepository::new();
        let argon2 = Arc::new(Argon2PasswordHasher::new(8, 1).unwrap());
        let jwt = Arc::new(JwtTokenManager::new(SECRET, 3600).unwrap());
        let sut = AuthUseCaseImpl::new(
            Arc::new(users.clone()),
            argon2.clone(),
            argon2,
            jwt.clone(),
            Arc::new(ManualClock::new(Utc::now())),
        );
        Fixture { sut, users, jwt }
    }

    fn register_input(email: &str, password: &str) -> RegisterInput {
        RegisterInput {
            email:    email.to_string(),
            password: PlainPassword::new(password),
            name:     Some("Ash".to_string()),
        }
    }

    #[tokio::test]
    async fn test_register_成功() {
        // Given
        let f = fixture();

        // When
        let outcome = f
            .sut
            .register(register_input("ash@example.com", "pikachu"))
            .await
            .unwrap();

        // Then
        let RegisterOutcome::Created(user) = outcome else {
            panic!("Created を期待");
        };
        assert_eq!(user.email().as_str(), "ash@example.com");
        assert_eq!(user.name(), Some("Ash"));
        assert!(user.password_hash().as_str().starts_with("$argon2id$"));
        assert_eq!(f.users.count(), 1);
    }

    #[tokio::test]
    async fn test_register_同じメールアドレスはalready_exists() {
        // Given
        let f = fixture();
        f.sut
            .register(register_input("ash@example.com", "pikachu"))
            .await
            .unwrap();

        // When
        let outcome = f
            .sut
            .register(register_input("ash@example.com", "charizard"))
            .await
            .unwrap();

        // Then
        assert_eq!(outcome, RegisterOutcome::AlreadyExists);
        assert_eq!(f.users.count(), 1);
    }

    #[tokio::test]
    async fn test_register_必須項目が空ならbad_request() {
        let f = fixture();

        let no_email = f.sut.register(register_input("", "pikachu")).await;
        let no_password = f.sut.register(register_input("ash@example.com", "")).await;

        assert!(matches!(no_email, Err(ApiError::BadRequest(_))));
        assert!(matches!(no_password, Err(ApiError::BadRequest(_))));
        assert_eq!(f.users.count(), 0);
    }

    #[tokio::test]
    async fn test_register_形式不正のメールアドレスはbad_request() {
        let f = fixture();

        let result = f.sut.register(register_input("not-an-email", "pikachu")).await;

        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_login_成功でユーザーidを含むトークンを返す() {
        // Given
        let f = fixture();
        let RegisterOutcome::Created(user) = f
            .sut
            .register(register_input("ash@example.com", "pikachu"))
            .await
            .unwrap()
        else {
            panic!("登録に失敗");
        };

        // When
        let output = f.sut.login("ash@example.com", "pikachu").await.unwrap();

        // Then
        let claims = f.jwt.verify(&output.token).unwrap();
        assert_eq!(claims.user_id().unwrap(), *user.id());
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[tokio::test]
    async fn test_login_パスワード不一致はunauthorized() {
        let f = fixture();
        f.sut
            .register(register_input("ash@example.com", "pikachu"))
            .await
            .unwrap();

        let result = f.sut.login("ash@example.com", "raichu").await;

        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_login_未登録のメールアドレスはnot_found() {
        let f = fixture();

        let unknown = f.sut.login("gary@example.com", "eevee").await;
        let malformed = f.sut.login("gary", "eevee").await;

        assert!(matches!(unknown, Err(ApiError::NotFound(_))));
        assert!(matches!(malformed, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_login_壊れたハッシュは内部エラー() {
        let f = fixture();
        f.users.add_user(User::new(
            UserId::new(),
            Email::new("broken@example.com").unwrap(),
            None,
            PasswordHash::new("not-a-phc-string"),
        ));

        let result = f.sut.login("broken@example.com", "whatever").await;

        assert!(matches!(result, Err(ApiError::Infra(_))));
    }

    #[tokio::test]
    async fn test_authorize_有効なトークンからユーザーidを取り出す() {
        let f = fixture();
        let user_id = UserId::new();
        let token = f.jwt.issue(&user_id, Utc::now()).unwrap();

        let result = f.sut.authorize(&token).await.unwrap();

        assert_eq!(result, user_id);
    }

    #[tokio::test]
    async fn test_authorize_期限切れや別の鍵のトークンはunauthorized() {
        let f = fixture();
        let expired = f
            .jwt
            .issue(&UserId::new(), Utc::now() - Duration::hours(2))
            .unwrap();
        let foreign = JwtTokenManager::new("other-secret", 3600)
            .unwrap()
            .issue(&UserId::new(), Utc::now())
            .unwrap();

        for token in [expired.as_str(), foreign.as_str(), "garbage"] {
            let result = f.sut.authorize(token).await;
            assert!(
                matches!(result, Err(ApiError::Unauthorized(_))),
                "token={token}"
            );
        }
    }
}
