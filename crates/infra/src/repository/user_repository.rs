//! # UserRepository
//!
//! ユーザー情報の永続化を担当するリポジトリ。
//! メールアドレスの重複は一意インデックスで検出し、
//! [`InfraErrorKind::Conflict`](crate::InfraErrorKind::Conflict) として返す。

use async_trait::async_trait;
use pokecatch_domain::{
    password::PasswordHash,
    user::{Email, User, UserId},
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::InfraError;

/// ユーザーリポジトリトレイト
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// ユーザーを登録する
    ///
    /// # Errors
    ///
    /// - メールアドレスが登録済みの場合は Conflict
    async fn insert(&self, user: &User) -> Result<(), InfraError>;

    /// メールアドレスでユーザーを検索する
    ///
    /// - `Ok(Some(user))`: 見つかった
    /// - `Ok(None)`: 見つからない
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, InfraError>;

    /// 全ユーザーを登録順に取得する
    async fn find_all(&self) -> Result<Vec<User>, InfraError>;
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id:            Uuid,
    email:         String,
    name:          Option<String>,
    password_hash: String,
}

impl TryFrom<UserRow> for User {
    type Error = InfraError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User::new(
            UserId::from_uuid(row.id),
            Email::new(row.email).map_err(|e| InfraError::unexpected(e.to_string()))?,
            row.name,
            PasswordHash::new(row.password_hash),
        ))
    }
}

/// PostgreSQL 実装の UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(&self, user: &User) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, name, password_hash)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.email().as_str())
        .bind(user.name())
        .bind(user.password_hash().as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| InfraError::from_insert(e, "User", user.email().as_str()))?;

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, InfraError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, name, password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<User>, InfraError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, name, password_hash
            FROM users
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(User::try_from).collect()
    }
}
