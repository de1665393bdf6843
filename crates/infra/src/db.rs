//! # PostgreSQL データベース接続管理
//!
//! 接続プールの作成、マイグレーションの適用、疎通確認を行う。
//!
//! ```rust,ignore
//! use pokecatch_infra::db;
//!
//! let pool = db::create_pool("postgres://localhost/pokecatch").await?;
//! db::run_migrations(&pool).await?;
//! ```

use std::time::Duration;

use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::error::InfraError;

/// 最大接続数
const MAX_CONNECTIONS: u32 = 10;

/// 接続取得のタイムアウト
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// PostgreSQL 接続プールを作成する
///
/// アプリケーション起動時に一度だけ呼び出し、全リクエストで共有する。
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await
}

/// 埋め込まれたマイグレーションを順に適用する
///
/// 適用済みのものはスキップされる。ロールバックは提供しない。
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// データベースへの疎通を確認する（readiness 用）
pub async fn ping(pool: &PgPool) -> Result<(), InfraError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
