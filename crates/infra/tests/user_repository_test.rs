//! UserRepository 統合テスト
//!
//! sqlx::test マクロがテストごとに空のデータベースを作成し、
//! マイグレーションを適用する。
//!
//! 実行方法:
//! ```bash
//! DATABASE_URL=postgres://localhost/pokecatch cargo test -p pokecatch-infra --test user_repository_test
//! ```

mod common;

use common::{build_user, insert_user};
use pokecatch_domain::user::Email;
use pokecatch_infra::repository::{PostgresUserRepository, UserRepository};
use pretty_assertions::assert_eq;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../migrations")]
async fn test_メールアドレスでユーザーを取得できる(pool: PgPool) {
    let inserted = insert_user(&pool, "ash@example.com").await;
    let sut = PostgresUserRepository::new(pool);

    let found = sut
        .find_by_email(&Email::new("ash@example.com").unwrap())
        .await
        .unwrap();

    assert_eq!(found, Some(inserted));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_存在しないメールアドレスはnoneを返す(pool: PgPool) {
    let sut = PostgresUserRepository::new(pool);

    let found = sut
        .find_by_email(&Email::new("nobody@example.com").unwrap())
        .await
        .unwrap();

    assert!(found.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_重複したメールアドレスの登録はconflictになる(pool: PgPool) {
    insert_user(&pool, "misty@example.com").await;
    let sut = PostgresUserRepository::new(pool);

    let err = sut
        .insert(&build_user("misty@example.com"))
        .await
        .unwrap_err();

    assert!(err.is_conflict());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_全ユーザーを取得できる(pool: PgPool) {
    insert_user(&pool, "ash@example.com").await;
    insert_user(&pool, "brock@example.com").await;
    let sut = PostgresUserRepository::new(pool);

    let users = sut.find_all().await.unwrap();

    assert_eq!(users.len(), 2);
}
