//! テスト共通フィクスチャ
//!
//! DB を使用する統合テストで共通利用するエンティティ生成ヘルパー。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use pokecatch_domain::{
    password::PasswordHash,
    pokemon::{Pokemon, PokemonId, PokemonName},
    user::{Email, User, UserId},
};
use pokecatch_infra::repository::{
    PokemonRepository,
    PostgresPokemonRepository,
    PostgresUserRepository,
    UserRepository,
};
use sqlx::PgPool;

/// テスト用のダミーハッシュ
pub const DUMMY_HASH: &str = "$argon2id$v=19$m=8,t=1,p=1$dGVzdHNhbHQ$dGVzdA";

pub fn build_user(email: &str) -> User {
    User::new(
        UserId::new(),
        Email::new(email).unwrap(),
        Some("Trainer".to_string()),
        PasswordHash::new(DUMMY_HASH),
    )
}

pub fn build_pokemon(name: &str) -> Pokemon {
    Pokemon::new(PokemonId::new(), PokemonName::new(name).unwrap())
}

/// ユーザーを登録して返す
pub async fn insert_user(pool: &PgPool, email: &str) -> User {
    let user = build_user(email);
    PostgresUserRepository::new(pool.clone())
        .insert(&user)
        .await
        .expect("ユーザー作成に失敗");
    user
}

/// 図鑑エントリを登録して返す
pub async fn insert_pokemon(pool: &PgPool, name: &str) -> Pokemon {
    let pokemon = build_pokemon(name);
    PostgresPokemonRepository::new(pool.clone())
        .insert(&pokemon)
        .await
        .expect("図鑑エントリ作成に失敗");
    pokemon
}
