//! # リポジトリ実装
//!
//! ユースケース層が依存するリポジトリトレイトと、その PostgreSQL 実装を提供する。
//!
//! クエリは実行時に検証される `sqlx::query_as` を使い、
//! 行は `sqlx::FromRow` 構造体で受けてからドメイン型へ復元する。

pub mod caught_pokemon_repository;
pub mod pokemon_repository;
pub mod user_repository;

pub use caught_pokemon_repository::{CaughtPokemonRepository, PostgresCaughtPokemonRepository};
pub use pokemon_repository::{PokemonRepository, PostgresPokemonRepository};
pub use user_repository::{PostgresUserRepository, UserRepository};
