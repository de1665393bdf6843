//! # CaughtPokemonRepository
//!
//! 捕獲記録の永続化を担当するリポジトリ。
//!
//! (ユーザー, 図鑑エントリ) の組に一意制約はなく、同じポケモンの捕獲記録は
//! 複数行になる。解放はその組に属する全行をまとめて削除する。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pokecatch_domain::{
    pokemon::{CapturedPokemon, CaughtPokemon, CaughtPokemonId, Pokemon, PokemonId, PokemonName},
    user::UserId,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::InfraError;

#[async_trait]
pub trait CaughtPokemonRepository: Send + Sync {
    async fn insert(&self, caught: &CaughtPokemon) -> Result<(), InfraError>;

    /// ユーザーの捕獲記録を図鑑エントリ付きで捕獲日時順に取得する
    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<CapturedPokemon>, InfraError>;

    /// ユーザーが持つ指定エントリの捕獲記録をすべて削除し、削除件数を返す
    async fn delete_by_user_and_pokemon(
        &self,
        user_id: &UserId,
        pokemon_id: &PokemonId,
    ) -> Result<u64, InfraError>;
}

#[derive(Debug, sqlx::FromRow)]
struct CapturedRow {
    id:           Uuid,
    user_id:      Uuid,
    pokemon_id:   Uuid,
    caught_at:    DateTime<Utc>,
    pokemon_name: String,
}

impl TryFrom<CapturedRow> for CapturedPokemon {
    type Error = InfraError;

    fn try_from(row: CapturedRow) -> Result<Self, Self::Error> {
        let pokemon_id = PokemonId::from_uuid(row.pokemon_id);
        let name =
            PokemonName::new(row.pokemon_name).map_err(|e| InfraError::unexpected(e.to_string()))?;

        Ok(CapturedPokemon {
            caught:  CaughtPokemon::from_db(
                CaughtPokemonId::from_uuid(row.id),
                UserId::from_uuid(row.user_id),
                pokemon_id,
                row.caught_at,
            ),
            pokemon: Pokemon::new(pokemon_id, name),
        })
    }
}

/// PostgreSQL 実装の CaughtPokemonRepository
#[derive(Debug, Clone)]
pub struct PostgresCaughtPokemonRepository {
    pool: PgPool,
}

impl PostgresCaughtPokemonRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CaughtPokemonRepository for PostgresCaughtPokemonRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(user_id = %caught.user_id()))]
    async fn insert(&self, caught: &CaughtPokemon) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            INSERT INTO caught_pokemon (id, user_id, pokemon_id, caught_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(caught.id().as_uuid())
        .bind(caught.user_id().as_uuid())
        .bind(caught.pokemon_id().as_uuid())
        .bind(caught.caught_at())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%user_id))]
    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<CapturedPokemon>, InfraError> {
        let rows = sqlx::query_as::<_, CapturedRow>(
            r#"
            SELECT
                c.id,
                c.user_id,
                c.pokemon_id,
                c.caught_at,
                p.name AS pokemon_name
            FROM caught_pokemon c
            INNER JOIN pokemon p ON p.id = c.pokemon_id
            WHERE c.user_id = $1
            ORDER BY c.caught_at, c.id
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(CapturedPokemon::try_from).collect()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%user_id, %pokemon_id))]
    async fn delete_by_user_and_pokemon(
        &self,
        user_id: &UserId,
        pokemon_id: &PokemonId,
    ) -> Result<u64, InfraError> {
        let result = sqlx::query(
            r#"
            DELETE FROM caught_pokemon
            WHERE user_id = $1 AND pokemon_id = $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(pokemon_id.as_uuid())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
