//! # PokemonRepository
//!
//! 図鑑エントリの永続化を担当するリポジトリ。
//! 名前の一意性はデータベースの一意インデックスで保証する。

use async_trait::async_trait;
use pokecatch_domain::pokemon::{Pokemon, PokemonId, PokemonName};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::InfraError;

#[async_trait]
pub trait PokemonRepository: Send + Sync {
    /// 名前で図鑑エントリを検索する（完全一致）
    async fn find_by_name(&self, name: &PokemonName) -> Result<Option<Pokemon>, InfraError>;

    /// 図鑑エントリを登録する
    ///
    /// # Errors
    ///
    /// - 同名のエントリが既にある場合は Conflict（同時捕獲の競合を含む）
    async fn insert(&self, pokemon: &Pokemon) -> Result<(), InfraError>;
}

#[derive(Debug, sqlx::FromRow)]
struct PokemonRow {
    id:   Uuid,
    name: String,
}

impl TryFrom<PokemonRow> for Pokemon {
    type Error = InfraError;

    fn try_from(row: PokemonRow) -> Result<Self, Self::Error> {
        Ok(Pokemon::new(
            PokemonId::from_uuid(row.id),
            PokemonName::new(row.name).map_err(|e| InfraError::unexpected(e.to_string()))?,
        ))
    }
}

/// PostgreSQL 実装の PokemonRepository
#[derive(Debug, Clone)]
pub struct PostgresPokemonRepository {
    pool: PgPool,
}

impl PostgresPokemonRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PokemonRepository for PostgresPokemonRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(%name))]
    async fn find_by_name(&self, name: &PokemonName) -> Result<Option<Pokemon>, InfraError> {
        let row = sqlx::query_as::<_, PokemonRow>(
            r#"
            SELECT id, name
            FROM pokemon
            WHERE name = $1
            "#,
        )
        .bind(name.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Pokemon::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(name = %pokemon.name()))]
    async fn insert(&self, pokemon: &Pokemon) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            INSERT INTO pokemon (id, name)
            VALUES ($1, $2)
            "#,
        )
        .bind(pokemon.id().as_uuid())
        .bind(pokemon.name().as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| InfraError::from_insert(e, "Pokemon", pokemon.name().as_str()))?;

        Ok(())
    }
}
