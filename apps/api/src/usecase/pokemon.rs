//! # 捕獲・解放ユースケース
//!
//! 図鑑エントリは名前で一意で、初めて捕獲されたときに作成される。
//! 捕獲記録は捕獲のたびに1行追加され、解放時に (ユーザー, エントリ) 単位で
//! まとめて削除される。
//!
//! ## 図鑑エントリの同時作成
//!
//! 同じ新しい名前を2つのリクエストが同時に捕獲すると、片方の INSERT は
//! 一意制約違反になる。負けた側は勝った側の行を読み直して使う。

use std::sync::Arc;

use async_trait::async_trait;
use pokecatch_domain::{
    clock::Clock,
    pokemon::{CapturedPokemon, CaughtPokemon, Pokemon, PokemonId, PokemonName},
    user::UserId,
};
use pokecatch_infra::repository::{CaughtPokemonRepository, PokemonRepository};

use super::PokemonUseCase;
use crate::{
    client::{PokeApiClient, PokeApiError},
    error::ApiError,
};

const POKEMON_NOT_FOUND: &str = "Pokémon not found!";
const NOT_IN_CAPTURED_LIST: &str = "This Pokémon name is not in the captured list";

/// 捕獲・解放ユースケースの実装
pub struct PokemonUseCaseImpl {
    pokemon_repository: Arc<dyn PokemonRepository>,
    caught_repository:  Arc<dyn CaughtPokemonRepository>,
    poke_api_client:    Arc<dyn PokeApiClient>,
    clock:              Arc<dyn Clock>,
    validate_on_catch:  bool,
}

impl PokemonUseCaseImpl {
    pub fn new(
        pokemon_repository: Arc<dyn PokemonRepository>,
        caught_repository: Arc<dyn CaughtPokemonRepository>,
        poke_api_client: Arc<dyn PokeApiClient>,
        clock: Arc<dyn Clock>,
        validate_on_catch: bool,
    ) -> Self {
        Self {
            pokemon_repository,
            caught_repository,
            poke_api_client,
            clock,
            validate_on_catch,
        }
    }

    /// PokeAPI に問い合わせ、404 を NotFound に、それ以外の失敗を 500 に変換する
    async fn fetch_from_catalog(&self, name: &str) -> Result<serde_json::Value, ApiError> {
        match self.poke_api_client.fetch_pokemon(name).await {
            Ok(document) => Ok(document),
            Err(PokeApiError::NotFound(_)) => Err(ApiError::NotFound(POKEMON_NOT_FOUND.to_string())),
            Err(e) => Err(ApiError::Catalog(e)),
        }
    }

    async fn find_or_create(&self, name: PokemonName) -> Result<Pokemon, ApiError> {
        if let Some(existing) = self.pokemon_repository.find_by_name(&name).await? {
            return Ok(existing);
        }

        let candidate = Pokemon::new(PokemonId::new(), name);
        match self.pokemon_repository.insert(&candidate).await {
            Ok(()) => {
                tracing::debug!(name = %candidate.name(), "図鑑エントリを作成しました");
                Ok(candidate)
            }
            Err(e) if e.is_conflict() => self
                .pokemon_repository
                .find_by_name(candidate.name())
                .await?
                .ok_or_else(|| {
                    ApiError::Internal(format!(
                        "一意制約違反後に図鑑エントリが見つかりません: {}",
                        candidate.name()
                    ))
                }),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl PokemonUseCase for PokemonUseCaseImpl {
    #[tracing::instrument(skip(self))]
    async fn catch(&self, user_id: UserId, name: &str) -> Result<CapturedPokemon, ApiError> {
        let name = PokemonName::new(name)
            .map_err(|_| ApiError::BadRequest("Pokemon name is required".to_string()))?;

        if self.validate_on_catch {
            self.fetch_from_catalog(name.as_str()).await?;
        }

        let pokemon = self.find_or_create(name).await?;
        let caught = CaughtPokemon::new(user_id, *pokemon.id(), self.clock.now());
        self.caught_repository.insert(&caught).await?;

        tracing::info!(pokemon = %pokemon.name(), "ポケモンを捕獲しました");
        Ok(CapturedPokemon { caught, pokemon })
    }

    #[tracing::instrument(skip(self))]
    async fn list_captured(&self, user_id: UserId) -> Result<Vec<CapturedPokemon>, ApiError> {
        Ok(self.caught_repository.find_by_user(&user_id).await?)
    }

    #[tracing::instrument(skip(self))]
    async fn release(&self, user_id: UserId, name: &str) -> Result<u64, ApiError> {
        let not_listed = || ApiError::NotFound(NOT_IN_CAPTURED_LIST.to_string());

        let name = PokemonName::new(name).map_err(|_| not_listed())?;
        let pokemon = self
            .pokemon_repository
            .find_by_name(&name)
            .await?
            .ok_or_else(not_listed)?;

        let released = self
            .caught_repository
            .delete_by_user_and_pokemon(&user_id, pokemon.id())
            .await?;

        tracing::info!(pokemon = %pokemon.name(), released, "ポケモンを解放しました");
        Ok(released)
    }

    #[tracing::instrument(skip(self))]
    async fn lookup_info(&self, name: &str) -> Result<serde_json::Value, ApiError> {
        self.fetch_from_catalog(name).await
    }
}
