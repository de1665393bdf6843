//! # テスト用モックリポジトリ
//!
//! ユースケース・ハンドラのテストで使用するインメモリモック。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! pokecatch-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! 一意制約（メールアドレス、ポケモン名）は PostgreSQL 実装と同じく
//! Conflict として返す。

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pokecatch_domain::{
    pokemon::{CapturedPokemon, CaughtPokemon, Pokemon, PokemonId, PokemonName},
    user::{Email, User, UserId},
};

use crate::{
    error::InfraError,
    repository::{CaughtPokemonRepository, PokemonRepository, UserRepository},
};

// ===== MockUserRepository =====

#[derive(Clone, Default)]
pub struct MockUserRepository {
    users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }

    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn insert(&self, user: &User) -> Result<(), InfraError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email() == user.email()) {
            return Err(InfraError::conflict("User", user.email().as_str()));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, InfraError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email() == email)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, InfraError> {
        Ok(self.users.lock().unwrap().clone())
    }
}

// ===== MockPokemonRepository =====

#[derive(Clone, Default)]
pub struct MockPokemonRepository {
    pokemon: Arc<Mutex<Vec<Pokemon>>>,
}

impl MockPokemonRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_pokemon(&self, pokemon: Pokemon) {
        self.pokemon.lock().unwrap().push(pokemon);
    }

    pub fn count(&self) -> usize {
        self.pokemon.lock().unwrap().len()
    }

    fn find_by_id(&self, id: &PokemonId) -> Option<Pokemon> {
        self.pokemon
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id() == id)
            .cloned()
    }
}

#[async_trait]
impl PokemonRepository for MockPokemonRepository {
    async fn find_by_name(&self, name: &PokemonName) -> Result<Option<Pokemon>, InfraError> {
        Ok(self
            .pokemon
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.name() == name)
            .cloned())
    }

    async fn insert(&self, pokemon: &Pokemon) -> Result<(), InfraError> {
        let mut entries = self.pokemon.lock().unwrap();
        if entries.iter().any(|p| p.name() == pokemon.name()) {
            return Err(InfraError::conflict("Pokemon", pokemon.name().as_str()));
        }
        entries.push(pokemon.clone());
        Ok(())
    }
}

// ===== MockCaughtPokemonRepository =====

/// 捕獲記録のモック
///
/// 一覧取得時の結合には共有した [`MockPokemonRepository`] を参照する。
#[derive(Clone)]
pub struct MockCaughtPokemonRepository {
    caught:  Arc<Mutex<Vec<CaughtPokemon>>>,
    pokemon: MockPokemonRepository,
}

impl MockCaughtPokemonRepository {
    pub fn new(pokemon: MockPokemonRepository) -> Self {
        Self {
            caught: Arc::new(Mutex::new(Vec::new())),
            pokemon,
        }
    }

    /// 指定ユーザーの捕獲記録件数
    pub fn count_by_user(&self, user_id: &UserId) -> usize {
        self.caught
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.user_id() == user_id)
            .count()
    }
}

#[async_trait]
impl CaughtPokemonRepository for MockCaughtPokemonRepository {
    async fn insert(&self, caught: &CaughtPokemon) -> Result<(), InfraError> {
        self.caught.lock().unwrap().push(caught.clone());
        Ok(())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<CapturedPokemon>, InfraError> {
        let mut rows: Vec<CaughtPokemon> = self
            .caught
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.user_id() == user_id)
            .cloned()
            .collect();
        rows.sort_by_key(|c| (c.caught_at(), *c.id().as_uuid()));

        rows.into_iter()
            .map(|caught| {
                let pokemon = self.pokemon.find_by_id(caught.pokemon_id()).ok_or_else(|| {
                    InfraError::unexpected(format!(
                        "図鑑エントリが存在しません: {}",
                        caught.pokemon_id()
                    ))
                })?;
                Ok(CapturedPokemon { caught, pokemon })
            })
            .collect()
    }

    async fn delete_by_user_and_pokemon(
        &self,
        user_id: &UserId,
        pokemon_id: &PokemonId,
    ) -> Result<u64, InfraError> {
        let mut caught = self.caught.lock().unwrap();
        let before = caught.len();
        caught.retain(|c| !(c.user_id() == user_id && c.pokemon_id() == pokemon_id));
        Ok((before - caught.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration};
    use pokecatch_domain::password::PasswordHash;
    use pretty_assertions::assert_eq;

    use super::*;

    fn pokemon(name: &str) -> Pokemon {
        Pokemon::new(PokemonId::new(), PokemonName::new(name).unwrap())
    }

    #[tokio::test]
    async fn test_同じメールアドレスの登録はconflictになる() {
        let sut = MockUserRepository::new();
        let email = Email::new("ash@example.com").unwrap();
        let user = |name: &str| {
            User::new(
                UserId::new(),
                email.clone(),
                Some(name.to_string()),
                PasswordHash::new("hash"),
            )
        };

        sut.insert(&user("Ash")).await.unwrap();
        let err = sut.insert(&user("Ash Ketchum")).await.unwrap_err();

        assert!(err.is_conflict());
        assert_eq!(sut.count(), 1);
    }

    #[tokio::test]
    async fn test_同じ名前の図鑑エントリはconflictになる() {
        let sut = MockPokemonRepository::new();

        sut.insert(&pokemon("eevee")).await.unwrap();
        let err = sut.insert(&pokemon("eevee")).await.unwrap_err();

        assert!(err.is_conflict());
        assert_eq!(sut.count(), 1);
    }

    #[tokio::test]
    async fn test_捕獲一覧は捕獲日時順で他ユーザーの記録を含まない() {
        let entries = MockPokemonRepository::new();
        let sut = MockCaughtPokemonRepository::new(entries.clone());
        let psyduck = pokemon("psyduck");
        let togepi = pokemon("togepi");
        entries.add_pokemon(psyduck.clone());
        entries.add_pokemon(togepi.clone());
        let misty = UserId::new();
        let brock = UserId::new();
        let base = DateTime::from_timestamp(1_700_000_000, 0).unwrap();

        sut.insert(&CaughtPokemon::new(misty, *togepi.id(), base + Duration::seconds(10)))
            .await
            .unwrap();
        sut.insert(&CaughtPokemon::new(misty, *psyduck.id(), base))
            .await
            .unwrap();
        sut.insert(&CaughtPokemon::new(brock, *psyduck.id(), base))
            .await
            .unwrap();

        let result = sut.find_by_user(&misty).await.unwrap();

        let names: Vec<&str> = result.iter().map(|r| r.pokemon.name().as_str()).collect();
        assert_eq!(names, vec!["psyduck", "togepi"]);
        assert!(result.iter().all(|r| r.caught.user_id() == &misty));
    }

    #[tokio::test]
    async fn test_解放は対象ユーザーの該当エントリのみ削除する() {
        let entries = MockPokemonRepository::new();
        let sut = MockCaughtPokemonRepository::new(entries.clone());
        let onix = pokemon("onix");
        entries.add_pokemon(onix.clone());
        let brock = UserId::new();
        let ash = UserId::new();
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        for _ in 0..3 {
            sut.insert(&CaughtPokemon::new(brock, *onix.id(), now))
                .await
                .unwrap();
        }
        sut.insert(&CaughtPokemon::new(ash, *onix.id(), now))
            .await
            .unwrap();

        let deleted = sut.delete_by_user_and_pokemon(&brock, onix.id()).await.unwrap();

        assert_eq!(deleted, 3);
        assert_eq!(sut.count_by_user(&brock), 0);
        assert_eq!(sut.count_by_user(&ash), 1);
    }
}
