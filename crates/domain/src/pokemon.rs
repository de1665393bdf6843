//! # ポケモンと捕獲記録
//!
//! | 型 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`Pokemon`] | 図鑑エントリ | 名前で一意。初めて捕獲されたときに作られる |
//! | [`CaughtPokemon`] | 捕獲記録 | ユーザーが捕まえた1回分。同じポケモンを何度でも捕獲できる |
//! | [`CapturedPokemon`] | 捕獲一覧の1行 | 捕獲記録と図鑑エントリの結合 |
//!
//! 図鑑エントリは削除されない。捕獲記録は解放時に (ユーザー, 図鑑エントリ)
//! 単位でまとめて削除される。

use chrono::{DateTime, Utc};

use crate::{DomainError, user::UserId};

define_uuid_id! {
    /// 図鑑エントリ ID
    pub struct PokemonId;
}

define_uuid_id! {
    /// 捕獲記録 ID
    pub struct CaughtPokemonId;
}

/// ポケモン名（値オブジェクト）
///
/// 空白のみの名前は拒否する。それ以外は入力をそのまま保持し、
/// 大文字小文字の正規化も行わない。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PokemonName(String);

impl PokemonName {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.trim().is_empty() {
            return Err(DomainError::Validation(
                "ポケモン名は必須です".to_string(),
            ));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for PokemonName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 図鑑エントリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pokemon {
    id:   PokemonId,
    name: PokemonName,
}

impl Pokemon {
    pub fn new(id: PokemonId, name: PokemonName) -> Self {
        Self { id, name }
    }

    pub fn id(&self) -> &PokemonId {
        &self.id
    }

    pub fn name(&self) -> &PokemonName {
        &self.name
    }
}

/// 捕獲記録
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaughtPokemon {
    id:         CaughtPokemonId,
    user_id:    UserId,
    pokemon_id: PokemonId,
    caught_at:  DateTime<Utc>,
}

impl CaughtPokemon {
    /// 新しい捕獲記録を作成する
    ///
    /// `now` は呼び出し元の Clock から注入する。
    pub fn new(user_id: UserId, pokemon_id: PokemonId, now: DateTime<Utc>) -> Self {
        Self {
            id: CaughtPokemonId::new(),
            user_id,
            pokemon_id,
            caught_at: now,
        }
    }

    /// データベースから復元する
    pub fn from_db(
        id: CaughtPokemonId,
        user_id: UserId,
        pokemon_id: PokemonId,
        caught_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            pokemon_id,
            caught_at,
        }
    }

    pub fn id(&self) -> &CaughtPokemonId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn pokemon_id(&self) -> &PokemonId {
        &self.pokemon_id
    }

    pub fn caught_at(&self) -> DateTime<Utc> {
        self.caught_at
    }
}

/// 捕獲一覧の1行（捕獲記録 + 図鑑エントリ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedPokemon {
    pub caught:  CaughtPokemon,
    pub pokemon: Pokemon,
}
