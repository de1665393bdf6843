//! # API サーバー設定
//!
//! 環境変数から API サーバーの設定を読み込む。
//! 必須項目の欠落や不正な値は [`ConfigError`] として返し、起動を中止させる。

use std::env;

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;
/// トークン有効期間の上限（365 日）
const MAX_TOKEN_TTL_SECS: i64 = 365 * 24 * 60 * 60;
const DEFAULT_PASSWORD_HASH_MEMORY_KIB: u32 = 19_456;
const DEFAULT_PASSWORD_HASH_ITERATIONS: u32 = 2;
const DEFAULT_POKEAPI_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    #[error("{name} の値が不正です: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Argon2 のコストパラメータ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHashConfig {
    pub memory_kib: u32,
    pub iterations: u32,
}

/// API サーバーの設定
#[derive(Clone)]
pub struct ApiConfig {
    /// バインドアドレス
    pub host:                      String,
    /// ポート番号
    pub port:                      u16,
    /// データベース接続 URL
    pub database_url:              String,
    /// トークン署名用の秘密鍵
    pub jwt_secret:                String,
    /// トークンの有効期間（秒、1 以上 365 日以下）
    pub token_ttl_secs:            i64,
    pub password_hash:             PasswordHashConfig,
    /// PokeAPI のベース URL
    pub pokeapi_base_url:          String,
    /// 捕獲前に PokeAPI で名前を確認するか
    pub pokeapi_validate_on_catch: bool,
}

// 秘密鍵と接続 URL はログに出さない
impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("password_hash", &self.password_hash)
            .field("pokeapi_base_url", &self.pokeapi_base_url)
            .field("pokeapi_validate_on_catch", &self.pokeapi_validate_on_catch)
            .finish()
    }
}

impl ApiConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// 空文字列は未設定として扱う。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &'static str| lookup(name).filter(|v| !v.is_empty());
        let require = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        Ok(Self {
            host:                      get("API_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port:                      parse("API_PORT", require("API_PORT")?)?,
            database_url:              require("DATABASE_URL")?,
            jwt_secret:                require("JWT_SECRET")?,
            token_ttl_secs:            token_ttl_secs(get("TOKEN_TTL_SECS"))?,
            password_hash:             PasswordHashConfig {
                memory_kib: parse_or(
                    "PASSWORD_HASH_MEMORY_KIB",
                    get("PASSWORD_HASH_MEMORY_KIB"),
                    DEFAULT_PASSWORD_HASH_MEMORY_KIB,
                )?,
                iterations: parse_or(
                    "PASSWORD_HASH_ITERATIONS",
                    get("PASSWORD_HASH_ITERATIONS"),
                    DEFAULT_PASSWORD_HASH_ITERATIONS,
                )?,
            },
            pokeapi_base_url:          get("POKEAPI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_POKEAPI_BASE_URL.to_string()),
            pokeapi_validate_on_catch: parse_or(
                "POKEAPI_VALIDATE_ON_CATCH",
                get("POKEAPI_VALIDATE_ON_CATCH"),
                true,
            )?,
        })
    }
}

fn parse<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}

fn token_ttl_secs(value: Option<String>) -> Result<i64, ConfigError> {
    let ttl = parse_or("TOKEN_TTL_SECS", value, DEFAULT_TOKEN_TTL_SECS)?;
    if (1..=MAX_TOKEN_TTL_SECS).contains(&ttl) {
        Ok(ttl)
    } else {
        Err(ConfigError::Invalid {
            name:  "TOKEN_TTL_SECS",
            value: ttl.to_string(),
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    value.map_or(Ok(default), |v| parse(name, v))
}
