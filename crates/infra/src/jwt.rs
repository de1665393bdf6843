//! # アクセストークン
//!
//! HS256 で署名した JWT を発行・検証する。
//! サーバー側にセッション状態は持たず、失効や更新の仕組みもない。
//!
//! ## クレーム
//!
//! | クレーム | 内容 |
//! |---------|------|
//! | `sub` | ユーザー ID（UUID 文字列） |
//! | `iat` | 発行時刻（Unix 秒） |
//! | `exp` | 有効期限（`iat` + TTL） |

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm,
    DecodingKey,
    EncodingKey,
    Header,
    Validation,
    decode,
    encode,
    errors::ErrorKind,
};
use pokecatch_domain::user::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::InfraError;

/// トークンのクレーム
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// `sub` をユーザー ID として解釈する
    pub fn user_id(&self) -> Result<UserId, InfraError> {
        Uuid::parse_str(&self.sub)
            .map(UserId::from_uuid)
            .map_err(|_| jsonwebtoken::errors::Error::from(ErrorKind::InvalidSubject).into())
    }
}

/// トークンの発行と検証を担当するトレイト
pub trait TokenManager: Send + Sync {
    /// `now` を発行時刻としてトークンを発行する
    fn issue(&self, user_id: &UserId, now: DateTime<Utc>) -> Result<String, InfraError>;

    /// 署名と有効期限を検証し、クレームを返す
    ///
    /// # Errors
    ///
    /// 形式不正、署名不一致、期限切れはいずれも [`InfraErrorKind::Token`](crate::InfraErrorKind::Token)
    fn verify(&self, token: &str) -> Result<Claims, InfraError>;
}

/// HS256 実装
pub struct JwtTokenManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation:   Validation,
    ttl:          Duration,
}

impl JwtTokenManager {
    /// # Errors
    ///
    /// `ttl_secs` が正でない、または `chrono::Duration` で表せない場合は
    /// [`InfraErrorKind::Unexpected`](crate::InfraErrorKind::Unexpected)
    pub fn new(secret: &str, ttl_secs: i64) -> Result<Self, InfraError> {
        let ttl = Duration::try_seconds(ttl_secs)
            .filter(|ttl| *ttl > Duration::zero())
            .ok_or_else(|| InfraError::unexpected(format!("トークンの有効期間が不正です: {ttl_secs}")))?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        })
    }
}

impl TokenManager for JwtTokenManager {
    fn issue(&self, user_id: &UserId, now: DateTime<Utc>) -> Result<String, InfraError> {
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    fn verify(&self, token: &str) -> Result<Claims, InfraError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }
}
