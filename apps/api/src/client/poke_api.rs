//! # PokeAPI クライアント
//!
//! `GET {base}/pokemon/{name}` でポケモンの存在確認と詳細取得を行う。
//! リトライは行わない。タイムアウトは HTTP クライアント側で固定する。

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// リクエスト全体のタイムアウト
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// PokeAPI クライアントエラー
#[derive(Debug, Error)]
pub enum PokeApiError {
    /// 該当するポケモンがいない（404）
    #[error("ポケモンが見つかりません: {0}")]
    NotFound(String),

    /// 接続失敗・タイムアウト
    #[error("ネットワークエラー: {0}")]
    Network(String),

    /// 404 以外の失敗ステータス、レスポンスの解析失敗など
    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}

impl From<reqwest::Error> for PokeApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            PokeApiError::Network(err.to_string())
        } else {
            PokeApiError::Unexpected(err.to_string())
        }
    }
}

/// PokeAPI クライアントトレイト
#[async_trait]
pub trait PokeApiClient: Send + Sync {
    /// ポケモンの詳細を取得する
    ///
    /// 成功時は PokeAPI の JSON ドキュメントをそのまま返す。
    async fn fetch_pokemon(&self, name: &str) -> Result<serde_json::Value, PokeApiError>;
}

/// reqwest による PokeAPI クライアント実装
pub struct PokeApiClientImpl {
    base_url: String,
    client:   reqwest::Client,
}

impl PokeApiClientImpl {
    /// # 引数
    ///
    /// - `base_url`: PokeAPI のベース URL（例: `https://pokeapi.co/api/v2`）
    pub fn new(base_url: &str) -> Result<Self, PokeApiError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn pokemon_url(&self, name: &str) -> Result<reqwest::Url, PokeApiError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| PokeApiError::Unexpected(format!("不正なベース URL: {e}")))?;
        // 名前はパスセグメントとしてエスケープする
        url.path_segments_mut()
            .map_err(|()| PokeApiError::Unexpected("ベース URL にパスを付加できません".into()))?
            .push("pokemon")
            .push(name);
        Ok(url)
    }
}

#[async_trait]
impl PokeApiClient for PokeApiClientImpl {
    #[tracing::instrument(skip(self), level = "debug")]
    async fn fetch_pokemon(&self, name: &str) -> Result<serde_json::Value, PokeApiError> {
        let url = self.pokemon_url(name)?;

        let response = self.client.get(url).send().await?;

        match response.status() {
            status if status.is_success() => Ok(response.json::<serde_json::Value>().await?),
            reqwest::StatusCode::NOT_FOUND => Err(PokeApiError::NotFound(name.to_string())),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(PokeApiError::Unexpected(format!(
                    "予期しないステータス {status}: {body}"
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_ベースurlの末尾スラッシュを取り除く() {
        let sut = PokeApiClientImpl::new("https://pokeapi.co/api/v2/").unwrap();

        let url = sut.pokemon_url("pikachu").unwrap();

        assert_eq!(url.as_str(), "https://pokeapi.co/api/v2/pokemon/pikachu");
    }

    #[test]
    fn test_名前はパスセグメントとしてエスケープされる() {
        let sut = PokeApiClientImpl::new("https://pokeapi.co/api/v2").unwrap();

        let url = sut.pokemon_url("mr mime/../x").unwrap();

        assert_eq!(
            url.as_str(),
            "https://pokeapi.co/api/v2/pokemon/mr%20mime%2F..%2Fx"
        );
    }
}
