//! # ヘルスチェック共通型
//!
//! - `GET /health`: [`HealthResponse`]（プロセスが応答できれば常に `healthy`）
//! - `GET /health/ready`: [`ReadinessResponse`]（依存先ごとのチェック結果）

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Liveness レスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status:  String,
    /// 呼び出し側クレートの `CARGO_PKG_VERSION`
    pub version: String,
}

impl HealthResponse {
    pub fn healthy(version: impl Into<String>) -> Self {
        Self {
            status:  "healthy".to_string(),
            version: version.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Ok,
    Error,
}

impl From<bool> for CheckStatus {
    fn from(passed: bool) -> Self {
        if passed { Self::Ok } else { Self::Error }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessStatus {
    Ready,
    NotReady,
}

/// Readiness レスポンス
///
/// チェックが1つでも `error` なら `not_ready`。チェック名は辞書順で出力する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub status: ReadinessStatus,
    pub checks: BTreeMap<String, CheckStatus>,
}

impl ReadinessResponse {
    pub fn from_checks<I, K>(checks: I) -> Self
    where
        I: IntoIterator<Item = (K, CheckStatus)>,
        K: Into<String>,
    {
        let checks: BTreeMap<String, CheckStatus> =
            checks.into_iter().map(|(name, s)| (name.into(), s)).collect();
        let status = if checks.values().all(|s| *s == CheckStatus::Ok) {
            ReadinessStatus::Ready
        } else {
            ReadinessStatus::NotReady
        };
        Self { status, checks }
    }

    pub fn is_ready(&self) -> bool {
        self.status == ReadinessStatus::Ready
    }
}
