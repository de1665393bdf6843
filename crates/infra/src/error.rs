//! # インフラ層エラー
//!
//! PostgreSQL・JWT・Argon2 の失敗を [`InfraError`] にまとめる。
//! 種別は [`InfraErrorKind`] で判別し、生成時点の呼び出し経路を [`SpanTrace`] で保持する。
//! 500 を返す前に API 層がこの `SpanTrace` をログに出す。

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
///
/// 登録時のメールアドレス重複や図鑑エントリ作成の競合は
/// [`is_conflict()`](InfraError::is_conflict) で判別する。
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// SQL の実行失敗、接続エラーなど
    #[error("データベースエラー: {0}")]
    Database(#[source] sqlx::Error),

    /// トークンの署名・検証失敗
    ///
    /// 署名不一致、期限切れ、形式不正のいずれもこの種別になる。
    #[error("トークンエラー: {0}")]
    Token(#[source] jsonwebtoken::errors::Error),

    /// 一意制約違反
    #[error("既に存在します: {entity}({key})")]
    Conflict {
        /// エンティティ名（例: "User"）
        entity: String,
        /// 重複したキー
        key:    String,
    },

    /// 上記に分類できないエラー
    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}

impl InfraError {
    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// 一意制約違反かどうか
    pub fn is_conflict(&self) -> bool {
        matches!(self.kind, InfraErrorKind::Conflict { .. })
    }

    /// トークン検証失敗かどうか
    pub fn is_token(&self) -> bool {
        matches!(self.kind, InfraErrorKind::Token(_))
    }

    // ===== Convenience constructors =====

    pub fn conflict(entity: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            kind:       InfraErrorKind::Conflict {
                entity: entity.into(),
                key:    key.into(),
            },
            span_trace: SpanTrace::capture(),
        }
    }

    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self {
            kind:       InfraErrorKind::Unexpected(msg.into()),
            span_trace: SpanTrace::capture(),
        }
    }

    /// INSERT の失敗を変換する
    ///
    /// 一意制約違反は [`InfraErrorKind::Conflict`]、それ以外は
    /// [`InfraErrorKind::Database`] になる。
    pub fn from_insert(source: sqlx::Error, entity: &str, key: &str) -> Self {
        let unique_violation = source
            .as_database_error()
            .is_some_and(|db_err| db_err.is_unique_violation());

        if unique_violation {
            Self::conflict(entity, key)
        } else {
            source.into()
        }
    }
}

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

// ===== From 実装（SpanTrace 自動キャプチャ） =====

impl From<sqlx::Error> for InfraError {
    fn from(source: sqlx::Error) -> Self {
        Self {
            kind:       InfraErrorKind::Database(source),
            span_trace: SpanTrace::capture(),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for InfraError {
    fn from(source: jsonwebtoken::errors::Error) -> Self {
        Self {
            kind:       InfraErrorKind::Token(source),
            span_trace: SpanTrace::capture(),
        }
    }
}
