//! # エラーレスポンス（RFC 9457 Problem Details）
//!
//! API が返すエラーボディはすべて [`ErrorResponse`] で表す。
//! axum への変換は API 層で行い、このクレートは axum に依存しない。

use serde::{Deserialize, Serialize};

/// `type` URI の接頭辞
const PROBLEM_TYPE_BASE: &str = "https://pokecatch.example.com/problems";

/// API が返す問題の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemKind {
    BadRequest,
    Unauthorized,
    NotFound,
    Internal,
}

impl ProblemKind {
    pub fn status(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::NotFound => 404,
            Self::Internal => 500,
        }
    }

    fn slug(self) -> &'static str {
        match self {
            Self::BadRequest => "bad-request",
            Self::Unauthorized => "unauthorized",
            Self::NotFound => "not-found",
            Self::Internal => "internal-error",
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::BadRequest => "Bad Request",
            Self::Unauthorized => "Unauthorized",
            Self::NotFound => "Not Found",
            Self::Internal => "Internal Server Error",
        }
    }
}

/// Problem Details ボディ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title:        String,
    pub status:       u16,
    pub detail:       String,
}

impl ErrorResponse {
    pub fn new(kind: ProblemKind, detail: impl Into<String>) -> Self {
        Self {
            problem_type: format!("{PROBLEM_TYPE_BASE}/{}", kind.slug()),
            title:        kind.title().to_string(),
            status:       kind.status(),
            detail:       detail.into(),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(ProblemKind::BadRequest, detail)
    }

    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::new(ProblemKind::Unauthorized, detail)
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(ProblemKind::NotFound, detail)
    }

    /// 500 の detail は固定文言にし、内部の原因は返さない
    pub fn internal_error() -> Self {
        Self::new(ProblemKind::Internal, "Internal Server Error")
    }
}
