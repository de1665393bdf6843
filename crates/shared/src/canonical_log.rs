//! # Canonical Log Line
//!
//! 1リクエストにつき1行、メソッド・パス・ステータス・レイテンシをまとめた
//! サマリログを出力する tower Layer。
//!
//! `TraceLayer` の内側に置くと、リクエストスパンの `user_id`（認証済みの場合）が
//! 同じ行に載る。5xx は WARN、それ以外は INFO で出力する。

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};

use http::{Method, Request, Response, StatusCode};
use tower::{Layer, Service};

/// 既定で出力対象外とするパスの接頭辞
const DEFAULT_SKIP_PREFIXES: &[&str] = &["/health"];

/// サマリログを出力する Layer
///
/// ```text
/// TraceLayer → CanonicalLogLineLayer → [Bearer 認証] → handler
/// ```
#[derive(Clone, Debug)]
pub struct CanonicalLogLineLayer {
    skip_prefixes: &'static [&'static str],
}

impl Default for CanonicalLogLineLayer {
    fn default() -> Self {
        Self {
            skip_prefixes: DEFAULT_SKIP_PREFIXES,
        }
    }
}

impl CanonicalLogLineLayer {
    /// `/health` 配下を除外する Layer
    pub fn new() -> Self {
        Self::default()
    }

    /// 除外するパス接頭辞を差し替える
    ///
    /// 接頭辞はパスセグメント単位で比較する（`/health` は `/healthz` に一致しない）。
    pub fn skipping(skip_prefixes: &'static [&'static str]) -> Self {
        Self { skip_prefixes }
    }
}

impl<S> Layer<S> for CanonicalLogLineLayer {
    type Service = CanonicalLogLineService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CanonicalLogLineService {
            inner,
            skip_prefixes: self.skip_prefixes,
        }
    }
}

#[derive(Clone, Debug)]
pub struct CanonicalLogLineService<S> {
    inner:         S,
    skip_prefixes: &'static [&'static str],
}

fn is_skipped(prefixes: &[&str], path: &str) -> bool {
    prefixes.iter().any(|prefix| {
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}

/// 1行サマリの内容
struct RequestSummary {
    method:     Method,
    path:       String,
    started_at: Instant,
}

impl RequestSummary {
    fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.started_at.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn completed(&self, status: StatusCode) {
        let latency_ms = self.elapsed_ms();
        if status.is_server_error() {
            tracing::warn!(
                log.r#type = "canonical",
                http.method = %self.method,
                http.path = %self.path,
                http.status_code = status.as_u16(),
                http.latency_ms = latency_ms,
                "リクエスト完了"
            );
        } else {
            tracing::info!(
                log.r#type = "canonical",
                http.method = %self.method,
                http.path = %self.path,
                http.status_code = status.as_u16(),
                http.latency_ms = latency_ms,
                "リクエスト完了"
            );
        }
    }

    fn failed(&self, error: &dyn std::fmt::Display) {
        tracing::error!(
            log.r#type = "canonical",
            http.method = %self.method,
            http.path = %self.path,
            http.latency_ms = self.elapsed_ms(),
            error.message = %error,
            "リクエスト処理エラー"
        );
    }
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for CanonicalLogLineService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: std::fmt::Display + 'static,
    ReqBody: Send + 'static,
    ResBody: Send + 'static,
{
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;
    type Response = S::Response;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        // poll_ready 済みの inner を使い、代わりに clone を残す
        let ready = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, ready);

        if is_skipped(self.skip_prefixes, req.uri().path()) {
            return Box::pin(inner.call(req));
        }

        let summary = RequestSummary {
            method:     req.method().clone(),
            path:       req.uri().path().to_owned(),
            started_at: Instant::now(),
        };

        Box::pin(async move {
            let result = inner.call(req).await;
            match &result {
                Ok(response) => summary.completed(response.status()),
                Err(err) => summary.failed(err),
            }
            result
        })
    }
}
