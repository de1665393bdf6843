//! # トレーシング初期化
//!
//! `LOG_FORMAT`（`json` / `pretty`）と `RUST_LOG` からサブスクライバーを組み立てる。
//! `tracing_error::ErrorLayer` を登録し、インフラ層エラーの `SpanTrace` に
//! 呼び出し経路が残るようにする。

use std::str::FromStr;

/// `RUST_LOG` 未設定時のフィルタ
pub const DEFAULT_LOG_FILTER: &str = "info,pokecatch=debug";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 1イベント1行の JSON（本番向け）
    Json,
    #[default]
    Pretty,
}

/// `LOG_FORMAT` に未知の値が指定された
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown LOG_FORMAT: {0:?}")]
pub struct UnknownLogFormat(pub String);

impl FromStr for LogFormat {
    type Err = UnknownLogFormat;

    /// 大文字小文字は区別しない
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            _ => Err(UnknownLogFormat(s.to_string())),
        }
    }
}

/// トレーシング初期化設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// ルートスパン `app` の `service` フィールド
    pub service_name: String,
    pub log_format:   LogFormat,
}

impl TracingConfig {
    pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            service_name: service_name.into(),
            log_format,
        }
    }

    /// `LOG_FORMAT` から読み取る
    ///
    /// 未設定・不正値は Pretty。サブスクライバー初期化前なので警告は stderr に出す。
    pub fn from_env(service_name: impl Into<String>) -> Self {
        let log_format = match std::env::var("LOG_FORMAT") {
            Ok(raw) => raw.parse().unwrap_or_else(|e: UnknownLogFormat| {
                eprintln!("WARNING: {e}, falling back to pretty");
                LogFormat::Pretty
            }),
            Err(_) => LogFormat::default(),
        };
        Self::new(service_name, log_format)
    }
}

/// グローバルサブスクライバーを登録し、サービス名を持つルートスパンに入る
///
/// 返り値のガードはプロセス終了まで保持すること。
#[cfg(feature = "observability")]
pub fn init_tracing(config: &TracingConfig) -> tracing::span::EnteredSpan {
    use tracing_subscriber::{Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    let fmt_layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(tracing_error::ErrorLayer::default())
        .init();

    tracing::info_span!("app", service = %config.service_name).entered()
}

/// `TraceLayer::make_span_with` 用のリクエストスパン
///
/// `user_id` は Bearer 認証ミドルウェアが検証後に記録する。
/// Authorization ヘッダーはスパンに含めない。
#[cfg(feature = "observability")]
pub fn make_request_span<B>(request: &http::Request<B>) -> tracing::Span {
    tracing::info_span!(
        "request",
        http.method = %request.method(),
        http.uri = %request.uri(),
        user_id = tracing::field::Empty,
    )
}
