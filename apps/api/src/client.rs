//! # 外部サービスクライアント
//!
//! 外部 API との通信を担当する。テスト時にスタブへ差し替えられるよう、
//! クライアントはトレイトで定義する。

pub mod poke_api;

pub use poke_api::{PokeApiClient, PokeApiClientImpl, PokeApiError};
