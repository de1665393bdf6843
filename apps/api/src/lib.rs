//! # PokeCatch API ライブラリ
//!
//! ユーザー登録・ログインと、ポケモンの捕獲・解放を提供する API サーバーの
//! コアモジュール。
//!
//! ## モジュール構成
//!
//! - `app_builder`: ルーター構築
//! - `client`: 外部 API クライアント（PokeAPI）
//! - `config`: 環境変数からの設定読み込み
//! - `error`: API エラーと HTTP レスポンスへの変換
//! - `handler`: HTTP ハンドラ
//! - `middleware`: ミドルウェア（Bearer 認証）
//! - `usecase`: ユースケース

pub mod app_builder;
pub mod client;
pub mod config;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod usecase;
