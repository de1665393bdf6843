//! # ミドルウェア
//!
//! - `auth`: Bearer トークンの検証

pub mod auth;

pub use auth::{AuthenticatedUser, require_bearer};
