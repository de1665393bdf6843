//! # API レスポンスエンベロープ
//!
//! 公開 API の統一レスポンス形式を提供する。
//!
//! - 一覧・参照系: `{ "data": T }`
//! - 更新系: `{ "message": "..." }`、必要に応じて `data` を併記

use serde::{Deserialize, Serialize};

/// データを返す API の統一レスポンス型
///
/// ## 使用例
///
/// ```
/// use pokecatch_shared::ApiResponse;
///
/// let response = ApiResponse::new("pikachu");
/// assert_eq!(response.data, "pikachu");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// 新しい `ApiResponse` を作成する
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// メッセージのみを返す API のレスポンス型
///
/// ```
/// use pokecatch_shared::MessageResponse;
///
/// let response = MessageResponse::new("Login successful");
/// assert_eq!(response.message, "Login successful");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_serializeを正しいjson形状にする() {
        let response = ApiResponse::new("hello");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json, serde_json::json!({ "data": "hello" }));
    }

    #[test]
    fn test_vecペイロードをシリアライズする() {
        let response = ApiResponse::new(vec!["a", "b", "c"]);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json, serde_json::json!({ "data": ["a", "b", "c"] }));
    }

    #[test]
    fn test_message_responseはmessageフィールドのみを持つ() {
        let response = MessageResponse::new("Email already exists");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json, serde_json::json!({ "message": "Email already exists" }));
    }

    #[test]
    fn test_message_responseをデシリアライズできる() {
        let json = r#"{"message": "Login successful"}"#;
        let response: MessageResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.message, "Login successful");
    }
}
