use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Envelope every backend response is wrapped in. `statusCode` 200/201 marks
/// success regardless of the HTTP status line.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub status_code: u16,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Cached profile snapshot returned by the backend. The backend emits Mongo
/// style `_id` fields in some responses, hence the alias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// `data` payload of a successful login.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserRecord,
}

/// `data` payload of a successful registration. Register returns no tokens;
/// the user signs in explicitly afterwards.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    pub user: UserRecord,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub password: String,
}

impl LoginRequest {
    pub fn with_email(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            username: None,
            password: password.into(),
        }
    }

    pub fn with_username(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: None,
            username: Some(username.into()),
            password: password.into(),
        }
    }
}

/// Multipart signup payload; avatar and cover image are optional uploads.
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub password: String,
    pub avatar: Option<FileUpload>,
    pub cover_image: Option<FileUpload>,
}

#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub video_file: Option<String>,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub owner: Option<UserRecord>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentAuthor {
    pub username: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(alias = "_id")]
    pub id: String,
    pub content: String,
    pub user: CommentAuthor,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Error taxonomy surfaced by the API layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidCredentials(String),
    #[error("no refresh token stored")]
    NoRefreshToken,
    #[error("refresh token rejected: {0}")]
    RefreshRejected(String),
    #[error("request failed: {0}")]
    Network(String),
    #[error("server error: {0}")]
    Server(String),
    #[error("{message}")]
    Api { status_code: u16, message: String },
    #[error("storage unavailable: {0}")]
    Storage(String),
    #[error("unexpected response: {0}")]
    Unexpected(String),
}

impl ApiError {
    /// Credential endpoints report bad credentials as ordinary rejections;
    /// remap those onto the dedicated variant so views can tell them apart
    /// from transport and server failures.
    pub(crate) fn into_credential_error(self) -> Self {
        match self {
            ApiError::Api {
                status_code,
                message,
            } if matches!(status_code, 400 | 401 | 404) => ApiError::InvalidCredentials(message),
            other => other,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Api { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

use leptos::*;

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.to_string().into_view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn deserialize_user_record_accepts_mongo_id_alias() {
        let raw = r#"{"_id":"u1","fullName":"Alice","email":"a@b.com","username":"alice"}"#;
        let user: UserRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.full_name, "Alice");
        assert!(user.avatar.is_none());
    }

    #[wasm_bindgen_test]
    fn deserialize_user_record_with_minimal_fields() {
        let raw = r#"{"id":"u1","username":"a"}"#;
        let user: UserRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(user.id, "u1");
        assert!(user.full_name.is_empty());
        assert!(user.email.is_empty());
    }

    #[wasm_bindgen_test]
    fn deserialize_envelope_camel_case() {
        let raw = r#"{"statusCode":200,"data":{"accessToken":"T1","refreshToken":"R1"},"message":"ok"}"#;
        let envelope: ApiEnvelope<TokenPair> = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.status_code, 200);
        assert_eq!(envelope.data.unwrap().access_token, "T1");
    }

    #[wasm_bindgen_test]
    fn deserialize_envelope_with_null_data() {
        let raw = r#"{"statusCode":401,"data":null,"message":"Invalid user credentials"}"#;
        let envelope: ApiEnvelope<AuthPayload> = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.status_code, 401);
        assert!(envelope.data.is_none());
        assert_eq!(envelope.message.as_deref(), Some("Invalid user credentials"));
    }

    #[wasm_bindgen_test]
    fn serialize_login_request_skips_absent_identifier() {
        let request = LoginRequest::with_email("a@b.com", "secret123");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["email"], serde_json::json!("a@b.com"));
        assert!(value.get("username").is_none());
        assert_eq!(value["password"], serde_json::json!("secret123"));
    }
}
