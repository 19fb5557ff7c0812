use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;

use super::client::ApiClient;
use super::types::{ApiError, LoginRequest, SignupForm};
use crate::session;

fn envelope(status: u16, data: serde_json::Value) -> serde_json::Value {
    json!({ "statusCode": status, "data": data, "message": "ok" })
}

fn user_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "fullName": "Alice Example",
        "email": "alice@example.com",
        "username": "alice"
    })
}

fn api_client(server: &MockServer) -> ApiClient {
    ApiClient::new_with_base_url(server.url("/api/v1"))
}

#[tokio::test]
async fn login_with_valid_credentials_persists_tokens_and_user() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/users/login")
            .json_body(json!({ "email": "a@b.com", "password": "secret123" }));
        then.status(200).json_body(envelope(
            200,
            json!({ "accessToken": "T1", "refreshToken": "R1", "user": { "id": "u1", "username": "a" } }),
        ));
    });

    session::clear_session();
    let user = api_client(&server)
        .login(&LoginRequest::with_email("a@b.com", "secret123"))
        .await
        .unwrap();
    assert_eq!(user.id, "u1");
    assert_eq!(user.username, "a");

    let stored = session::load_session();
    assert_eq!(stored.access_token.as_deref(), Some("T1"));
    assert_eq!(stored.refresh_token.as_deref(), Some("R1"));
    assert_eq!(stored.user.unwrap().id, "u1");
}

#[tokio::test]
async fn rejected_login_maps_to_invalid_credentials_and_stores_nothing() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/api/v1/users/login");
        then.status(401).json_body(json!({
            "statusCode": 401,
            "data": null,
            "message": "Invalid user credentials"
        }));
    });

    session::clear_session();
    let error = api_client(&server)
        .login(&LoginRequest::with_email("a@b.com", "wrong"))
        .await
        .unwrap_err();
    assert_eq!(
        error,
        ApiError::InvalidCredentials("Invalid user credentials".into())
    );
    assert_eq!(session::load_session(), session::StoredSession::default());
}

#[tokio::test]
async fn server_error_without_envelope_maps_to_server() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/api/v1/users/login");
        then.status(500);
    });

    session::clear_session();
    let error = api_client(&server)
        .login(&LoginRequest::with_email("a@b.com", "secret123"))
        .await
        .unwrap_err();
    assert!(matches!(error, ApiError::Server(_)));
}

#[tokio::test]
async fn envelope_status_overrides_the_http_status_line() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/users/current-user");
        then.status(200).json_body(json!({
            "statusCode": 500,
            "data": null,
            "message": "internal failure"
        }));
    });

    session::clear_session();
    session::store_tokens("T1", "R1").unwrap();
    let error = api_client(&server).current_user().await.unwrap_err();
    assert_eq!(error, ApiError::Server("internal failure".into()));
}

#[tokio::test]
async fn concurrent_unauthorized_requests_share_one_refresh() {
    let server = MockServer::start_async().await;
    let expired = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/users/current-user")
            .header("authorization", "Bearer expired");
        then.status(401).json_body(envelope(401, json!(null)));
    });
    let refresh = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/users/refresh-token")
            .json_body(json!({ "refreshToken": "R1" }));
        then.status(200)
            .delay(Duration::from_millis(200))
            .json_body(envelope(
                200,
                json!({ "accessToken": "T2", "refreshToken": "R2" }),
            ));
    });
    let refreshed = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/users/current-user")
            .header("authorization", "Bearer T2");
        then.status(200).json_body(envelope(200, user_json("u1")));
    });

    session::clear_session();
    session::store_tokens("expired", "R1").unwrap();
    let api = api_client(&server);

    let (first, second) = tokio::join!(api.current_user(), api.current_user());
    assert_eq!(first.unwrap().id, "u1");
    assert_eq!(second.unwrap().id, "u1");

    refresh.assert_hits(1);
    expired.assert_hits(2);
    assert!(refreshed.hits() >= 2);

    let stored = session::load_session();
    assert_eq!(stored.access_token.as_deref(), Some("T2"));
    assert_eq!(stored.refresh_token.as_deref(), Some("R2"));
}

#[tokio::test]
async fn rejected_refresh_surfaces_the_original_401_and_clears_the_store() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/users/current-user");
        then.status(401).json_body(envelope(401, json!(null)));
    });
    let refresh = server.mock(|when, then| {
        when.method(POST).path("/api/v1/users/refresh-token");
        then.status(401).json_body(json!({
            "statusCode": 401,
            "data": null,
            "message": "refresh token expired"
        }));
    });

    session::clear_session();
    session::store_tokens("expired", "revoked").unwrap();
    let error = api_client(&server).current_user().await.unwrap_err();
    assert_eq!(error.status_code(), Some(401));
    refresh.assert_hits(1);
    assert_eq!(session::load_session(), session::StoredSession::default());
}

#[tokio::test]
async fn missing_refresh_token_fails_without_an_exchange_attempt() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/users/current-user");
        then.status(401).json_body(envelope(401, json!(null)));
    });
    let refresh = server.mock(|when, then| {
        when.method(POST).path("/api/v1/users/refresh-token");
        then.status(200).json_body(envelope(
            200,
            json!({ "accessToken": "T2", "refreshToken": "R2" }),
        ));
    });

    session::clear_session();
    crate::utils::storage::set_item(session::ACCESS_TOKEN_KEY, "expired").unwrap();
    let error = api_client(&server).current_user().await.unwrap_err();
    assert_eq!(error.status_code(), Some(401));
    refresh.assert_hits(0);
    assert_eq!(session::load_session(), session::StoredSession::default());
}

#[tokio::test]
async fn non_401_errors_pass_through_without_a_refresh() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/videos/missing");
        then.status(404).json_body(json!({
            "statusCode": 404,
            "data": null,
            "message": "video not found"
        }));
    });
    let refresh = server.mock(|when, then| {
        when.method(POST).path("/api/v1/users/refresh-token");
        then.status(200).json_body(envelope(
            200,
            json!({ "accessToken": "T2", "refreshToken": "R2" }),
        ));
    });

    session::clear_session();
    session::store_tokens("T1", "R1").unwrap();
    let error = api_client(&server).get_video("missing").await.unwrap_err();
    assert_eq!(
        error,
        ApiError::Api {
            status_code: 404,
            message: "video not found".into(),
        }
    );
    refresh.assert_hits(0);
}

#[tokio::test]
async fn logout_clears_the_store_even_when_the_backend_is_unreachable() {
    session::clear_session();
    session::store_tokens("T1", "R1").unwrap();

    // Port 1 is never listening; the request fails at the transport layer.
    let api = ApiClient::new_with_base_url("http://127.0.0.1:1/api/v1");
    api.logout().await;
    assert_eq!(session::load_session(), session::StoredSession::default());
}

#[tokio::test]
async fn register_returns_the_user_without_persisting_a_session() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/api/v1/users/register");
        then.status(201)
            .json_body(envelope(201, json!({ "user": user_json("u9") })));
    });

    session::clear_session();
    let form = SignupForm {
        full_name: "New User".into(),
        email: "new@example.com".into(),
        username: "newuser".into(),
        password: "secret123".into(),
        ..SignupForm::default()
    };
    let user = api_client(&server).register(form).await.unwrap();
    assert_eq!(user.id, "u9");
    assert_eq!(session::load_session(), session::StoredSession::default());
}

#[tokio::test]
async fn forgot_password_succeeds_on_an_empty_payload() {
    let server = MockServer::start_async().await;
    let reset = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/users/forgot-password")
            .json_body(json!({ "email": "a@b.com" }));
        then.status(200).json_body(envelope(200, json!(null)));
    });

    api_client(&server).forgot_password("a@b.com").await.unwrap();
    reset.assert_hits(1);
}

#[tokio::test]
async fn comment_posting_carries_the_bearer_token() {
    let server = MockServer::start_async().await;
    let post = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/comments/v1")
            .header("authorization", "Bearer T1")
            .json_body(json!({ "content": "great video" }));
        then.status(201).json_body(envelope(
            201,
            json!({
                "id": "c1",
                "content": "great video",
                "user": { "username": "alice" }
            }),
        ));
    });

    session::clear_session();
    session::store_tokens("T1", "R1").unwrap();
    let comment = api_client(&server)
        .post_comment("v1", "great video")
        .await
        .unwrap();
    assert_eq!(comment.id, "c1");
    post.assert_hits(1);
}
