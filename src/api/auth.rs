use std::cell::RefCell;

use futures::future::{FutureExt, LocalBoxFuture, Shared};
use serde_json::json;

use super::client::ApiClient;
use super::types::{
    ApiError, AuthPayload, FileUpload, LoginRequest, RegisterPayload, SignupForm, TokenPair,
    UserRecord,
};
use crate::{session, state, utils};

impl ApiClient {
    pub async fn login(&self, request: &LoginRequest) -> Result<UserRecord, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .http_client()
            .post(format!("{base_url}/users/login"))
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let payload: AuthPayload = Self::read_envelope(response)
            .await
            .map_err(ApiError::into_credential_error)?;
        session::save_session(&payload.access_token, &payload.refresh_token, &payload.user)?;
        Ok(payload.user)
    }

    /// Registers a new account. The backend returns no tokens from register,
    /// so nothing is persisted; the user signs in explicitly afterwards.
    pub async fn register(&self, form: SignupForm) -> Result<UserRecord, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .http_client()
            .post(format!("{base_url}/users/register"))
            .multipart(multipart_form(form)?)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let payload: RegisterPayload = Self::read_envelope(response)
            .await
            .map_err(ApiError::into_credential_error)?;
        Ok(payload.user)
    }

    pub async fn current_user(&self) -> Result<UserRecord, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                self.http_client()
                    .get(format!("{base_url}/users/current-user"))
            })
            .await?;
        Self::read_envelope(response).await
    }

    /// Best-effort backend notification; the local session is cleared
    /// regardless of the outcome.
    pub async fn logout(&self) {
        let base_url = self.resolved_base_url().await;
        let request = self
            .authorized(self.http_client().post(format!("{base_url}/users/logout")));
        if let Err(err) = request.send().await {
            log::warn!("logout request failed: {err}");
        }
        session::clear_session();
    }

    pub async fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .http_client()
            .post(format!("{base_url}/users/forgot-password"))
            .json(&json!({ "email": email }))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::expect_success(response).await
    }
}

fn multipart_form(form: SignupForm) -> Result<reqwest::multipart::Form, ApiError> {
    let mut parts = reqwest::multipart::Form::new()
        .text("fullName", form.full_name)
        .text("email", form.email)
        .text("username", form.username)
        .text("password", form.password);
    if let Some(avatar) = form.avatar {
        parts = parts.part("avatar", file_part(avatar)?);
    }
    if let Some(cover) = form.cover_image {
        parts = parts.part("coverImage", file_part(cover)?);
    }
    Ok(parts)
}

fn file_part(upload: FileUpload) -> Result<reqwest::multipart::Part, ApiError> {
    reqwest::multipart::Part::bytes(upload.bytes)
        .file_name(upload.file_name)
        .mime_str(&upload.mime_type)
        .map_err(|e| ApiError::Unexpected(format!("invalid upload mime type: {e}")))
}

type SharedRefresh = Shared<LocalBoxFuture<'static, Result<String, ApiError>>>;

thread_local! {
    static IN_FLIGHT_REFRESH: RefCell<Option<SharedRefresh>> = const { RefCell::new(None) };
}

/// Exchanges the stored refresh token for a new token pair. Concurrent
/// callers attach to the single in-flight exchange instead of starting a
/// second one: the backend rotates refresh tokens on use, and a parallel
/// exchange would orphan one of the callers.
pub(crate) async fn refresh_access_token(client: &ApiClient) -> Result<String, ApiError> {
    if let Some(in_flight) = IN_FLIGHT_REFRESH.with(|slot| slot.borrow().clone()) {
        return in_flight.await;
    }
    let owned = client.clone();
    let exchange: SharedRefresh = async move { perform_refresh(&owned).await }
        .boxed_local()
        .shared();
    IN_FLIGHT_REFRESH.with(|slot| *slot.borrow_mut() = Some(exchange.clone()));
    let result = exchange.await;
    IN_FLIGHT_REFRESH.with(|slot| *slot.borrow_mut() = None);
    result
}

async fn perform_refresh(client: &ApiClient) -> Result<String, ApiError> {
    let Some(refresh_token) = session::refresh_token() else {
        session::clear_session();
        state::auth::broadcast_signed_out();
        return Err(ApiError::NoRefreshToken);
    };
    let base_url = client.resolved_base_url().await;
    match exchange_refresh_token(client, &base_url, &refresh_token).await {
        Ok(pair) => {
            if let Err(err) = session::store_tokens(&pair.access_token, &pair.refresh_token) {
                session::clear_session();
                state::auth::broadcast_signed_out();
                return Err(err);
            }
            match fetch_user_with_token(client, &base_url, &pair.access_token).await {
                Ok(user) => {
                    if let Err(err) = session::store_user(&user) {
                        log::warn!("failed to persist refreshed user record: {err}");
                    }
                    state::auth::broadcast_signed_in(user);
                }
                Err(err) => log::warn!("current-user re-fetch after refresh failed: {err}"),
            }
            Ok(pair.access_token)
        }
        Err(err) => {
            log::warn!("token refresh failed, clearing session: {err}");
            session::clear_session();
            state::auth::broadcast_signed_out();
            utils::nav::redirect_to_login();
            Err(err)
        }
    }
}

async fn exchange_refresh_token(
    client: &ApiClient,
    base_url: &str,
    refresh_token: &str,
) -> Result<TokenPair, ApiError> {
    let response = client
        .http_client()
        .post(format!("{base_url}/users/refresh-token"))
        .json(&json!({ "refreshToken": refresh_token }))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    ApiClient::read_envelope::<TokenPair>(response)
        .await
        .map_err(|err| match err {
            ApiError::Api { message, .. } => ApiError::RefreshRejected(message),
            other => other,
        })
}

async fn fetch_user_with_token(
    client: &ApiClient,
    base_url: &str,
    access_token: &str,
) -> Result<UserRecord, ApiError> {
    let response = client
        .http_client()
        .get(format!("{base_url}/users/current-user"))
        .bearer_auth(access_token)
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    ApiClient::read_envelope(response).await
}
