use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::api::types::{ApiEnvelope, ApiError};
use crate::{config, session};

/// Single choke point for backend traffic: attaches the stored access token
/// to outgoing requests and, on a 401, retries once after the refresh
/// coordinator has exchanged the refresh token.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into()),
        }
    }

    pub(crate) async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.client
    }

    /// Adds the bearer credential when one is stored; requests without a
    /// stored token go out without an authorization header.
    pub(crate) fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match session::access_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends an authorized request; a 401 response hands control to the
    /// refresh coordinator and, on success, re-issues the identical request
    /// exactly once with the new token. If the refresh fails the original
    /// 401 is surfaced to the caller.
    pub(crate) async fn send_with_refresh<F>(&self, build: F) -> Result<Response, ApiError>
    where
        F: Fn() -> RequestBuilder,
    {
        let response = self
            .authorized(build())
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }
        match super::auth::refresh_access_token(self).await {
            Ok(_) => self
                .authorized(build())
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string())),
            Err(_) => Ok(response),
        }
    }

    /// Unwraps the `{statusCode, data, message}` envelope into its data.
    pub(crate) async fn read_envelope<T: DeserializeOwned>(
        response: Response,
    ) -> Result<T, ApiError> {
        let envelope = Self::parse_envelope::<T>(response).await?;
        match envelope.status_code {
            200 | 201 => envelope
                .data
                .ok_or_else(|| ApiError::Unexpected("envelope carried no data".into())),
            status => Err(Self::envelope_error(status, envelope.message)),
        }
    }

    /// Like [`read_envelope`](Self::read_envelope) for endpoints whose
    /// success payload is empty or irrelevant.
    pub(crate) async fn expect_success(response: Response) -> Result<(), ApiError> {
        let envelope = Self::parse_envelope::<serde_json::Value>(response).await?;
        match envelope.status_code {
            200 | 201 => Ok(()),
            status => Err(Self::envelope_error(status, envelope.message)),
        }
    }

    async fn parse_envelope<T: DeserializeOwned>(
        response: Response,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        let status = response.status();
        match response.json::<ApiEnvelope<T>>().await {
            Ok(envelope) => Ok(envelope),
            Err(err) => {
                if status.is_server_error() {
                    Err(ApiError::Server(format!("status {}", status.as_u16())))
                } else if !status.is_success() {
                    Err(ApiError::Api {
                        status_code: status.as_u16(),
                        message: format!("request rejected with status {}", status.as_u16()),
                    })
                } else {
                    Err(ApiError::Unexpected(format!(
                        "failed to parse response: {err}"
                    )))
                }
            }
        }
    }

    fn envelope_error(status_code: u16, message: Option<String>) -> ApiError {
        let message =
            message.unwrap_or_else(|| format!("request rejected with status {status_code}"));
        if status_code >= 500 {
            ApiError::Server(message)
        } else {
            ApiError::Api {
                status_code,
                message,
            }
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}
