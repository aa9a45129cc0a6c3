use chrono::{Duration as ChronoDuration, Utc};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::thread;
use std::time::Duration;

use super::envelope::{error_message, normalize_payload};
use super::error::ApiError;
use crate::models::catalog::{CartItem, CartRequest, Order, Studio, Venue};
use crate::models::session::{AuthTokens, Session, SessionUser};
use crate::models::settings::Settings;
use crate::services::session::TokenRefresher;

const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenPayload {
    #[serde(alias = "token")]
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
}

impl TokenPayload {
    fn into_tokens(self, previous_refresh: Option<&str>) -> AuthTokens {
        let lifetime = self.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS);
        AuthTokens {
            access_token: self.access_token,
            refresh_token: self
                .refresh_token
                .or_else(|| previous_refresh.map(str::to_string))
                .unwrap_or_default(),
            expires_at: Utc::now() + ChronoDuration::seconds(lifetime),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LoginPayload {
    #[serde(flatten)]
    tokens: TokenPayload,
    user: SessionUser,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// Blocking client for the marketplace backend.
///
/// Cloning is cheap; the clones share one connection pool, so a clone can be
/// moved onto a worker thread.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    max_retries: usize,
    retry_delay_ms: u64,
}

impl ApiClient {
    pub fn new(settings: &Settings) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            max_retries: settings.max_retries,
            retry_delay_ms: 400,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/venues/:id`
    pub fn get_venue(&self, id: &str) -> Result<Venue, ApiError> {
        let url = self.resource_url("venues", id)?;
        self.get_json(&url, None, "venue")
    }

    /// `GET /api/studios/:id`
    pub fn get_studio(&self, id: &str) -> Result<Studio, ApiError> {
        let url = self.resource_url("studios", id)?;
        self.get_json(&url, None, "studio")
    }

    /// `GET /api/orders/:id`, admin or owner only
    pub fn get_order(&self, id: &str, access_token: &str) -> Result<Order, ApiError> {
        let url = self.resource_url("orders", id)?;
        self.get_json(&url, Some(access_token), "order")
    }

    /// `POST /api/cart`. Not retried: the backend does not deduplicate cart lines.
    pub fn add_to_cart(
        &self,
        request: &CartRequest,
        access_token: &str,
    ) -> Result<CartItem, ApiError> {
        log::info!(
            "Adding {} to cart for {} .. {}",
            request.item_id,
            request.from,
            request.till
        );
        let response = self
            .client
            .post(format!("{}/api/cart", self.base_url))
            .bearer_auth(access_token)
            .json(request)
            .send()?;
        read_payload(response, "cartItem")
    }

    /// `POST /api/auth/login`
    pub fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(ApiError::InvalidRequest(
                "Email and password are required".to_string(),
            ));
        }

        let response = self
            .client
            .post(format!("{}/api/auth/login", self.base_url))
            .json(&Credentials {
                email: email.trim(),
                password,
            })
            .send()?;
        let payload: LoginPayload = read_payload(response, "session")?;

        Ok(Session {
            user: payload.user,
            tokens: payload.tokens.into_tokens(None),
        })
    }

    /// `POST /api/auth/logout`
    pub fn logout(&self, access_token: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .post(format!("{}/api/auth/logout", self.base_url))
            .bearer_auth(access_token)
            .send()?;
        check_status(response).map(|_| ())
    }

    fn resource_url(&self, collection: &str, id: &str) -> Result<String, ApiError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ApiError::InvalidRequest(format!(
                "An id is required to look up {}",
                collection
            )));
        }
        Ok(format!(
            "{}/api/{}/{}",
            self.base_url,
            collection,
            urlencoding::encode(id)
        ))
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        access_token: Option<&str>,
        key: &str,
    ) -> Result<T, ApiError> {
        self.with_retry(url, || {
            let mut request: RequestBuilder = self.client.get(url);
            if let Some(token) = access_token {
                request = request.bearer_auth(token);
            }
            let response = request.send()?;
            read_payload(response, key)
        })
    }

    fn with_retry<T>(
        &self,
        url: &str,
        mut attempt_once: impl FnMut() -> Result<T, ApiError>,
    ) -> Result<T, ApiError> {
        let mut attempt = 0;
        loop {
            match attempt_once() {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    log::warn!("Request attempt {} failed for {}: {}", attempt, url, err);
                    thread::sleep(Duration::from_millis(self.retry_delay_ms));
                }
                Err(err) => return Err(err),
            }
        }
    }
}

impl TokenRefresher for ApiClient {
    /// `POST /api/auth/refresh`
    fn refresh(&self, refresh_token: &str) -> Result<AuthTokens, ApiError> {
        let response = self
            .client
            .post(format!("{}/api/auth/refresh", self.base_url))
            .json(&RefreshRequest { refresh_token })
            .send()?;
        let payload: TokenPayload = read_payload(response, "tokens")?;
        Ok(payload.into_tokens(Some(refresh_token)))
    }
}

fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        return Err(ApiError::Status {
            status: status.as_u16(),
            message: error_message(&body),
        });
    }
    Ok(response)
}

fn read_payload<T: DeserializeOwned>(response: Response, key: &str) -> Result<T, ApiError> {
    let response = check_status(response)?;
    let value: serde_json::Value = response
        .json()
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    normalize_payload(value, key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        let settings = Settings {
            api_base_url: "https://api.example.com/".to_string(),
            ..Settings::default()
        };
        ApiClient::new(&settings).unwrap()
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        assert_eq!(client().base_url(), "https://api.example.com");
    }

    #[test]
    fn test_resource_url_encodes_id() {
        let url = client().resource_url("venues", "rose garden/1").unwrap();
        assert_eq!(url, "https://api.example.com/api/venues/rose%20garden%2F1");
    }

    #[test]
    fn test_resource_url_requires_id() {
        let result = client().resource_url("studios", "  ");
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }

    #[test]
    fn test_login_requires_credentials() {
        let result = client().login("", "secret");
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }

    #[test]
    fn test_token_payload_keeps_previous_refresh_token() {
        let payload: TokenPayload =
            serde_json::from_str(r#"{"token":"new-access","expiresIn":120}"#).unwrap();
        let tokens = payload.into_tokens(Some("old-refresh"));
        assert_eq!(tokens.access_token, "new-access");
        assert_eq!(tokens.refresh_token, "old-refresh");
        assert!(tokens.expires_at > Utc::now() + ChronoDuration::seconds(60));
    }

    #[test]
    fn test_login_payload_flattened() {
        let payload: LoginPayload = serde_json::from_str(
            r#"{"accessToken":"a","refreshToken":"r","user":{"id":"u1","email":"a@b.c"}}"#,
        )
        .unwrap();
        assert_eq!(payload.tokens.access_token, "a");
        assert_eq!(payload.user.id, "u1");
    }
}
