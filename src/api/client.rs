//! Authenticated HTTP client: bearer attachment on the way out, a single
//! transparent refresh-and-retry on a 401 on the way back.

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::api::payloads::{LoginRequest, LoginResponse, RefreshRequest, RefreshResponse};
use crate::auth::session::Session;
use crate::config::Config;
use crate::core::errors::{ApiError, FieldError};
use crate::core::models::{Role, User};
use crate::infrastructure::storage::file::FileStore;
use crate::infrastructure::storage::in_memory::InMemoryStore;
use crate::infrastructure::storage::{SessionStore, SessionVault};

/// Client for the accounts API, generic over the two session stores so tests
/// can run fully in memory. One instance is shared by reference across tasks;
/// the session is the only mutable state.
pub struct ApiClient<D: SessionStore, E: SessionStore> {
    http: reqwest::Client,
    config: Config,
    session: RwLock<Session>,
    vault: SessionVault<D, E>,
}

impl ApiClient<FileStore, InMemoryStore> {
    /// Production wiring: durable sessions in the configured file, ephemeral
    /// sessions in process memory.
    pub fn new(config: Config) -> Self {
        let vault = SessionVault::new(
            FileStore::new(config.session_file.clone()),
            InMemoryStore::new(),
        );
        Self::with_vault(config, vault)
    }
}

impl<D: SessionStore, E: SessionStore> ApiClient<D, E> {
    pub fn with_vault(config: Config, vault: SessionVault<D, E>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            session: RwLock::new(Session::default()),
            vault,
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path)
    }

    // ── session lifecycle ───────────────────────────────────────────

    /// Load a previously persisted session, durable store first. Returns
    /// whether an authenticated session was restored.
    pub async fn restore_session(&self) -> Result<bool, ApiError> {
        match self.vault.load().await? {
            Some(restored) => {
                let authenticated = restored.is_authenticated();
                *self.session.write().await = restored;
                Ok(authenticated)
            }
            None => Ok(false),
        }
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_authenticated()
    }

    pub async fn current_user(&self) -> Option<User> {
        self.session.read().await.user.clone()
    }

    /// Authenticate and populate the session atomically: user, both tokens
    /// and the remember-me choice land together, then the blob is persisted
    /// per the storage policy. A rejected login leaves the session untouched.
    pub async fn login(
        &self,
        identifier: &str,
        password: &str,
        remember_me: bool,
    ) -> Result<User, ApiError> {
        let body = LoginRequest {
            identifier: identifier.to_string(),
            password: password.to_string(),
        };
        let response = self
            .http
            .post(self.url("accounts/login/"))
            .json(&body)
            .send()
            .await
            .map_err(ApiError::from)?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::BAD_REQUEST | StatusCode::FORBIDDEN => {
                debug!("login rejected for {identifier}");
                Err(ApiError::InvalidCredentials)
            }
            status if status.is_success() => {
                let payload: LoginResponse = response.json().await.map_err(ApiError::from)?;
                let user = User {
                    id: payload.user.id,
                    name: payload.user.name,
                    email: payload.user.email,
                    role: if payload.is_admin {
                        Role::Admin
                    } else {
                        Role::Member
                    },
                };
                let session = Session {
                    user: Some(user.clone()),
                    access_token: Some(payload.access),
                    refresh_token: Some(payload.refresh),
                    remember_me,
                };
                self.vault.persist(&session).await?;
                *self.session.write().await = session;
                info!("logged in as {} ({})", user.name, user.email);
                Ok(user)
            }
            _ => Err(Self::error_from_response(response).await),
        }
    }

    /// Best-effort server notification, then unconditional local clearing of
    /// memory and both stores. Server failures never keep a session alive.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let token = self.session.read().await.access_token.clone();
        if let Some(token) = token {
            let result = self
                .http
                .post(self.url("accounts/logout/"))
                .bearer_auth(token)
                .send()
                .await;
            if let Err(err) = result {
                debug!("server logout notification failed: {err}");
            }
        }
        self.clear_session().await
    }

    async fn clear_session(&self) -> Result<(), ApiError> {
        self.session.write().await.clear();
        self.vault.clear().await
    }

    /// Mint a new access token from the stored refresh token and persist it.
    /// Any failure clears the whole session and surfaces `SessionExpired`.
    async fn refresh_access_token(&self) -> Result<(), ApiError> {
        let refresh = self.session.read().await.refresh_token.clone();
        let Some(refresh) = refresh else {
            warn!("401 with no refresh token on hand");
            self.clear_session().await?;
            return Err(ApiError::SessionExpired);
        };

        let outcome = self
            .http
            .post(self.url("refresh-token/"))
            .json(&RefreshRequest { refresh })
            .send()
            .await;

        let refreshed: Result<RefreshResponse, ()> = match outcome {
            Ok(response) if response.status().is_success() => {
                response.json().await.map_err(|_| ())
            }
            _ => Err(()),
        };

        match refreshed {
            Ok(payload) => {
                let mut session = self.session.write().await;
                session.access_token = Some(payload.access);
                self.vault.persist(&session).await?;
                debug!("access token refreshed");
                Ok(())
            }
            Err(()) => {
                warn!("token refresh failed, clearing session");
                self.clear_session().await?;
                Err(ApiError::SessionExpired)
            }
        }
    }

    // ── interceptors ────────────────────────────────────────────────

    /// Build and send one attempt, attaching the current bearer token if any.
    async fn dispatch<F>(&self, build: &F) -> Result<Response, ApiError>
    where
        F: Fn(&reqwest::Client) -> RequestBuilder,
    {
        let mut request = build(&self.http);
        if let Some(token) = self.session.read().await.access_token.clone() {
            request = request.bearer_auth(token);
        }
        request.send().await.map_err(ApiError::from)
    }

    /// Send with the single refresh-and-retry rule: a 401 triggers exactly one
    /// refresh and one replay of the request; a 401 on the replay is final.
    /// The builder closure reconstructs the request so the replay carries the
    /// new token (and rebuilds non-clonable bodies such as multipart forms).
    pub(crate) async fn send<F>(&self, build: F) -> Result<Response, ApiError>
    where
        F: Fn(&reqwest::Client) -> RequestBuilder,
    {
        let response = self.dispatch(&build).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        debug!("request rejected with 401, attempting refresh");
        self.refresh_access_token().await?;

        let retried = self.dispatch(&build).await?;
        if retried.status() == StatusCode::UNAUTHORIZED {
            // Fresh token rejected too; same terminal state as a failed refresh.
            warn!("retried request rejected again, clearing session");
            self.clear_session().await?;
            return Err(ApiError::SessionExpired);
        }
        Ok(retried)
    }

    // ── response mapping ────────────────────────────────────────────

    async fn error_from_response(response: Response) -> ApiError {
        let status = response.status();
        let path = response.url().path().to_string();
        if status == StatusCode::NOT_FOUND {
            return ApiError::NotFound(path);
        }

        let body = response.text().await.unwrap_or_default();
        if status.is_client_error() {
            if let Some(fields) = parse_field_errors(&body) {
                return ApiError::Validation(fields);
            }
        }
        ApiError::Unexpected(format!("{status} from {path}: {body}"))
    }

    pub(crate) async fn expect_json<T: DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T, ApiError> {
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        response.json().await.map_err(ApiError::from)
    }

    async fn expect_success(&self, response: Response) -> Result<(), ApiError> {
        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }
        Ok(())
    }

    // ── verb helpers shared by the endpoint modules ─────────────────

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let response = self
            .send(|http| http.get(self.url(path)).query(query))
            .await?;
        self.expect_json(response).await
    }

    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .send(|http| http.post(self.url(path)).query(query).json(body))
            .await?;
        self.expect_json(response).await
    }

    pub(crate) async fn patch_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .send(|http| http.patch(self.url(path)).json(body))
            .await?;
        self.expect_json(response).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.send(|http| http.delete(self.url(path))).await?;
        self.expect_success(response).await
    }
}

/// Parse a 4xx body of the `{"field": ["msg", ...]}` / `{"field": "msg"}`
/// shape into field errors. Anything else is reported verbatim.
fn parse_field_errors(body: &str) -> Option<Vec<FieldError>> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let map = value.as_object()?;
    let mut fields = Vec::new();
    for (field, messages) in map {
        match messages {
            serde_json::Value::String(message) => fields.push(FieldError {
                field: field.clone(),
                message: message.clone(),
            }),
            serde_json::Value::Array(items) => {
                for item in items {
                    if let Some(message) = item.as_str() {
                        fields.push(FieldError {
                            field: field.clone(),
                            message: message.to_string(),
                        });
                    }
                }
            }
            _ => return None,
        }
    }
    if fields.is_empty() { None } else { Some(fields) }
}

#[cfg(test)]
mod tests {
    use super::parse_field_errors;

    #[test]
    fn field_errors_from_list_shape() {
        let fields =
            parse_field_errors(r#"{"amount": ["This field is required."], "notes": "Too long"}"#)
                .unwrap();
        assert_eq!(fields.len(), 2);
        assert!(fields.iter().any(|f| f.field == "amount"));
        assert!(
            fields
                .iter()
                .any(|f| f.field == "notes" && f.message == "Too long")
        );
    }

    #[test]
    fn non_field_body_is_not_validation() {
        assert!(parse_field_errors("Internal Server Error").is_none());
        assert!(parse_field_errors(r#"{"detail": 5}"#).is_none());
        assert!(parse_field_errors("[1, 2]").is_none());
    }
}
