use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::backend::error_detail;
use crate::client::forms::FormErrors;
use crate::models::{Enrollment, LoginRequest, NewSession, Session, SessionUpdate, SignupRequest, User};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Transport(String),

    #[error("{0}")]
    Validation(FormErrors),
}

impl ClientError {
    /// The backend refuses a second enrollment with 400 "already enrolled".
    pub fn is_already_enrolled(&self) -> bool {
        match self {
            ClientError::Api { status, message } => {
                *status == 400 && message.to_lowercase().contains("already enrolled")
            }
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Transport(e.to_string())
    }
}

/// The portal's own `/api` surface as seen from a page.
#[async_trait]
pub trait PortalApi: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<User, ClientError>;
    async fn logout(&self) -> Result<(), ClientError>;
    /// `Ok(false)` means the stored credential is no longer accepted.
    async fn validate(&self) -> Result<bool, ClientError>;
    async fn signup(&self, request: &SignupRequest) -> Result<(), ClientError>;
    async fn enroll_by_code(&self, code: &str) -> Result<Enrollment, ClientError>;
    async fn get_session(&self, session_id: i64) -> Result<Session, ClientError>;
    async fn create_session(&self, session: &NewSession) -> Result<Session, ClientError>;
    async fn update_session(&self, session_id: i64, update: &SessionUpdate) -> Result<Session, ClientError>;
    async fn generate_code(&self, session_id: i64) -> Result<Session, ClientError>;
}

#[derive(Deserialize)]
struct LoginReply {
    #[serde(default)]
    user: Option<User>,
}

#[derive(Deserialize)]
struct ValidateReply {
    valid: bool,
}

/// Talks to a running gateway; the auth cookie is kept in the client's cookie store.
pub struct HttpPortalApi {
    client: Client,
    base_url: String,
}

impl HttpPortalApi {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let client = Client::builder().cookie_store(true).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    async fn call<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!("portal api answered {}", status);

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|body| error_detail(&body))
                .unwrap_or_else(|| format!("Request failed with status {}", status));
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let raw = if text.trim().is_empty() { "null" } else { text.as_str() };
        serde_json::from_str(raw).map_err(|e| {
            warn!("unexpected portal api body: {}", e);
            ClientError::Transport(format!("Failed to parse response: {}", e))
        })
    }
}

#[async_trait]
impl PortalApi for HttpPortalApi {
    async fn login(&self, email: &str, password: &str) -> Result<User, ClientError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let reply: LoginReply = self
            .call(self.client.post(self.url("/auth/login")).json(&request))
            .await?;
        match reply.user {
            Some(user) => Ok(user),
            None => self.call(self.client.get(self.url("/users/me"))).await,
        }
    }

    async fn logout(&self) -> Result<(), ClientError> {
        let _: Value = self.call(self.client.post(self.url("/auth/logout"))).await?;
        Ok(())
    }

    async fn validate(&self) -> Result<bool, ClientError> {
        match self
            .call::<ValidateReply>(self.client.get(self.url("/auth/validate")))
            .await
        {
            Ok(reply) => Ok(reply.valid),
            Err(ClientError::Api { status: 401, .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn signup(&self, request: &SignupRequest) -> Result<(), ClientError> {
        let _: Value = self
            .call(self.client.post(self.url("/auth/signup")).json(request))
            .await?;
        Ok(())
    }

    async fn enroll_by_code(&self, code: &str) -> Result<Enrollment, ClientError> {
        let builder = self
            .client
            .post(self.url("/sessions/enroll-by-code"))
            .query(&[("code", code)]);
        self.call(builder).await
    }

    async fn get_session(&self, session_id: i64) -> Result<Session, ClientError> {
        let path = format!("/sessions/{}", session_id);
        self.call(self.client.get(self.url(&path))).await
    }

    async fn create_session(&self, session: &NewSession) -> Result<Session, ClientError> {
        self.call(self.client.post(self.url("/sessions")).json(session))
            .await
    }

    async fn update_session(&self, session_id: i64, update: &SessionUpdate) -> Result<Session, ClientError> {
        let path = format!("/sessions/{}", session_id);
        self.call(self.client.put(self.url(&path)).json(update)).await
    }

    async fn generate_code(&self, session_id: i64) -> Result<Session, ClientError> {
        let path = format!("/sessions/{}/generate-code", session_id);
        self.call(self.client.post(self.url(&path))).await
    }
}
