use std::sync::Arc;

use tracing::{info, warn};

use crate::client::api::{ClientError, PortalApi};
use crate::client::storage::{self, LocalStorage};
use crate::models::{SignupRequest, User};

/// Lifecycle of the browser's authenticated session.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthPhase {
    Init,
    Resolving,
    Authenticated(User),
    Anonymous,
}

impl AuthPhase {
    /// While loading, nothing may redirect or call protected endpoints.
    pub fn is_loading(&self) -> bool {
        matches!(self, AuthPhase::Init | AuthPhase::Resolving)
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            AuthPhase::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

pub struct SessionStore {
    api: Arc<dyn PortalApi>,
    storage: Arc<dyn LocalStorage>,
    phase: AuthPhase,
    error: Option<String>,
}

impl SessionStore {
    pub fn new(api: Arc<dyn PortalApi>, storage: Arc<dyn LocalStorage>) -> Self {
        Self {
            api,
            storage,
            phase: AuthPhase::Init,
            error: None,
        }
    }

    pub fn phase(&self) -> &AuthPhase {
        &self.phase
    }

    pub fn user(&self) -> Option<&User> {
        self.phase.user()
    }

    pub fn is_loading(&self) -> bool {
        self.phase.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Mount: `Init → Resolving`.
    pub fn init(&mut self) {
        if self.phase == AuthPhase::Init {
            self.phase = AuthPhase::Resolving;
        }
    }

    /// Reads the persisted user and asks the gateway whether the cookie still holds.
    pub async fn resolve(&mut self) -> &AuthPhase {
        self.init();
        if !self.phase.is_loading() {
            return &self.phase;
        }

        let Some(user) = storage::load_user(self.storage.as_ref()) else {
            self.phase = AuthPhase::Anonymous;
            return &self.phase;
        };

        match self.api.validate().await {
            Ok(true) => {
                self.phase = AuthPhase::Authenticated(user);
            }
            Ok(false) => {
                info!("stored credential for {} rejected, clearing it", user.email);
                storage::clear_user(self.storage.as_ref());
                self.phase = AuthPhase::Anonymous;
            }
            Err(e) => {
                warn!("could not verify stored credential: {}", e);
                self.error = Some(e.to_string());
                self.phase = AuthPhase::Anonymous;
            }
        }
        &self.phase
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<User, ClientError> {
        self.error = None;
        self.phase = AuthPhase::Resolving;
        match self.api.login(email, password).await {
            Ok(user) => {
                storage::save_user(self.storage.as_ref(), &user);
                self.phase = AuthPhase::Authenticated(user.clone());
                Ok(user)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                self.phase = AuthPhase::Anonymous;
                Err(e)
            }
        }
    }

    /// The local credential is dropped even if the gateway call fails.
    pub async fn logout(&mut self) {
        if let Err(e) = self.api.logout().await {
            warn!("logout call failed: {}", e);
        }
        storage::clear_user(self.storage.as_ref());
        self.error = None;
        self.phase = AuthPhase::Anonymous;
    }

    pub async fn signup(&mut self, request: &SignupRequest) -> Result<(), ClientError> {
        self.error = None;
        self.api.signup(request).await.inspect_err(|e| {
            self.error = Some(e.to_string());
        })
    }
}
